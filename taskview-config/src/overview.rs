use crate::animations::Animations;
use crate::appearance::{
    Color, DEFAULT_ACTIVE_BORDER_COLOR, DEFAULT_BACKGROUND_COLOR, DEFAULT_INACTIVE_BORDER_COLOR,
};
use crate::utils::{FloatOrInt, Toggle};

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Overview {
    #[knuffel(child, unwrap(argument), default)]
    pub layout: LayoutKind,
    /// Gap around workspace slots, in logical pixels.
    #[knuffel(child, unwrap(argument), default = Self::default().gap_size)]
    pub gap_size: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = Self::default().border_size)]
    pub border_size: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = DEFAULT_BACKGROUND_COLOR)]
    pub bg_color: Color,
    #[knuffel(child, unwrap(argument), default = DEFAULT_ACTIVE_BORDER_COLOR)]
    pub active_border_color: Color,
    #[knuffel(child, unwrap(argument), default = DEFAULT_INACTIVE_BORDER_COLOR)]
    pub inactive_border_color: Color,
    /// Ordered strategies picking the workspace to land on when the overview closes.
    ///
    /// Kept as raw keywords: unknown ones are reported when they are evaluated.
    #[knuffel(child, unwrap(arguments), default = Self::default().exit_behavior)]
    pub exit_behavior: Vec<String>,
    /// Whether a click in the overview picks the workspace under the pointer and closes.
    #[knuffel(child, default = Toggle(true))]
    pub exit_on_click: Toggle,
    #[knuffel(child, default)]
    pub grid: Grid,
    #[knuffel(child, default)]
    pub linear: Linear,
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Default for Overview {
    fn default() -> Self {
        Self {
            layout: LayoutKind::default(),
            gap_size: FloatOrInt(8.),
            border_size: FloatOrInt(4.),
            bg_color: DEFAULT_BACKGROUND_COLOR,
            active_border_color: DEFAULT_ACTIVE_BORDER_COLOR,
            inactive_border_color: DEFAULT_INACTIVE_BORDER_COLOR,
            exit_behavior: vec![
                String::from("hovered"),
                String::from("interacted"),
                String::from("original"),
            ],
            exit_on_click: Toggle(true),
            grid: Grid::default(),
            linear: Linear::default(),
            animations: Animations::default(),
        }
    }
}

#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// All workspaces at once in a fixed-width grid.
    #[default]
    Grid,
    /// A horizontal strip sliding in from the bottom edge.
    Linear,
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Number of slots per grid row.
    #[knuffel(child, unwrap(argument), default = 3)]
    pub rows: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self { rows: 3 }
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    /// Height of the strip, in logical pixels.
    #[knuffel(child, unwrap(argument), default = Self::default().height)]
    pub height: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = Self::default().scroll_speed)]
    pub scroll_speed: FloatOrInt<0, 100>,
    /// Whether to blur the workspace behind the strip.
    #[knuffel(child, default = Toggle(true))]
    pub blur: Toggle,
}

impl Default for Linear {
    fn default() -> Self {
        Self {
            height: FloatOrInt(400.),
            scroll_speed: FloatOrInt(1.),
            blur: Toggle(true),
        }
    }
}
