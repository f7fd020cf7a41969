use knuffel::errors::DecodeError;

use crate::utils::FloatOrInt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animations {
    pub off: bool,
    /// Multiplier for all animation durations.
    pub slowdown: FloatOrInt<0, { i32::MAX }>,
    /// Strip or grid sliding into view when the overview opens and closes.
    pub reveal: Animation,
    /// Horizontal strip scrolling and workspace-to-workspace slides.
    pub scroll: Animation,
    pub blur: Animation,
    pub dim: Animation,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            slowdown: FloatOrInt(1.),
            reveal: Animation::movement(),
            scroll: Animation::movement(),
            blur: Animation::fade(),
            dim: Animation::fade(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub duration_ms: u32,
    pub curve: Curve,
}

impl Default for Animation {
    fn default() -> Self {
        Self::movement()
    }
}

impl Animation {
    pub const fn movement() -> Self {
        Self {
            off: false,
            duration_ms: 250,
            curve: Curve::EaseOutCubic,
        }
    }

    pub const fn fade() -> Self {
        Self {
            off: false,
            duration_ms: 300,
            curve: Curve::EaseOutQuad,
        }
    }
}

#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    #[default]
    EaseOutCubic,
    EaseOutExpo,
}

// Animation nodes are decoded with every field optional, then filled from the defaults of the
// animation they configure, since movement and fade animations default differently.
#[derive(knuffel::Decode)]
struct AnimationsPart {
    #[knuffel(child)]
    off: bool,
    #[knuffel(child, unwrap(argument))]
    slowdown: Option<FloatOrInt<0, { i32::MAX }>>,
    #[knuffel(child)]
    reveal: Option<AnimationPart>,
    #[knuffel(child)]
    scroll: Option<AnimationPart>,
    #[knuffel(child)]
    blur: Option<AnimationPart>,
    #[knuffel(child)]
    dim: Option<AnimationPart>,
}

#[derive(knuffel::Decode)]
struct AnimationPart {
    #[knuffel(child)]
    off: bool,
    #[knuffel(child, unwrap(argument))]
    duration_ms: Option<u32>,
    #[knuffel(child, unwrap(argument))]
    curve: Option<Curve>,
}

impl AnimationPart {
    fn resolve(part: Option<Self>, base: Animation) -> Animation {
        let Some(part) = part else {
            return base;
        };

        Animation {
            off: part.off,
            duration_ms: part.duration_ms.unwrap_or(base.duration_ms),
            curve: part.curve.unwrap_or(base.curve),
        }
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for Animations {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let part = <AnimationsPart as knuffel::Decode<S>>::decode_node(node, ctx)?;
        let default = Self::default();

        Ok(Self {
            off: part.off,
            slowdown: part.slowdown.unwrap_or(default.slowdown),
            reveal: AnimationPart::resolve(part.reveal, default.reveal),
            scroll: AnimationPart::resolve(part.scroll, default.scroll),
            blur: AnimationPart::resolve(part.blur, default.blur),
            dim: AnimationPart::resolve(part.dim, default.dim),
        })
    }
}
