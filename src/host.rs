//! Interfaces to the compositor hosting the overview.
//!
//! The host owns monitors, workspaces, windows and the renderer. Everything here is looked up by
//! id on every call: a monitor or workspace can disappear between two calls, and callers must
//! treat a failed lookup as "nothing to do".

use std::fmt;
use std::time::Duration;

use smithay::utils::{Logical, Physical, Point, Rectangle, Size, Transform};
use taskview_config::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorId(pub u64);

/// Workspace id as assigned by the host.
///
/// Negative ids belong to special workspaces that never take part in the overview layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only copy of a monitor's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSnapshot {
    pub id: MonitorId,
    /// Top-left corner in the global (multi-monitor) space.
    pub position: Point<f64, Logical>,
    /// Mode size before the output transform is applied.
    pub pixel_size: Size<f64, Physical>,
    pub scale: f64,
    pub transform: Transform,
}

impl MonitorSnapshot {
    /// Size with the output rotation applied.
    pub fn transformed_size(&self) -> Size<f64, Physical> {
        self.transform.transform_size(self.pixel_size)
    }

    /// Area covered by this monitor in the global space.
    pub fn logical_box(&self) -> Rectangle<f64, Logical> {
        let size = self.transformed_size();
        Rectangle::new(
            self.position,
            Size::from((size.w / self.scale, size.h / self.scale)),
        )
    }
}

/// Which part of the overview frame a workspace is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// The monitor's own workspace behind the overview chrome.
    Background,
    /// A workspace thumbnail inside a slot.
    Slot,
}

pub trait Monitors {
    fn monitor_ids(&self) -> Vec<MonitorId>;

    fn monitor(&self, id: MonitorId) -> Option<MonitorSnapshot>;

    /// Returns the monitor containing `pos` in the global space.
    fn monitor_at(&self, pos: Point<f64, Logical>) -> Option<MonitorId>;
}

pub trait Workspaces {
    fn workspace_exists(&self, id: WorkspaceId) -> bool;

    /// Lists the ids of all workspaces currently on `monitor`, in no particular order.
    fn workspaces_on(&self, monitor: MonitorId) -> Vec<WorkspaceId>;

    fn active_workspace(&self, monitor: MonitorId) -> Option<WorkspaceId>;

    /// Creates an empty workspace with the given id on `monitor`.
    ///
    /// Returns `false` if the host refused.
    fn create_workspace(&mut self, id: WorkspaceId, monitor: MonitorId) -> bool;

    /// Makes `id` the active workspace of `monitor` and starts its entrance animation.
    fn switch_to(&mut self, monitor: MonitorId, id: WorkspaceId);

    fn window_workspace(&self, window: WindowId) -> Option<WorkspaceId>;

    /// Window geometry in the global space, as if its workspace were shown on its monitor.
    fn window_geometry(&self, window: WindowId) -> Option<Rectangle<f64, Logical>>;

    fn window_under(&self, pos: Point<f64, Logical>) -> Option<WindowId>;

    fn focus_window(&mut self, window: WindowId);

    /// Moves `window` to workspace `id` with its top-left corner at `pos`.
    fn move_window_to_workspace(
        &mut self,
        window: WindowId,
        id: WorkspaceId,
        pos: Point<f64, Logical>,
    );
}

pub trait Input {
    /// Pointer position in the global space.
    fn pointer_position(&self) -> Point<f64, Logical>;

    /// Window currently being dragged with the pointer.
    fn dragged_window(&self) -> Option<WindowId>;

    fn set_cursor_override(&mut self, name: &str);

    fn unset_cursor_override(&mut self);
}

pub trait Renderer {
    /// Schedules a redraw of `monitor`.
    fn damage_monitor(&mut self, monitor: MonitorId);

    /// Workspace the renderer currently treats as active on `monitor`.
    ///
    /// Hosts typically only draw the contents of the active workspace, so the overview swaps this
    /// around while drawing thumbnails, see [`ActiveWorkspaceOverride`].
    ///
    /// [`ActiveWorkspaceOverride`]: crate::view::ActiveWorkspaceOverride
    fn render_active_workspace(&self, monitor: MonitorId) -> Option<WorkspaceId>;

    fn set_render_active_workspace(&mut self, monitor: MonitorId, id: Option<WorkspaceId>);

    /// Draws `workspace` into `rect`, or only the monitor's layer surfaces if there is none.
    ///
    /// `rect` is in pre-rotation pixel coordinates of `monitor`.
    fn render_workspace(
        &mut self,
        monitor: MonitorId,
        workspace: Option<WorkspaceId>,
        rect: Rectangle<f64, Physical>,
        pass: RenderPass,
        time: Duration,
    );

    /// Draws a single window at an explicit global rectangle.
    fn render_window(
        &mut self,
        window: WindowId,
        monitor: MonitorId,
        rect: Rectangle<f64, Logical>,
        time: Duration,
    );

    /// Fills `rect`, optionally blurring what's behind it with the given strength.
    fn render_rect(
        &mut self,
        monitor: MonitorId,
        rect: Rectangle<f64, Physical>,
        color: Color,
        blur: Option<f64>,
    );

    fn render_border(
        &mut self,
        monitor: MonitorId,
        rect: Rectangle<f64, Physical>,
        color: Color,
        width: f64,
    );
}

/// Everything the overview needs from the compositor.
pub trait Host: Monitors + Workspaces + Input + Renderer {}

impl<T: Monitors + Workspaces + Input + Renderer> Host for T {}
