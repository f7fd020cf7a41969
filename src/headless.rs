//! In-memory host.
//!
//! Keeps monitors, workspaces and windows in plain collections and records every draw call
//! instead of drawing. Used by the command line preview and by tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;

use smithay::utils::{Logical, Physical, Point, Rectangle, Size, Transform};
use taskview_config::Color;

use crate::host::{
    Input, MonitorId, MonitorSnapshot, Monitors, RenderPass, Renderer, WindowId, WorkspaceId,
    Workspaces,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Workspace {
        monitor: MonitorId,
        workspace: Option<WorkspaceId>,
        rect: Rectangle<f64, Physical>,
        pass: RenderPass,
        /// Render-active workspace of the monitor at the time of the call.
        render_active: Option<WorkspaceId>,
    },
    Window {
        window: WindowId,
        monitor: MonitorId,
        rect: Rectangle<f64, Logical>,
    },
    Rect {
        monitor: MonitorId,
        rect: Rectangle<f64, Physical>,
        color: Color,
        blur: Option<f64>,
    },
    Border {
        monitor: MonitorId,
        rect: Rectangle<f64, Physical>,
        color: Color,
        width: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Window {
    workspace: WorkspaceId,
    geometry: Rectangle<f64, Logical>,
}

#[derive(Debug)]
pub struct HeadlessHost {
    monitors: BTreeMap<MonitorId, MonitorSnapshot>,
    workspaces: BTreeMap<WorkspaceId, MonitorId>,
    /// Active workspace per monitor.
    ///
    /// Shared between the real and the render-active workspace, like hosts that only draw their
    /// active workspace do.
    active: HashMap<MonitorId, WorkspaceId>,
    windows: BTreeMap<WindowId, Window>,
    pointer: Point<f64, Logical>,
    dragged: Option<WindowId>,
    cursor_override: Option<String>,
    focused: Option<WindowId>,
    damaged: BTreeSet<MonitorId>,
    switches: Vec<(MonitorId, WorkspaceId)>,
    draw_calls: Vec<DrawCall>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            monitors: BTreeMap::new(),
            workspaces: BTreeMap::new(),
            active: HashMap::new(),
            windows: BTreeMap::new(),
            pointer: Point::from((0., 0.)),
            dragged: None,
            cursor_override: None,
            focused: None,
            damaged: BTreeSet::new(),
            switches: Vec::new(),
            draw_calls: Vec::new(),
        }
    }

    /// Adds a monitor with a mode of `size` pixels at `position`.
    pub fn add_monitor(
        &mut self,
        id: MonitorId,
        position: Point<f64, Logical>,
        size: Size<f64, Physical>,
        scale: f64,
        transform: Transform,
    ) {
        self.monitors.insert(
            id,
            MonitorSnapshot {
                id,
                position,
                pixel_size: size,
                scale,
                transform,
            },
        );
    }

    pub fn remove_monitor(&mut self, id: MonitorId) {
        self.monitors.remove(&id);
        self.active.remove(&id);
    }

    /// Adds a workspace, making it active if the monitor has none yet.
    pub fn add_workspace(&mut self, id: WorkspaceId, monitor: MonitorId) {
        self.workspaces.insert(id, monitor);
        self.active.entry(monitor).or_insert(id);
    }

    pub fn remove_workspace(&mut self, id: WorkspaceId) {
        self.workspaces.remove(&id);
        self.active.retain(|_, active| *active != id);
        self.windows.retain(|_, window| window.workspace != id);
    }

    pub fn add_window(
        &mut self,
        id: WindowId,
        workspace: WorkspaceId,
        geometry: Rectangle<f64, Logical>,
    ) {
        self.windows.insert(
            id,
            Window {
                workspace,
                geometry,
            },
        );
    }

    pub fn set_pointer(&mut self, pos: Point<f64, Logical>) {
        self.pointer = pos;
    }

    pub fn set_dragged_window(&mut self, window: Option<WindowId>) {
        self.dragged = window;
    }

    pub fn cursor_override(&self) -> Option<&str> {
        self.cursor_override.as_deref()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn is_damaged(&self, monitor: MonitorId) -> bool {
        self.damaged.contains(&monitor)
    }

    pub fn clear_damage(&mut self) {
        self.damaged.clear();
    }

    /// Workspace switches requested so far, oldest first.
    pub fn switches(&self) -> &[(MonitorId, WorkspaceId)] {
        &self.switches
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    pub fn take_draw_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draw_calls)
    }
}

impl Monitors for HeadlessHost {
    fn monitor_ids(&self) -> Vec<MonitorId> {
        self.monitors.keys().copied().collect()
    }

    fn monitor(&self, id: MonitorId) -> Option<MonitorSnapshot> {
        self.monitors.get(&id).copied()
    }

    fn monitor_at(&self, pos: Point<f64, Logical>) -> Option<MonitorId> {
        self.monitors
            .values()
            .find(|monitor| monitor.logical_box().contains(pos))
            .map(|monitor| monitor.id)
    }
}

impl Workspaces for HeadlessHost {
    fn workspace_exists(&self, id: WorkspaceId) -> bool {
        self.workspaces.contains_key(&id)
    }

    fn workspaces_on(&self, monitor: MonitorId) -> Vec<WorkspaceId> {
        self.workspaces
            .iter()
            .filter(|(_, mon)| **mon == monitor)
            .map(|(id, _)| *id)
            .collect()
    }

    fn active_workspace(&self, monitor: MonitorId) -> Option<WorkspaceId> {
        self.active.get(&monitor).copied()
    }

    fn create_workspace(&mut self, id: WorkspaceId, monitor: MonitorId) -> bool {
        if self.workspaces.contains_key(&id) || !self.monitors.contains_key(&monitor) {
            return false;
        }
        self.workspaces.insert(id, monitor);
        true
    }

    fn switch_to(&mut self, monitor: MonitorId, id: WorkspaceId) {
        if !self.workspaces.contains_key(&id) {
            return;
        }
        self.workspaces.insert(id, monitor);
        self.active.insert(monitor, id);
        self.switches.push((monitor, id));
    }

    fn window_workspace(&self, window: WindowId) -> Option<WorkspaceId> {
        self.windows.get(&window).map(|w| w.workspace)
    }

    fn window_geometry(&self, window: WindowId) -> Option<Rectangle<f64, Logical>> {
        self.windows.get(&window).map(|w| w.geometry)
    }

    fn window_under(&self, pos: Point<f64, Logical>) -> Option<WindowId> {
        let monitor = self.monitor_at(pos)?;
        let active = self.active_workspace(monitor)?;
        self.windows
            .iter()
            .find(|(_, window)| window.workspace == active && window.geometry.contains(pos))
            .map(|(id, _)| *id)
    }

    fn focus_window(&mut self, window: WindowId) {
        self.focused = Some(window);
    }

    fn move_window_to_workspace(
        &mut self,
        window: WindowId,
        id: WorkspaceId,
        pos: Point<f64, Logical>,
    ) {
        if let Some(window) = self.windows.get_mut(&window) {
            window.workspace = id;
            window.geometry.loc = pos;
        }
    }
}

impl Input for HeadlessHost {
    fn pointer_position(&self) -> Point<f64, Logical> {
        self.pointer
    }

    fn dragged_window(&self) -> Option<WindowId> {
        self.dragged
    }

    fn set_cursor_override(&mut self, name: &str) {
        self.cursor_override = Some(name.to_owned());
    }

    fn unset_cursor_override(&mut self) {
        self.cursor_override = None;
    }
}

impl Renderer for HeadlessHost {
    fn damage_monitor(&mut self, monitor: MonitorId) {
        self.damaged.insert(monitor);
    }

    fn render_active_workspace(&self, monitor: MonitorId) -> Option<WorkspaceId> {
        self.active.get(&monitor).copied()
    }

    fn set_render_active_workspace(&mut self, monitor: MonitorId, id: Option<WorkspaceId>) {
        match id {
            Some(id) => self.active.insert(monitor, id),
            None => self.active.remove(&monitor),
        };
    }

    fn render_workspace(
        &mut self,
        monitor: MonitorId,
        workspace: Option<WorkspaceId>,
        rect: Rectangle<f64, Physical>,
        pass: RenderPass,
        _time: Duration,
    ) {
        let render_active = self.render_active_workspace(monitor);
        self.draw_calls.push(DrawCall::Workspace {
            monitor,
            workspace,
            rect,
            pass,
            render_active,
        });
    }

    fn render_window(
        &mut self,
        window: WindowId,
        monitor: MonitorId,
        rect: Rectangle<f64, Logical>,
        _time: Duration,
    ) {
        self.draw_calls.push(DrawCall::Window {
            window,
            monitor,
            rect,
        });
    }

    fn render_rect(
        &mut self,
        monitor: MonitorId,
        rect: Rectangle<f64, Physical>,
        color: Color,
        blur: Option<f64>,
    ) {
        self.draw_calls.push(DrawCall::Rect {
            monitor,
            rect,
            color,
            blur,
        });
    }

    fn render_border(
        &mut self,
        monitor: MonitorId,
        rect: Rectangle<f64, Physical>,
        color: Color,
        width: f64,
    ) {
        self.draw_calls.push(DrawCall::Border {
            monitor,
            rect,
            color,
            width,
        });
    }
}
