use std::ops::{Deref, DerefMut};
use std::time::Duration;

use smithay::utils::{Physical, Point, Rectangle};
use taskview_config::Color;

use super::{NavSlide, View};
use crate::host::{Host, MonitorId, MonitorSnapshot, RenderPass, Renderer, WorkspaceId};
use crate::layout::{LayoutCtx, ViewStage};
use crate::utils::{render_rect, scale_around};

/// Makes `workspace` the render-active workspace of a monitor until dropped.
///
/// Hosts only draw the contents of the workspace they consider active, so drawing another
/// workspace into a slot means swapping it in for the duration of the draw call. The previous
/// value is restored on drop, whatever path leaves the scope.
pub struct ActiveWorkspaceOverride<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
    monitor: MonitorId,
    previous: Option<WorkspaceId>,
}

impl<'a, R: Renderer + ?Sized> ActiveWorkspaceOverride<'a, R> {
    pub fn new(renderer: &'a mut R, monitor: MonitorId, workspace: WorkspaceId) -> Self {
        let previous = renderer.render_active_workspace(monitor);
        renderer.set_render_active_workspace(monitor, Some(workspace));
        Self {
            renderer,
            monitor,
            previous,
        }
    }
}

impl<R: Renderer + ?Sized> Deref for ActiveWorkspaceOverride<'_, R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> DerefMut for ActiveWorkspaceOverride<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> Drop for ActiveWorkspaceOverride<'_, R> {
    fn drop(&mut self) {
        self.renderer
            .set_render_active_workspace(self.monitor, self.previous);
    }
}

/// Draws `workspace` into `rect`, or only the monitor's layers if it doesn't exist.
fn draw_workspace<H: Host>(
    host: &mut H,
    monitor: MonitorId,
    workspace: Option<WorkspaceId>,
    rect: Rectangle<f64, Physical>,
    pass: RenderPass,
    time: Duration,
) {
    match workspace {
        Some(id) => {
            let mut guard = ActiveWorkspaceOverride::new(host, monitor, id);
            guard.render_workspace(monitor, Some(id), rect, pass, time);
        }
        None => host.render_workspace(monitor, None, rect, pass, time),
    }
}

impl View {
    /// Draws one frame of the overview.
    ///
    /// `drag_scale` is the preview scale of the dragged window, taken from the view under the
    /// pointer.
    pub fn render<H: Host>(
        &mut self,
        host: &mut H,
        time: Duration,
        drag_scale: f64,
    ) -> anyhow::Result<()> {
        let _span = tracy_client::span!("View::render");

        let Some(monitor) = self.monitor(host) else {
            return Ok(());
        };
        let id = self.monitor_id;

        host.damage_monitor(id);

        if !self.active {
            if let Some(slide) = self.nav_slide {
                self.render_slide(host, &monitor, slide, time);
                return Ok(());
            }
        }

        self.refresh_layout(host, ViewStage::Animating)?;

        let options = self.options.clone();
        let ctx = LayoutCtx::new(&monitor, &options);
        let offsets = self.offsets();
        let active = host.active_workspace(id);
        let full = Rectangle::new(Point::from((0., 0.)), monitor.pixel_size);

        // The monitor's own workspace, dimmed and blurred behind everything else.
        draw_workspace(host, id, active, full, RenderPass::Background, time);
        let blur = self
            .layout
            .blur_background(&options)
            .then(|| self.blur.value());
        host.render_rect(
            id,
            full,
            Color::new_unpremul(0., 0., 0., self.dim.value() as f32),
            blur,
        );

        if let Some(backdrop) = self.layout.backdrop(&ctx, offsets) {
            host.render_rect(id, backdrop, options.bg_color.opaque(), None);
        }

        let focus = active
            .and_then(|ws| self.slots.get(ws))
            .map_or_else(|| ctx.monitor_rect(), |slot| slot.rect);

        for slot in self.slots.iter() {
            let rect = self.layout.presentation_rect(&ctx, slot.rect, focus, offsets);
            if !rect.overlaps(ctx.monitor_rect()) {
                continue;
            }

            let color = if Some(slot.id) == active {
                options.active_border_color
            } else {
                options.inactive_border_color
            };
            host.render_border(id, rect, color, options.border_size);

            let workspace = host.workspace_exists(slot.id).then_some(slot.id);
            let rect = render_rect(rect, monitor.transform);
            draw_workspace(host, id, workspace, rect, RenderPass::Slot, time);
        }

        self.render_drag_preview(host, &monitor, drag_scale, time);
        Ok(())
    }

    fn render_slide<H: Host>(
        &self,
        host: &mut H,
        monitor: &MonitorSnapshot,
        slide: NavSlide,
        time: Duration,
    ) {
        let size = monitor.transformed_size();
        let progress = self.scroll.value();
        let (dx, dy) = (f64::from(slide.dx), f64::from(slide.dy));

        let to_loc = Point::from((dx * size.w * progress, dy * size.h * progress));
        let from_loc = Point::from((to_loc.x - dx * size.w, to_loc.y - dy * size.h));

        for (workspace, loc) in [(slide.from, from_loc), (slide.to, to_loc)] {
            let workspace = host.workspace_exists(workspace).then_some(workspace);
            let rect = render_rect(Rectangle::new(loc, size), monitor.transform);
            draw_workspace(host, self.monitor_id, workspace, rect, RenderPass::Background, time);
        }
    }

    fn render_drag_preview<H: Host>(
        &self,
        host: &mut H,
        monitor: &MonitorSnapshot,
        scale: f64,
        time: Duration,
    ) {
        let Some(window) = host.dragged_window() else {
            return;
        };
        let Some(geometry) = host.window_geometry(window) else {
            return;
        };

        let rect = scale_around(geometry, host.pointer_position(), scale);
        if rect.overlaps(monitor.logical_box()) {
            host.render_window(window, self.monitor_id, rect, time);
        }
    }
}
