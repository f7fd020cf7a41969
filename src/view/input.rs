use super::View;
use crate::host::{Host, RenderPass, WindowId};
use crate::layout::{stage_offsets, LayoutCtx, ViewStage};
use crate::utils::scale_around;

impl View {
    /// Whether the pointer is inside the part of the overview that handles pointer events.
    pub fn should_manage_mouse<H: Host>(&self, host: &H) -> bool {
        let Some(monitor) = self.monitor(host) else {
            return false;
        };

        let ctx = LayoutCtx::new(&monitor, &self.options);
        let region = self.layout.interactive_region(&ctx, self.offsets());
        let region = region.to_logical(monitor.scale);

        let pos = host.pointer_position() - monitor.position;
        region.contains(pos)
    }

    /// Scrolls the strip. Returns whether the event was consumed.
    pub fn on_mouse_axis<H: Host>(&mut self, host: &mut H, delta: f64) -> anyhow::Result<bool> {
        if !self.active || self.closing || !self.should_manage_mouse(host) {
            return Ok(false);
        }
        let Some(monitor) = self.monitor(host) else {
            return Ok(false);
        };

        self.refresh_layout(host, ViewStage::Animating)?;

        let options = self.options.clone();
        let ctx = LayoutCtx::new(&monitor, &options);
        let Some(target) =
            self.layout
                .axis_scroll_target(&ctx, self.slots.len(), self.scroll.target(), delta)
        else {
            return Ok(false);
        };

        self.stop_navigation();
        self.scroll.set_target(target);
        host.damage_monitor(self.monitor_id);
        Ok(true)
    }

    /// Handles a pointer button. Returns whether the event was consumed.
    ///
    /// Releasing a dragged window over a slot moves it to that workspace. Otherwise a release
    /// closes the overview onto the clicked workspace, if `exit-on-click` is set.
    pub fn on_mouse_button<H: Host>(
        &mut self,
        host: &mut H,
        pressed: bool,
    ) -> anyhow::Result<bool> {
        if pressed || !self.active || self.closing || !self.should_manage_mouse(host) {
            return Ok(false);
        }

        if let Some(window) = host.dragged_window() {
            return Ok(self.drop_window(host, window));
        }

        if !self.options.exit_on_click {
            return Ok(false);
        }

        self.do_exit_behavior(host, true);
        self.hide(host);
        Ok(true)
    }

    fn drop_window<H: Host>(&mut self, host: &mut H, window: WindowId) -> bool {
        let Some(target) = self.hovered_workspace(host) else {
            return false;
        };
        let Some(geometry) = host.window_geometry(window) else {
            return false;
        };

        if !host.workspace_exists(target) && !host.create_workspace(target, self.monitor_id) {
            warn!("couldn't create workspace {target} on monitor {}", self.monitor_id);
            return false;
        }

        // The preview is drawn scaled around the pointer, so drop it where it was seen.
        let pointer = host.pointer_position();
        let preview = scale_around(geometry, pointer, self.drag_window_scale(host));
        let pos = self.pos_relative_to_workspace(host, preview.loc, target);

        debug!("moving window {window} to workspace {target}");
        host.move_window_to_workspace(window, target, pos);
        host.damage_monitor(self.monitor_id);
        true
    }

    /// Scale of the dragged window preview.
    pub fn drag_window_scale<H: Host>(&self, host: &H) -> f64 {
        let Some(monitor) = self.monitor(host) else {
            return 1.;
        };
        if !self.should_manage_mouse(host) {
            return 1.;
        }

        let ctx = LayoutCtx::new(&monitor, &self.options);
        let offsets = stage_offsets(&*self.layout, &ctx, ViewStage::Opened, self.offsets());
        let slot = self.layout.slot_rect(&ctx, 0, 0, offsets);
        slot.size.w / ctx.size.w
    }

    /// Decides whether the host draws `window` during `pass`.
    ///
    /// `default` is what the host would do without the overview.
    pub fn should_render_window<H: Host>(
        &self,
        host: &H,
        window: WindowId,
        pass: RenderPass,
        default: bool,
    ) -> bool {
        let Some(monitor) = self.monitor(host) else {
            return default;
        };

        // The dragged window is drawn separately, following the pointer.
        if host.dragged_window() == Some(window) {
            return false;
        }

        if pass == RenderPass::Background {
            return default;
        }

        let Some(rect) = self.window_global_rect(host, window) else {
            return false;
        };
        if !rect.overlaps(monitor.logical_box()) {
            return false;
        }

        default
    }
}
