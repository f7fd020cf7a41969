//! One overview view per monitor, driven as a whole.

use std::rc::Rc;
use std::time::Duration;

use taskview_config::Config;

use crate::animation::Clock;
use crate::host::{Host, MonitorId, RenderPass, WindowId};
use crate::ipc::OverviewStatus;
use crate::layout::Options;
use crate::view::{Direction, View};

#[derive(Debug)]
pub struct Manager {
    views: Vec<View>,
    /// Frame clock shared by every animation of every view.
    clock: Clock,
    options: Rc<Options>,
}

impl Manager {
    pub fn new(clock: Clock, config: &Config) -> Self {
        let options = Rc::new(Options::from_config(config));
        apply_clock_options(&clock, &options);
        Self {
            views: Vec::new(),
            clock,
            options,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn views(&self) -> impl Iterator<Item = &View> + '_ {
        self.views.iter()
    }

    pub fn add_monitor(&mut self, id: MonitorId) {
        if self.view_for_monitor(id).is_some() {
            return;
        }
        debug!("adding overview for monitor {id}");
        self.views
            .push(View::new(id, self.clock.clone(), self.options.clone()));
    }

    pub fn remove_monitor(&mut self, id: MonitorId) {
        debug!("removing overview for monitor {id}");
        self.views.retain(|view| view.monitor_id() != id);
    }

    /// Drops all views and starts over with one closed view per current monitor.
    pub fn reset<H: Host>(&mut self, host: &H) {
        self.views.clear();
        for id in host.monitor_ids() {
            self.add_monitor(id);
        }
    }

    pub fn view_for_monitor(&self, id: MonitorId) -> Option<&View> {
        self.views.iter().find(|view| view.monitor_id() == id)
    }

    pub fn view_for_monitor_mut(&mut self, id: MonitorId) -> Option<&mut View> {
        self.views.iter_mut().find(|view| view.monitor_id() == id)
    }

    /// View of the monitor under the pointer.
    pub fn view_under_cursor<H: Host>(&self, host: &H) -> Option<&View> {
        let id = host.monitor_at(host.pointer_position())?;
        self.view_for_monitor(id)
    }

    fn view_under_cursor_mut<H: Host>(&mut self, host: &H) -> Option<&mut View> {
        let id = host.monitor_at(host.pointer_position())?;
        self.view_for_monitor_mut(id)
    }

    /// Whether any overview is open and not on its way out.
    pub fn is_active(&self) -> bool {
        self.views
            .iter()
            .any(|view| view.is_active() && !view.is_closing())
    }

    /// Opens the overview on every monitor.
    ///
    /// Views that can't be laid out stay closed. The first error is returned after every view
    /// had its try.
    pub fn show_all<H: Host>(&mut self, host: &mut H) -> anyhow::Result<()> {
        let mut res = Ok(());
        for view in &mut self.views {
            if let Err(err) = view.show(host) {
                if res.is_ok() {
                    res = Err(err);
                }
            }
        }
        res
    }

    pub fn hide_all<H: Host>(&mut self, host: &mut H) {
        for view in &mut self.views {
            view.hide(host);
        }
    }

    /// Closes the overview onto each view's exit target if it's open, opens it otherwise.
    pub fn toggle<H: Host>(&mut self, host: &mut H) -> anyhow::Result<()> {
        if !self.is_active() {
            return self.show_all(host);
        }

        for view in &mut self.views {
            if view.is_active() {
                view.do_exit_behavior(host, false);
            }
            view.hide(host);
        }
        Ok(())
    }

    /// Moves the clock to the frame time `now` and settles finished animations.
    pub fn advance_animations(&mut self, now: Duration) {
        self.clock.set_unadjusted(now);
        for view in &mut self.views {
            view.advance_animations();
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.views.iter().any(View::are_animations_ongoing)
    }

    /// Draws the overview of `monitor`. Returns `false` if there's nothing to draw and the host
    /// should render the monitor as usual.
    pub fn render<H: Host>(
        &mut self,
        host: &mut H,
        monitor: MonitorId,
        time: Duration,
    ) -> anyhow::Result<bool> {
        // The drag preview follows the pointer across monitors, at the scale of the one under it.
        let drag_scale = self
            .view_under_cursor(host)
            .map_or(1., |view| view.drag_window_scale(host));

        let Some(view) = self.view_for_monitor_mut(monitor) else {
            return Ok(false);
        };
        if !view.is_visible() {
            return Ok(false);
        }

        view.render(host, time, drag_scale)?;
        Ok(true)
    }

    /// Navigates on the monitor under the pointer.
    pub fn navigate<H: Host>(&mut self, host: &mut H, direction: Direction) -> anyhow::Result<()> {
        match self.view_under_cursor_mut(host) {
            Some(view) => view.navigate(host, direction),
            None => {
                debug!("no overview under the pointer to navigate");
                Ok(())
            }
        }
    }

    pub fn on_mouse_axis<H: Host>(&mut self, host: &mut H, delta: f64) -> anyhow::Result<bool> {
        match self.view_under_cursor_mut(host) {
            Some(view) => view.on_mouse_axis(host, delta),
            None => Ok(false),
        }
    }

    pub fn on_mouse_button<H: Host>(
        &mut self,
        host: &mut H,
        pressed: bool,
    ) -> anyhow::Result<bool> {
        match self.view_under_cursor_mut(host) {
            Some(view) => view.on_mouse_button(host, pressed),
            None => Ok(false),
        }
    }

    pub fn should_render_window<H: Host>(
        &self,
        host: &H,
        monitor: MonitorId,
        window: WindowId,
        pass: RenderPass,
        default: bool,
    ) -> bool {
        match self.view_for_monitor(monitor) {
            Some(view) if view.is_visible() => {
                view.should_render_window(host, window, pass, default)
            }
            _ => default,
        }
    }

    pub fn update_config<H: Host>(&mut self, host: &H, config: &Config) {
        let options = Rc::new(Options::from_config(config));
        if options == self.options {
            return;
        }

        apply_clock_options(&self.clock, &options);
        for view in &mut self.views {
            view.update_config(host, options.clone());
        }
        self.options = options;
    }

    pub fn status(&self) -> Vec<OverviewStatus> {
        self.views.iter().map(OverviewStatus::from).collect()
    }
}

fn apply_clock_options(clock: &Clock, options: &Options) {
    let anims = &options.animations;
    let rate = 1.0 / anims.slowdown.0.max(0.001);
    clock.set_rate(rate);
    clock.set_complete_instantly(anims.off);
}

#[cfg(test)]
mod tests {
    use smithay::utils::{Point, Size, Transform};

    use super::*;
    use crate::headless::HeadlessHost;
    use crate::host::{WorkspaceId, Workspaces};
    use crate::layout::ViewStage;
    use crate::utils::center_of;

    fn host() -> HeadlessHost {
        let mut host = HeadlessHost::new();
        for (i, x) in [0., 1920.].into_iter().enumerate() {
            let id = MonitorId(i as u64 + 1);
            host.add_monitor(
                id,
                Point::from((x, 0.)),
                Size::from((1920., 1080.)),
                1.,
                Transform::Normal,
            );
        }
        host.add_workspace(WorkspaceId(1), MonitorId(1));
        host.add_workspace(WorkspaceId(2), MonitorId(1));
        host.add_workspace(WorkspaceId(5), MonitorId(2));
        host
    }

    fn config(text: &str) -> Config {
        Config::parse("test.kdl", text).unwrap()
    }

    fn manager(host: &HeadlessHost, text: &str) -> Manager {
        let mut manager = Manager::new(Clock::with_time(Duration::ZERO), &config(text));
        manager.reset(host);
        manager
    }

    #[test]
    fn reset_creates_view_per_monitor() {
        let mut host = host();
        let mut manager = manager(&host, "");
        assert_eq!(manager.views().count(), 2);

        manager.add_monitor(MonitorId(1));
        assert_eq!(manager.views().count(), 2);

        host.remove_monitor(MonitorId(2));
        manager.remove_monitor(MonitorId(2));
        assert!(manager.view_for_monitor(MonitorId(2)).is_none());

        manager.reset(&host);
        assert_eq!(manager.views().count(), 1);
    }

    #[test]
    fn toggle_opens_and_closes_everything() {
        let mut host = host();
        let mut manager = manager(&host, "");

        manager.toggle(&mut host).unwrap();
        assert!(manager.is_active());
        assert!(manager.views().all(View::is_active));

        manager.toggle(&mut host).unwrap();
        assert!(!manager.is_active());
        assert!(manager.views().all(View::is_closing));

        manager.advance_animations(Duration::from_secs(2));
        assert!(manager.views().all(|view| !view.is_active()));
        assert!(!manager.are_animations_ongoing());
    }

    #[test]
    fn toggle_lands_on_hovered_workspace() {
        let mut host = host();
        let mut manager = manager(
            &host,
            r#"
overview {
    exit-behavior "hovered" "interacted"
}
"#,
        );

        manager.show_all(&mut host).unwrap();
        manager.advance_animations(Duration::from_secs(1));
        let view = manager.view_for_monitor_mut(MonitorId(1)).unwrap();
        view.refresh_layout(&host, ViewStage::Animating).unwrap();
        let center = center_of(view.workspace_global_rect(&host, WorkspaceId(2)).unwrap());
        host.set_pointer(center);

        manager.toggle(&mut host).unwrap();
        assert_eq!(host.active_workspace(MonitorId(1)), Some(WorkspaceId(2)));
        assert_eq!(host.active_workspace(MonitorId(2)), Some(WorkspaceId(5)));
    }

    #[test]
    fn show_all_reports_broken_layout() {
        let mut host = host();
        let mut manager = manager(
            &host,
            r#"
overview {
    layout "linear"
    linear {
        height 5000
    }
}
"#,
        );

        assert!(manager.show_all(&mut host).is_err());
        assert!(!manager.is_active());
    }

    #[test]
    fn render_only_for_visible_views() {
        let mut host = host();
        let mut manager = manager(&host, "");

        assert!(!manager.render(&mut host, MonitorId(1), Duration::ZERO).unwrap());
        assert!(host.draw_calls().is_empty());

        manager.show_all(&mut host).unwrap();
        assert!(manager.render(&mut host, MonitorId(1), Duration::ZERO).unwrap());
        assert!(!host.draw_calls().is_empty());
        assert!(!manager.render(&mut host, MonitorId(9), Duration::ZERO).unwrap());
    }

    #[test]
    fn input_goes_to_monitor_under_pointer() {
        let mut host = host();
        let mut manager = manager(&host, "");

        host.set_pointer(Point::from((2000., 10.)));
        manager.navigate(&mut host, Direction::Right).unwrap();
        assert_eq!(host.active_workspace(MonitorId(1)), Some(WorkspaceId(1)));
        // Monitor 2 has a single workspace, so right of it is the pending slot.
        assert_eq!(host.active_workspace(MonitorId(2)), Some(WorkspaceId(6)));
        assert!(manager.view_for_monitor(MonitorId(2)).unwrap().is_navigating());

        host.set_pointer(Point::from((-10., -10.)));
        manager.navigate(&mut host, Direction::Left).unwrap();
        assert!(!manager.on_mouse_button(&mut host, false).unwrap());
    }

    #[test]
    fn slowdown_and_off_reach_the_clock() {
        let host = host();
        let mut manager = manager(
            &host,
            r#"
overview {
    animations {
        slowdown 2.0
    }
}
"#,
        );
        assert_eq!(manager.clock().rate(), 0.5);
        assert!(!manager.clock().should_complete_instantly());

        let off = config(
            r#"
overview {
    animations {
        off
    }
}
"#,
        );
        manager.update_config(&host, &off);
        assert_eq!(manager.clock().rate(), 1.);
        assert!(manager.clock().should_complete_instantly());
    }

    #[test]
    fn update_config_reaches_views() {
        let host = host();
        let mut manager = manager(&host, "");
        assert!(manager.views().all(|view| view.layout_name() == "grid"));

        let linear = config(
            r#"
overview {
    layout "linear"
}
"#,
        );
        manager.update_config(&host, &linear);
        assert!(manager.views().all(|view| view.layout_name() == "linear"));

        let status = manager.status();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].layout, "linear");
    }

    #[test]
    fn window_filter_defaults_when_hidden() {
        let host = host();
        let manager = manager(&host, "");
        let window = WindowId(1);
        let mon = MonitorId(1);
        assert!(manager.should_render_window(&host, mon, window, RenderPass::Slot, true));
        assert!(!manager.should_render_window(&host, mon, window, RenderPass::Slot, false));
    }
}
