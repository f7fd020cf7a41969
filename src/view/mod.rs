//! The overview of a single monitor.
//!
//! A [`View`] owns the animated values of its monitor's overview and sequences them through the
//! open, close and navigation transitions:
//!
//! ```text
//! Closed --show--> Opening --> Open --hide--> Closing --> Closed
//! Closed --navigate--> Navigating --> Closed
//! ```
//!
//! Opening and Open are both `active`; Closing is `active` and `closing` until the reveal animation
//! completes. Navigating is only entered while the overview itself is closed.
//!
//! Everything the view knows about monitors and workspaces comes from the [`Host`] on every call.
//! When the monitor is gone, operations do nothing.

use std::rc::Rc;

use taskview_config::LayoutKind;

use crate::animated_scalar::AnimatedScalar;
use crate::animation::Clock;
use crate::host::{Host, MonitorId, MonitorSnapshot, WorkspaceId};
use crate::layout::{
    compute_slots, make_layout, LayoutCtx, Offsets, Options, OverviewLayout, SlotMap, ViewStage,
};
use crate::utils::lerp;

mod exit;
mod input;
mod navigation;
mod render;

pub use self::exit::ExitBehavior;
pub use self::navigation::{Direction, NavSlide};
pub use self::render::ActiveWorkspaceOverride;

#[cfg(test)]
mod tests;

const OPEN_BLUR: f64 = 2.;
const OPEN_DIM: f64 = 0.4;

/// Cursor shown while the overview is open.
const CURSOR: &str = "left_ptr";

/// Transitions whose end changes the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The overview finished closing.
    Hide,
    /// A navigation with the overview closed finished.
    Navigate,
}

#[derive(Debug)]
pub struct View {
    monitor_id: MonitorId,
    active: bool,
    closing: bool,
    navigating: bool,
    /// Workspace that was active when the overview opened.
    ///
    /// Only an id: the workspace may be destroyed while the overview is open.
    origin_workspace: Option<WorkspaceId>,
    layout: Box<dyn OverviewLayout>,
    scroll: AnimatedScalar<Transition>,
    reveal: AnimatedScalar<Transition>,
    blur: AnimatedScalar<Transition>,
    dim: AnimatedScalar<Transition>,
    /// Slots as of the last layout computation.
    slots: SlotMap,
    nav_slide: Option<NavSlide>,
    clock: Clock,
    options: Rc<Options>,
    /// Last configuration error, so that it's only logged once.
    config_error: Option<String>,
}

impl View {
    pub fn new(monitor_id: MonitorId, clock: Clock, options: Rc<Options>) -> Self {
        let anims = options.animations;
        Self {
            monitor_id,
            active: false,
            closing: false,
            navigating: false,
            origin_workspace: None,
            layout: make_layout(options.layout),
            scroll: AnimatedScalar::new(clock.clone(), 0., anims.scroll),
            reveal: AnimatedScalar::new(clock.clone(), 0., anims.reveal),
            blur: AnimatedScalar::new(clock.clone(), 0., anims.blur),
            dim: AnimatedScalar::new(clock.clone(), 0., anims.dim),
            slots: SlotMap::default(),
            nav_slide: None,
            clock,
            options,
            config_error: None,
        }
    }

    pub fn monitor_id(&self) -> MonitorId {
        self.monitor_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// Whether the view draws anything over the regular monitor contents.
    pub fn is_visible(&self) -> bool {
        self.active || self.navigating
    }

    pub fn origin_workspace(&self) -> Option<WorkspaceId> {
        self.origin_workspace
    }

    pub fn layout_kind(&self) -> LayoutKind {
        self.layout.kind()
    }

    pub fn layout_name(&self) -> &'static str {
        self.layout.name()
    }

    /// Slots as of the last layout computation.
    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current animated values.
    pub fn offsets(&self) -> Offsets {
        Offsets {
            reveal: self.reveal.value(),
            scroll: self.scroll.value(),
        }
    }

    pub fn blur_strength(&self) -> f64 {
        self.blur.value()
    }

    pub fn dim_opacity(&self) -> f64 {
        self.dim.value()
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.scroll.is_animation_ongoing()
            || self.reveal.is_animation_ongoing()
            || self.blur.is_animation_ongoing()
            || self.dim.is_animation_ongoing()
    }

    pub(crate) fn monitor<H: Host>(&self, host: &H) -> Option<MonitorSnapshot> {
        let monitor = host.monitor(self.monitor_id);
        if monitor.is_none() {
            trace!("monitor {} is gone", self.monitor_id);
        }
        monitor
    }

    /// Computes the slots at `stage` without publishing them.
    ///
    /// Returns an empty map when the monitor is gone.
    pub fn compute_layout<H: Host>(
        &mut self,
        host: &H,
        stage: ViewStage,
    ) -> anyhow::Result<SlotMap> {
        let Some(monitor) = self.monitor(host) else {
            return Ok(SlotMap::default());
        };

        let options = self.options.clone();
        let ctx = LayoutCtx::new(&monitor, &options);
        let res = compute_slots(
            &*self.layout,
            &ctx,
            stage,
            self.offsets(),
            host.workspaces_on(self.monitor_id),
            |id| host.workspace_exists(id),
        );
        self.report_config_error(res)
    }

    /// Recomputes the slots at `stage` and publishes them.
    pub fn refresh_layout<H: Host>(&mut self, host: &H, stage: ViewStage) -> anyhow::Result<()> {
        let slots = self.compute_layout(host, stage)?;
        self.slots = slots;
        Ok(())
    }

    fn report_config_error<T>(&mut self, res: anyhow::Result<T>) -> anyhow::Result<T> {
        match &res {
            Ok(_) => self.config_error = None,
            Err(err) => {
                let message = format!("{err:#}");
                if self.config_error.as_deref() != Some(message.as_str()) {
                    error!(
                        "overview on monitor {} can't be laid out: {message}",
                        self.monitor_id
                    );
                    self.config_error = Some(message);
                }
            }
        }
        res
    }

    /// Reveal offset of the settled open overview on `monitor`.
    fn open_reveal(&self, monitor: &MonitorSnapshot) -> f64 {
        let ctx = LayoutCtx::new(monitor, &self.options);
        self.layout.reveal_target(&ctx)
    }

    pub fn show<H: Host>(&mut self, host: &mut H) -> anyhow::Result<()> {
        if self.active {
            return Ok(());
        }
        let Some(monitor) = self.monitor(host) else {
            return Ok(());
        };

        // Fail on a broken config before touching any state.
        let slots = self.compute_layout(host, ViewStage::Animating)?;

        debug!("showing overview on monitor {}", self.monitor_id);
        self.active = true;
        self.origin_workspace = host.active_workspace(self.monitor_id);
        self.stop_navigation();

        let reveal = self.open_reveal(&monitor);
        self.reveal.set_target(reveal);
        self.blur.set_target(OPEN_BLUR);
        self.dim.set_target(OPEN_DIM);

        self.slots = slots;

        host.set_cursor_override(CURSOR);
        host.damage_monitor(self.monitor_id);
        Ok(())
    }

    pub fn hide<H: Host>(&mut self, host: &mut H) {
        if self.closing || !self.active {
            return;
        }
        if self.monitor(host).is_none() {
            return;
        }

        debug!("hiding overview on monitor {}", self.monitor_id);
        self.closing = true;
        self.origin_workspace = None;

        self.reveal.set_target(0.);
        self.blur.set_target(0.);
        self.dim.set_target(0.);
        self.reveal.on_complete(Transition::Hide);

        focus_hovered_window(host);
        host.unset_cursor_override();
        host.damage_monitor(self.monitor_id);
    }

    /// Settles finished animations and applies their completion handlers.
    ///
    /// The shared clock must already be at the frame time.
    pub fn advance_animations(&mut self) {
        let finished = [
            self.scroll.advance(),
            self.reveal.advance(),
            self.blur.advance(),
            self.dim.advance(),
        ];

        for transition in finished.into_iter().flatten() {
            match transition {
                Transition::Hide => {
                    trace!("overview on monitor {} closed", self.monitor_id);
                    self.active = false;
                    self.closing = false;
                }
                Transition::Navigate => {
                    self.navigating = false;
                    self.nav_slide = None;
                }
            }
        }
    }

    /// Puts the overview at `perc` of the way from closed to open, for gesture tracking.
    pub fn close_open_lerp<H: Host>(&mut self, host: &H, perc: f64) {
        if self.closing {
            return;
        }
        let Some(monitor) = self.monitor(host) else {
            return;
        };

        let open = self.open_reveal(&monitor);
        self.reveal.warp(lerp(0., open, perc));
        self.blur.warp(lerp(0., OPEN_BLUR, perc));
        self.dim.warp(lerp(0., OPEN_DIM, perc));
    }

    pub fn update_config<H: Host>(&mut self, host: &H, options: Rc<Options>) {
        if options.layout != self.layout.kind() {
            debug!(
                "switching overview on monitor {} to the {:?} layout",
                self.monitor_id, options.layout
            );
            self.layout = make_layout(options.layout);
            self.scroll.warp(0.);
            self.stop_navigation();
        }

        let anims = options.animations;
        self.scroll.update_config(anims.scroll);
        self.reveal.update_config(anims.reveal);
        self.blur.update_config(anims.blur);
        self.dim.update_config(anims.dim);

        self.options = options;
        self.config_error = None;

        if self.active && !self.closing {
            if let Some(monitor) = self.monitor(host) {
                let reveal = self.open_reveal(&monitor);
                self.reveal.set_target(reveal);
            }
        }
    }

    fn stop_navigation(&mut self) {
        self.navigating = false;
        self.nav_slide = None;
        self.scroll.clear_on_complete();
    }
}

fn focus_hovered_window<H: Host>(host: &mut H) {
    let pos = host.pointer_position();
    if let Some(window) = host.window_under(pos) {
        host.focus_window(window);
    }
}
