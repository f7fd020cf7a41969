use std::str::FromStr;

use anyhow::bail;

use super::{focus_hovered_window, Transition, View};
use crate::host::{Host, WorkspaceId};
use crate::layout::{LayoutCtx, MoveTransition, ViewStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Offset in slot cells.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => bail!("invalid direction {s:?}, expected up, down, left or right"),
        }
    }
}

/// Full-monitor slide between two workspaces while the overview is closed.
///
/// Driven by the scroll value going from 1 to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSlide {
    pub from: WorkspaceId,
    pub to: WorkspaceId,
    pub dx: i32,
    pub dy: i32,
}

impl View {
    /// Switches to the neighboring slot in `direction`.
    ///
    /// Moving into the pending slot creates its workspace. There's no wraparound: with no slot in
    /// that direction nothing happens.
    pub fn navigate<H: Host>(&mut self, host: &mut H, direction: Direction) -> anyhow::Result<()> {
        if self.closing {
            return Ok(());
        }
        let Some(monitor) = self.monitor(host) else {
            return Ok(());
        };
        let Some(current) = host.active_workspace(self.monitor_id) else {
            debug!("monitor {} has no active workspace", self.monitor_id);
            return Ok(());
        };

        // Navigation works on the settled cells, not on wherever the animation is.
        let slots = self.compute_layout(host, ViewStage::Closed)?;
        let Some(from) = slots.get(current) else {
            debug!("workspace {current} isn't part of the overview");
            return Ok(());
        };

        let (dx, dy) = direction.delta();
        let Some(target) = slots.at_coords(from.column + dx, from.row + dy).copied() else {
            trace!("no slot {direction:?} of workspace {current}");
            return Ok(());
        };

        if !host.workspace_exists(target.id) {
            if !host.create_workspace(target.id, self.monitor_id) {
                warn!(
                    "couldn't create workspace {} on monitor {}",
                    target.id, self.monitor_id
                );
                return Ok(());
            }
            debug!("created workspace {} from the pending slot", target.id);
        }

        host.switch_to(self.monitor_id, target.id);
        focus_hovered_window(host);

        let slots = self.compute_layout(host, ViewStage::Animating)?;
        let Some(target_rect) = slots.get(target.id).map(|slot| slot.rect) else {
            return Ok(());
        };

        let options = self.options.clone();
        let ctx = LayoutCtx::new(&monitor, &options);
        match self.layout.move_transition(&ctx, target_rect, self.offsets()) {
            MoveTransition::Scroll(scroll) => {
                self.scroll.set_target(scroll);
                if !self.active {
                    self.navigating = true;
                    self.nav_slide = None;
                    self.scroll.on_complete(Transition::Navigate);
                }
            }
            MoveTransition::Slide if !self.active => {
                self.navigating = true;
                self.nav_slide = Some(NavSlide {
                    from: current,
                    to: target.id,
                    dx,
                    dy,
                });
                self.scroll.warp(1.);
                self.scroll.set_target(0.);
                self.scroll.on_complete(Transition::Navigate);
            }
            MoveTransition::Slide | MoveTransition::None => {
                if !self.active {
                    self.stop_navigation();
                }
            }
        }

        self.slots = slots;
        host.damage_monitor(self.monitor_id);
        Ok(())
    }

    pub fn nav_slide(&self) -> Option<NavSlide> {
        self.nav_slide
    }
}
