use anyhow::ensure;
use smithay::utils::{Physical, Point, Rectangle, Size};
use taskview_config::LayoutKind;

use super::{ensure_gap_fits, LayoutCtx, MoveTransition, Offsets, Options, OverviewLayout};

/// A horizontal strip of workspaces along the bottom edge of the monitor.
///
/// The reveal offset is how far the strip has slid up into view, the scroll offset moves it
/// sideways. Slots keep the monitor's aspect ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Linear {
    fn slot_size(ctx: &LayoutCtx) -> Size<f64, Physical> {
        let h = ctx.strip_height() - 2. * ctx.gap();
        let w = h * ctx.size.w / ctx.size.h;
        Size::from((w, h))
    }

    /// Width of the whole strip holding `slot_count` slots.
    fn strip_width(ctx: &LayoutCtx, slot_count: usize) -> f64 {
        let gap = ctx.gap();
        slot_count as f64 * (gap + Self::slot_size(ctx).w) + gap
    }

    fn strip_rect(ctx: &LayoutCtx, offsets: Offsets) -> Rectangle<f64, Physical> {
        Rectangle::new(
            Point::from((0., ctx.size.h - offsets.reveal)),
            Size::from((ctx.size.w, ctx.strip_height())),
        )
    }
}

impl OverviewLayout for Linear {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Linear
    }

    fn name(&self) -> &'static str {
        "linear"
    }

    fn min_workspace_id(&self) -> i64 {
        0
    }

    fn slot_coords(&self, _ctx: &LayoutCtx, index: usize) -> (i32, i32) {
        (index as i32, 0)
    }

    fn validate(&self, ctx: &LayoutCtx) -> anyhow::Result<()> {
        let height = ctx.strip_height();
        ensure!(
            height > 0. && height <= ctx.size.h,
            "linear layout height {height} doesn't fit the monitor height {}",
            ctx.size.h
        );
        ensure_gap_fits(self.name(), ctx.gap(), height)
    }

    fn slot_rect(
        &self,
        ctx: &LayoutCtx,
        column: i32,
        _row: i32,
        offsets: Offsets,
    ) -> Rectangle<f64, Physical> {
        let gap = ctx.gap();
        let size = Self::slot_size(ctx);
        let x = offsets.scroll + f64::from(column) * (gap + size.w) + gap;
        let y = ctx.size.h - offsets.reveal + gap;
        Rectangle::new(Point::from((x, y)), size)
    }

    fn reveal_target(&self, ctx: &LayoutCtx) -> f64 {
        ctx.strip_height()
    }

    fn move_transition(
        &self,
        ctx: &LayoutCtx,
        target: Rectangle<f64, Physical>,
        offsets: Offsets,
    ) -> MoveTransition {
        let gap = ctx.gap();
        let min_x = target.loc.x - gap;
        let max_x = target.loc.x + target.size.w + gap;

        if min_x < 0. {
            MoveTransition::Scroll(offsets.scroll - min_x)
        } else if max_x > ctx.size.w {
            MoveTransition::Scroll(offsets.scroll - (max_x - ctx.size.w))
        } else {
            MoveTransition::None
        }
    }

    fn axis_scroll_target(
        &self,
        ctx: &LayoutCtx,
        slot_count: usize,
        scroll_target: f64,
        delta: f64,
    ) -> Option<f64> {
        let total = Self::strip_width(ctx, slot_count);
        if total < ctx.size.w {
            return Some(0.);
        }

        let mut offset = scroll_target + delta * ctx.options.scroll_speed * -10.;

        // Never past the left end...
        if offset > 0. {
            offset = 0.;
        }

        // ...nor leave empty space on the right.
        let right = offset + total;
        if right < ctx.size.w {
            offset += ctx.size.w - right;
        }

        Some(offset)
    }

    fn interactive_region(&self, ctx: &LayoutCtx, offsets: Offsets) -> Rectangle<f64, Physical> {
        Self::strip_rect(ctx, offsets)
    }

    fn backdrop(&self, ctx: &LayoutCtx, offsets: Offsets) -> Option<Rectangle<f64, Physical>> {
        Some(Self::strip_rect(ctx, offsets))
    }

    fn blur_background(&self, options: &Options) -> bool {
        options.strip_blur
    }
}
