use anyhow::ensure;
use smithay::utils::{Physical, Point, Rectangle, Size};
use taskview_config::LayoutKind;

use super::{ensure_gap_fits, LayoutCtx, MoveTransition, Offsets, Options, OverviewLayout};
use crate::utils::lerp;

/// All workspaces at once, `grid_rows` cells per row.
///
/// The grid doesn't move with the reveal or scroll offsets: every slot is visible as soon as the
/// overview is open. Opening zooms out of the active slot instead, see
/// [`OverviewLayout::presentation_rect`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Grid;

impl Grid {
    fn cell_size(ctx: &LayoutCtx) -> Size<f64, Physical> {
        let rows = f64::from(ctx.options.grid_rows);
        let gap = ctx.gap();
        Size::from((
            (ctx.size.w - gap * (rows + 1.)) / rows,
            (ctx.size.h - gap * (rows + 1.)) / rows,
        ))
    }
}

impl OverviewLayout for Grid {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Grid
    }

    fn name(&self) -> &'static str {
        "grid"
    }

    // Workspace 0 and below are special and never placed.
    fn min_workspace_id(&self) -> i64 {
        1
    }

    fn slot_coords(&self, ctx: &LayoutCtx, index: usize) -> (i32, i32) {
        let rows = ctx.options.grid_rows.max(1) as usize;
        ((index % rows) as i32, (index / rows) as i32)
    }

    fn validate(&self, ctx: &LayoutCtx) -> anyhow::Result<()> {
        ensure!(ctx.options.grid_rows >= 1, "grid rows must be at least 1");
        ensure_gap_fits(self.name(), ctx.gap(), ctx.size.h)?;

        let cell = Self::cell_size(ctx);
        ensure!(
            cell.w > 0. && cell.h > 0.,
            "gap-size {} leaves no room for {} grid rows on a {}x{} monitor",
            ctx.gap(),
            ctx.options.grid_rows,
            ctx.size.w,
            ctx.size.h
        );
        Ok(())
    }

    fn slot_rect(
        &self,
        ctx: &LayoutCtx,
        column: i32,
        row: i32,
        _offsets: Offsets,
    ) -> Rectangle<f64, Physical> {
        let gap = ctx.gap();
        let cell = Self::cell_size(ctx);
        let x = gap + f64::from(column) * (cell.w + gap);
        let y = gap + f64::from(row) * (cell.h + gap);
        Rectangle::new(Point::from((x, y)), cell)
    }

    fn reveal_target(&self, _ctx: &LayoutCtx) -> f64 {
        1.
    }

    fn move_transition(
        &self,
        _ctx: &LayoutCtx,
        _target: Rectangle<f64, Physical>,
        _offsets: Offsets,
    ) -> MoveTransition {
        MoveTransition::Slide
    }

    fn axis_scroll_target(
        &self,
        _ctx: &LayoutCtx,
        _slot_count: usize,
        _scroll_target: f64,
        _delta: f64,
    ) -> Option<f64> {
        None
    }

    fn interactive_region(&self, ctx: &LayoutCtx, _offsets: Offsets) -> Rectangle<f64, Physical> {
        ctx.monitor_rect()
    }

    fn backdrop(&self, _ctx: &LayoutCtx, _offsets: Offsets) -> Option<Rectangle<f64, Physical>> {
        None
    }

    fn blur_background(&self, _options: &Options) -> bool {
        true
    }

    fn presentation_rect(
        &self,
        ctx: &LayoutCtx,
        rect: Rectangle<f64, Physical>,
        focus: Rectangle<f64, Physical>,
        offsets: Offsets,
    ) -> Rectangle<f64, Physical> {
        if focus.size.w <= 0. {
            return rect;
        }

        // At progress 0 the focused slot covers the monitor, at 1 the grid is at rest.
        let progress = offsets.reveal.clamp(0., 1.);
        let zoom = ctx.size.w / focus.size.w;
        let scale = lerp(zoom, 1., progress);
        let dx = lerp(-focus.loc.x * zoom, 0., progress);
        let dy = lerp(-focus.loc.y * zoom, 0., progress);

        Rectangle::new(
            Point::from((rect.loc.x * scale + dx, rect.loc.y * scale + dy)),
            Size::from((rect.size.w * scale, rect.size.h * scale)),
        )
    }
}
