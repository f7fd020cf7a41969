//! Placement of a monitor's workspaces into overview slots.
//!
//! A layout turns the set of workspaces on a monitor into a [`SlotMap`]: every workspace gets a
//! `(column, row)` cell and a rectangle in the monitor's transformed pixel space. The placement
//! rule is the workspace's position in ascending id order, nothing else. One extra *pending* slot
//! is appended after the highest id to offer room for a new workspace, unless the ids ran out.
//!
//! Two variants exist:
//!
//! - [`Grid`]: every workspace at once in a grid with a fixed number of cells per row.
//! - [`Linear`]: a horizontal strip that slides in from the bottom edge and scrolls sideways.
//!
//! Both variants are stateless. The animated reveal and scroll offsets live in the view, which
//! hands a snapshot of them to [`compute_slots`].

use std::collections::BTreeMap;

use anyhow::ensure;
use smithay::utils::{Physical, Point, Rectangle, Size};
use taskview_config::{Animations, Color, Config, LayoutKind};

use crate::host::{MonitorSnapshot, WorkspaceId};

mod grid;
mod linear;

pub use self::grid::Grid;
pub use self::linear::Linear;


/// Options for the overview, resolved from the config.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub layout: LayoutKind,
    /// Gap around slots in logical pixels.
    pub gap_size: f64,
    pub border_size: f64,
    pub bg_color: Color,
    pub active_border_color: Color,
    pub inactive_border_color: Color,
    pub exit_behavior: Vec<String>,
    pub exit_on_click: bool,
    pub grid_rows: u32,
    /// Height of the linear strip in logical pixels.
    pub strip_height: f64,
    pub scroll_speed: f64,
    pub strip_blur: bool,
    pub animations: Animations,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let overview = &config.overview;
        Self {
            layout: overview.layout,
            gap_size: overview.gap_size.0,
            border_size: overview.border_size.0,
            bg_color: overview.bg_color,
            active_border_color: overview.active_border_color,
            inactive_border_color: overview.inactive_border_color,
            exit_behavior: overview.exit_behavior.clone(),
            exit_on_click: overview.exit_on_click.0,
            grid_rows: overview.grid.rows,
            strip_height: overview.linear.height.0,
            scroll_speed: overview.linear.scroll_speed.0,
            strip_blur: overview.linear.blur.0,
            animations: overview.animations,
        }
    }
}

/// Discrete phase of the open/close animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStage {
    /// Settled closed geometry. Live animated values are ignored.
    Closed,
    /// Geometry at the current animated values.
    Animating,
    /// Settled open geometry.
    Opened,
}

/// Snapshot of the animated values a layout reads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offsets {
    /// How far the overview has slid into view.
    pub reveal: f64,
    /// Horizontal strip scroll.
    pub scroll: f64,
}

/// Monitor geometry and options a layout computes against.
#[derive(Debug, Clone, Copy)]
pub struct LayoutCtx<'a> {
    /// Monitor size after the output transform.
    pub size: Size<f64, Physical>,
    pub scale: f64,
    pub options: &'a Options,
}

impl<'a> LayoutCtx<'a> {
    pub fn new(monitor: &MonitorSnapshot, options: &'a Options) -> Self {
        Self {
            size: monitor.transformed_size(),
            scale: monitor.scale,
            options,
        }
    }

    /// Gap size in pixels.
    pub fn gap(&self) -> f64 {
        self.options.gap_size * self.scale
    }

    /// Linear strip height in pixels.
    pub fn strip_height(&self) -> f64 {
        self.options.strip_height * self.scale
    }

    pub fn monitor_rect(&self) -> Rectangle<f64, Physical> {
        Rectangle::new(Point::from((0., 0.)), self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkspaceSlot {
    pub id: WorkspaceId,
    pub column: i32,
    pub row: i32,
    /// Monitor-local, in transformed pixels.
    pub rect: Rectangle<f64, Physical>,
    /// Whether this is the synthetic slot for a workspace that doesn't exist yet.
    pub pending: bool,
}

/// What a move between two slots looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveTransition {
    /// Scroll the strip to the given offset.
    Scroll(f64),
    /// Slide the old workspace out and the new one in, when the overview is closed.
    Slide,
    /// The target is already in view.
    None,
}

/// Geometry of one overview variant.
pub trait OverviewLayout: std::fmt::Debug {
    fn kind(&self) -> LayoutKind;

    fn name(&self) -> &'static str;

    /// Lowest workspace id that takes part in the layout.
    fn min_workspace_id(&self) -> i64;

    /// Cell of the slot at position `index` in ascending id order.
    fn slot_coords(&self, ctx: &LayoutCtx, index: usize) -> (i32, i32);

    /// Checks the options against the monitor.
    ///
    /// Failing here is a configuration error: the layout can't be computed at all.
    fn validate(&self, ctx: &LayoutCtx) -> anyhow::Result<()>;

    fn slot_rect(
        &self,
        ctx: &LayoutCtx,
        column: i32,
        row: i32,
        offsets: Offsets,
    ) -> Rectangle<f64, Physical>;

    /// Reveal offset of the settled open overview.
    fn reveal_target(&self, ctx: &LayoutCtx) -> f64;

    /// How to bring `target` into view, given its rectangle at the current animated values.
    fn move_transition(
        &self,
        ctx: &LayoutCtx,
        target: Rectangle<f64, Physical>,
        offsets: Offsets,
    ) -> MoveTransition;

    /// New scroll target after a pointer axis event, or `None` if the layout doesn't scroll.
    fn axis_scroll_target(
        &self,
        ctx: &LayoutCtx,
        slot_count: usize,
        scroll_target: f64,
        delta: f64,
    ) -> Option<f64>;

    /// Area handling pointer events, in transformed pixels.
    fn interactive_region(&self, ctx: &LayoutCtx, offsets: Offsets) -> Rectangle<f64, Physical>;

    /// Area filled with the background color behind the slots, if any.
    fn backdrop(&self, ctx: &LayoutCtx, offsets: Offsets) -> Option<Rectangle<f64, Physical>>;

    /// Whether to blur the background workspace.
    fn blur_background(&self, options: &Options) -> bool;

    /// Adjusts a slot rectangle for drawing while the overview opens or closes.
    ///
    /// `focus` is the rectangle of the active workspace.
    fn presentation_rect(
        &self,
        _ctx: &LayoutCtx,
        rect: Rectangle<f64, Physical>,
        _focus: Rectangle<f64, Physical>,
        _offsets: Offsets,
    ) -> Rectangle<f64, Physical> {
        rect
    }
}

pub fn make_layout(kind: LayoutKind) -> Box<dyn OverviewLayout> {
    match kind {
        LayoutKind::Grid => Box::new(Grid),
        LayoutKind::Linear => Box::new(Linear),
    }
}

/// Id of the pending slot: the smallest id above every placed workspace that nothing uses yet.
///
/// `ids` must be sorted. With no workspaces at all, the search starts at `floor`. Returns `None`
/// when the ids run out.
pub fn pending_workspace_id(
    ids: &[WorkspaceId],
    floor: i64,
    exists: impl Fn(WorkspaceId) -> bool,
) -> Option<WorkspaceId> {
    let mut id = match ids.last() {
        Some(last) => last.0.checked_add(1)?,
        None => floor,
    };
    while exists(WorkspaceId(id)) {
        id = id.checked_add(1)?;
    }
    Some(WorkspaceId(id))
}

/// Resolves the animated values the layout sees at `stage`.
pub fn stage_offsets(
    layout: &dyn OverviewLayout,
    ctx: &LayoutCtx,
    stage: ViewStage,
    live: Offsets,
) -> Offsets {
    match stage {
        ViewStage::Closed => Offsets::default(),
        ViewStage::Animating => live,
        ViewStage::Opened => Offsets {
            reveal: layout.reveal_target(ctx),
            scroll: live.scroll,
        },
    }
}

/// Builds a fresh slot map for the workspaces of one monitor.
///
/// `workspaces` lists the monitor's workspaces in any order; `exists` tells whether an id is in
/// use anywhere, on any monitor.
pub fn compute_slots(
    layout: &dyn OverviewLayout,
    ctx: &LayoutCtx,
    stage: ViewStage,
    live: Offsets,
    workspaces: impl IntoIterator<Item = WorkspaceId>,
    exists: impl Fn(WorkspaceId) -> bool,
) -> anyhow::Result<SlotMap> {
    let _span = tracy_client::span!("compute_slots");

    layout.validate(ctx)?;

    let floor = layout.min_workspace_id();
    let mut ids: Vec<_> = workspaces.into_iter().filter(|id| id.0 >= floor).collect();
    ids.sort_unstable();
    ids.dedup();

    let pending = pending_workspace_id(&ids, floor, exists);
    match pending {
        Some(id) => ids.push(id),
        None => warn!("no workspace id left for the pending slot"),
    }

    let offsets = stage_offsets(layout, ctx, stage, live);

    let slots = ids
        .into_iter()
        .enumerate()
        .map(|(index, id)| {
            let (column, row) = layout.slot_coords(ctx, index);
            let slot = WorkspaceSlot {
                id,
                column,
                row,
                rect: layout.slot_rect(ctx, column, row, offsets),
                pending: Some(id) == pending,
            };
            (id, slot)
        })
        .collect();

    Ok(SlotMap { slots })
}

/// Workspace slots keyed by workspace id.
///
/// Always replaced as a whole, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotMap {
    slots: BTreeMap<WorkspaceId, WorkspaceSlot>,
}

impl SlotMap {
    pub fn get(&self, id: WorkspaceId) -> Option<&WorkspaceSlot> {
        self.slots.get(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkspaceSlot> + '_ {
        self.slots.values()
    }

    pub fn pending(&self) -> Option<&WorkspaceSlot> {
        self.iter().find(|slot| slot.pending)
    }

    pub fn at_coords(&self, column: i32, row: i32) -> Option<&WorkspaceSlot> {
        self.iter()
            .find(|slot| slot.column == column && slot.row == row)
    }

    /// Slot containing a monitor-local point.
    pub fn slot_at(&self, pos: Point<f64, Physical>) -> Option<&WorkspaceSlot> {
        self.iter().find(|slot| slot.rect.contains(pos))
    }
}

/// Shared validation of the gap against a reference height.
fn ensure_gap_fits(layout: &str, gap: f64, height: f64) -> anyhow::Result<()> {
    ensure!(
        (0. ..=height / 2.).contains(&gap),
        "invalid gap-size {gap} for the {layout} layout: must be between 0 and {}",
        height / 2.
    );
    Ok(())
}
