//! Serializable overview state for IPC replies.

use serde::{Deserialize, Serialize};

use crate::layout::WorkspaceSlot;
use crate::view::View;

/// State of the overview on one monitor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverviewStatus {
    pub monitor: u64,
    pub active: bool,
    pub closing: bool,
    pub navigating: bool,
    /// Name of the layout variant, `grid` or `linear`.
    pub layout: String,
    /// Slots as of the last layout computation, ordered by workspace id.
    pub slots: Vec<SlotStatus>,
}

/// One slot, with its rectangle in transformed monitor pixels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlotStatus {
    pub workspace: i64,
    pub column: i32,
    pub row: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Whether the workspace doesn't exist yet.
    pub pending: bool,
}

impl From<&WorkspaceSlot> for SlotStatus {
    fn from(slot: &WorkspaceSlot) -> Self {
        Self {
            workspace: slot.id.0,
            column: slot.column,
            row: slot.row,
            x: slot.rect.loc.x,
            y: slot.rect.loc.y,
            width: slot.rect.size.w,
            height: slot.rect.size.h,
            pending: slot.pending,
        }
    }
}

impl From<&View> for OverviewStatus {
    fn from(view: &View) -> Self {
        Self {
            monitor: view.monitor_id().0,
            active: view.is_active(),
            closing: view.is_closing(),
            navigating: view.is_navigating(),
            layout: view.layout_name().to_owned(),
            slots: view.slots().iter().map(SlotStatus::from).collect(),
        }
    }
}
