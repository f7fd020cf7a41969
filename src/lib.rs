//! Workspace overview for tiling compositors.
//!
//! Lays a monitor's workspaces out as a zoomed-out grid or a scrollable strip, animates opening,
//! closing and navigation, and maps pointer input back onto workspaces. The compositor side is
//! abstracted behind the traits in [`host`].

#[macro_use]
extern crate tracing;

pub mod animated_scalar;
pub mod animation;
pub mod headless;
pub mod host;
pub mod ipc;
pub mod layout;
pub mod manager;
pub mod utils;
pub mod view;
