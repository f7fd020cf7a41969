//! Configuration for the taskview workspace overview.
//!
//! The configuration is a KDL document with a single top-level `overview` node. Every field has a
//! default, so an empty file is a valid config.

#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context, IntoDiagnostic};

pub mod animations;
pub mod appearance;
pub mod overview;
pub mod utils;

pub use crate::animations::{Animation, Animations, Curve};
pub use crate::appearance::Color;
pub use crate::overview::{Grid, LayoutKind, Linear, Overview};
pub use crate::utils::{FloatOrInt, Toggle};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub overview: Overview,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracy_client::span!("Config::load");

        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}
