//! Output renderers for view snapshots
//!
//! Presentation stays here so the filtering and aggregation code only ever
//! deals with data.

use crate::view::ViewSnapshot;

/// Render a snapshot to a string in one specific format
pub trait OutputRenderer {
    fn render(&self, snapshot: &ViewSnapshot<'_>) -> String;
}

pub mod cli;
pub mod json;
pub mod table;

pub use cli::CliRenderer;
pub use json::JsonRenderer;
pub use table::{TableBuilder, TableStyle};
