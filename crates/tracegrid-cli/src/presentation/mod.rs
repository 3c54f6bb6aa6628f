//! Presentation layer.
//!
//! Handlers build a [`TableViewModel`] from engine output; console and JSON
//! views turn it into text, and the TUI draws it with ratatui. Mapping from
//! semantic [`Tone`](tracegrid_engine::Tone) to terminal colours happens in
//! the views only.

pub mod console;
pub mod tui;
pub mod view_models;

pub use console::{ColumnListView, ConsoleTableView};
pub use view_models::{ColumnListEntry, TableViewModel};
