//! Testing infrastructure for tracegrid unit and integration tests.
//!
//! This crate provides:
//! - `RunBuilder`: fluent construction of run rows
//! - `doubles`: stand-ins for the engine's collaborators (related-runs
//!   sources, analytics sinks)
//! - `fixtures`: a fixed clock and sample conversations
//! - `TestWorld`: isolated temp directory for driving the CLI

pub mod builders;
pub mod doubles;
pub mod fixtures;
pub mod world;

pub use builders::RunBuilder;
pub use doubles::{FixedLookup, RecordingAnalytics, StubSource};
pub use world::{CliResult, TestWorld};
