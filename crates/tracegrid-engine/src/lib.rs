//! Column engine for tracegrid tables.
//!
//! A table is an ordered list of column descriptors. Each descriptor knows how
//! to derive a typed value from a [`Run`], how to order two such values, and
//! how to turn a value into a [`Cell`] view model. Descriptors are immutable
//! configuration; everything row-specific lives in the run itself or, for the
//! aggregated feedback column, in the [`RelatedRuns`] lookup it was built with.
//!
//! Rendering never fails: absent or malformed data produces [`Cell::Empty`].

pub mod analytics;
pub mod cell;
pub mod collaborators;
pub mod columns;
pub mod context;
pub mod enrichment;
pub mod error;
pub mod format;
pub mod palette;
pub mod related;
pub mod table;

pub use analytics::{AnalyticsSink, NoopAnalytics, SessionAnalytics};
pub use cell::{Badge, BadgeColor, BadgeVariant, Cell, FeedbackChip, Glyph, Tone};
pub use collaborators::{
    CompactJsonViewer, MaskRedactor, Navigator, PassthroughRedactor, PayloadViewer, PromptRoutes,
    Redactor,
};
pub use columns::{Column, ColumnMeta, ColumnSpec};
pub use context::RenderContext;
pub use enrichment::{RenderedEnrichment, render_enrichment};
pub use error::{FetchError, TableError};
pub use format::Viewer;
pub use palette::{HashPalette, Palette, SeedColor};
pub use related::{BlockingRelatedRuns, Lookup, RelatedRuns, RelatedRunsSource};
pub use table::{RenderedRow, SortDirection, SortSpec, Table, TableBuilder};

pub use tracegrid_types::Run;
