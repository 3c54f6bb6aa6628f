pub mod enrichment;
pub mod error;
pub mod feedback;
mod lenient;
pub mod run;

pub use enrichment::{Enrichment, PiiLevel};
pub use error::{Error, Result};
pub use feedback::{Feedback, Thumbs};
pub use run::{Run, RunStatus, RunUser, parse_runs};
