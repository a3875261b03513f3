//! Pipeline driver: loads the machine listing and catalogs, runs each
//! configured job through classification, merging and partitioning, and
//! writes the resulting menu databases.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod source;

pub use config::{Addition, JobConfig, JobSource, PassConfig, PassKind, PipelineConfig};
pub use error::PipelineError;
pub use output::{OutputDocument, OutputSet, WriteProgress};
pub use pipeline::{Inputs, JobReport, Pipeline, RunSummary};
pub use source::{Listing, ListingSource};
