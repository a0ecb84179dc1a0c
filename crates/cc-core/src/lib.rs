//! cc-core - Core library for cellcohort
//!
//! Shared configuration, the typed error taxonomy for configuration and
//! source problems, the ordered population set, subject/sample entities,
//! cohort filters, and the streaming reader for the wide cell-count source.

pub mod cohort;
pub mod config;
pub mod error;
pub mod model;
mod newtype_string;
pub mod population;
pub mod source;

pub use cohort::{CohortFilter, CohortRecord};
pub use config::{ComparisonConfig, Config, Metric, VarianceAssumption, DEFAULT_CONFIG_FILE};
pub use error::{CoreError, CoreResult};
pub use model::{Attribute, Sample, SampleId, Subject, SubjectId};
pub use population::{Population, PopulationSet, DEFAULT_POPULATIONS};
pub use source::{SourceReader, SourceRow, REQUIRED_COLUMNS};
