//! Error types for cc-analysis
//!
//! Conditions the analysis recovers from (an empty cohort, a group with too
//! few observations, a zero-variance comparison) are reported as values in
//! the results, not as errors. Only structural problems and output failures
//! end up here.

use thiserror::Error;

/// Analysis error type
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// AE001: A record's counts do not line up with the population set
    #[error("[AE001] Sample '{sample_id}' has {found} counts but {expected} populations are configured")]
    CountMismatch {
        sample_id: String,
        expected: usize,
        found: usize,
    },

    /// AE002: JSON rendering failed
    #[error("[AE002] Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// AE003: CSV export failed
    #[error("[AE003] Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// AE004: Writing a report failed
    #[error("[AE004] Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AnalysisError
pub type AnalysisResult<T> = Result<T, AnalysisError>;
