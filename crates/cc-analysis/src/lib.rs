//! cc-analysis: cohort reshape, two-group comparison, and aggregation
//!
//! This crate turns fetched cohort records into long-form rows, compares
//! the configured groups population by population, and summarizes cohorts
//! by distinct subjects. It never touches the store.

pub mod compare;
pub(crate) mod error;
pub mod report;
pub mod reshape;
pub mod summary;
pub mod ttest;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use compare::{
    compare_populations, ComparisonResult, ComparisonSettings, GroupStats, MIN_OBSERVATIONS,
};
pub use error::{AnalysisError, AnalysisResult};
pub use report::{
    write_comparison_text, write_json, write_summary_text, ComparisonReport, SummaryReport,
};
pub use reshape::{to_long, write_long_csv, LongCountRow};
pub use summary::{distinct_subjects_by, population_mean, summarize, CohortSummary, GroupCount};
pub use ttest::{two_sample, TTest};
