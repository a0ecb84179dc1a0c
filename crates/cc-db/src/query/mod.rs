//! Read-only queries against the store.

pub mod cohort;

pub use cohort::{build_cohort_query, fetch_cohort, CohortQuery};
