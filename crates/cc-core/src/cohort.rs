//! Cohort filter definition.
//!
//! A [`CohortFilter`] is a conjunction of optional clauses over subject and
//! sample attributes. Unset clauses do not restrict the cohort, so the
//! default filter selects every sample.

use crate::model::Attribute;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Equality and range clauses composed with AND.
///
/// Categorical clauses compare against stored text exactly unless the
/// configuration disables case-sensitive filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CohortFilter {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub sample_type: Option<String>,
    #[serde(default)]
    pub time_from_treatment_start: Option<i64>,
    /// Inclusive lower bound on subject age
    #[serde(default)]
    pub min_age: Option<i64>,
    /// Inclusive upper bound on subject age
    #[serde(default)]
    pub max_age: Option<i64>,
}

impl CohortFilter {
    /// Return a copy of `self` where every clause set in `other` wins.
    pub fn overlay(&self, other: &CohortFilter) -> CohortFilter {
        CohortFilter {
            project: other.project.clone().or_else(|| self.project.clone()),
            condition: other.condition.clone().or_else(|| self.condition.clone()),
            treatment: other.treatment.clone().or_else(|| self.treatment.clone()),
            sex: other.sex.clone().or_else(|| self.sex.clone()),
            response: other.response.clone().or_else(|| self.response.clone()),
            sample_type: other.sample_type.clone().or_else(|| self.sample_type.clone()),
            time_from_treatment_start: other
                .time_from_treatment_start
                .or(self.time_from_treatment_start),
            min_age: other.min_age.or(self.min_age),
            max_age: other.max_age.or(self.max_age),
        }
    }

    /// Categorical clauses that are set, as `(column, value)` pairs in a
    /// fixed column order.
    pub fn categorical_clauses(&self) -> Vec<(&'static str, &str)> {
        [
            ("project", &self.project),
            ("condition", &self.condition),
            ("treatment", &self.treatment),
            ("sex", &self.sex),
            ("response", &self.response),
            ("sample_type", &self.sample_type),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == CohortFilter::default()
    }
}

impl fmt::Display for CohortFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .categorical_clauses()
            .into_iter()
            .map(|(column, value)| format!("{column}={value}"))
            .collect();
        if let Some(t) = self.time_from_treatment_start {
            parts.push(format!("time_from_treatment_start={t}"));
        }
        if let Some(age) = self.min_age {
            parts.push(format!("age>={age}"));
        }
        if let Some(age) = self.max_age {
            parts.push(format!("age<={age}"));
        }
        if parts.is_empty() {
            f.write_str("all samples")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// One joined subject x sample row of a cohort.
///
/// Transient: produced by a cohort query and never persisted. `counts` is
/// aligned with the population set of the store it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortRecord {
    pub sample_id: String,
    pub subject_id: String,
    pub project: String,
    pub condition: String,
    pub age: i64,
    pub sex: String,
    pub treatment: String,
    pub response: String,
    pub sample_type: String,
    pub time_from_treatment_start: i64,
    pub counts: Vec<i64>,
}

impl CohortRecord {
    /// Value of a categorical attribute.
    pub fn attribute(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Project => &self.project,
            Attribute::Condition => &self.condition,
            Attribute::Sex => &self.sex,
            Attribute::Treatment => &self.treatment,
            Attribute::Response => &self.response,
            Attribute::SampleType => &self.sample_type,
        }
    }

    /// Sum of all population counts for the sample.
    ///
    /// Widened to `i128` so that any set of stored `i64` counts sums exactly.
    pub fn total_count(&self) -> i128 {
        self.counts.iter().map(|&c| i128::from(c)).sum()
    }
}

#[cfg(test)]
#[path = "cohort_test.rs"]
mod tests;
