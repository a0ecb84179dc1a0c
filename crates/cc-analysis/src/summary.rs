//! Descriptive group-bys over a filtered cohort.
//!
//! Every count is of distinct subjects: a subject with several samples in
//! the cohort counts once per category.

use cc_core::{Attribute, CohortRecord, PopulationSet};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct subjects sharing one attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub value: String,
    pub subjects: usize,
}

/// Breakdown of a cohort by project, response and sex
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CohortSummary {
    pub samples: usize,
    pub subjects: usize,
    pub by_project: Vec<GroupCount>,
    pub by_response: Vec<GroupCount>,
    pub by_sex: Vec<GroupCount>,
}

/// Summarize `records`; an empty cohort gives empty tables.
pub fn summarize(records: &[CohortRecord]) -> CohortSummary {
    if records.is_empty() {
        log::warn!("Cohort is empty; summary tables are empty");
    }
    let subjects: BTreeSet<&str> = records.iter().map(|r| r.subject_id.as_str()).collect();
    CohortSummary {
        samples: records.len(),
        subjects: subjects.len(),
        by_project: distinct_subjects_by(records, Attribute::Project),
        by_response: distinct_subjects_by(records, Attribute::Response),
        by_sex: distinct_subjects_by(records, Attribute::Sex),
    }
}

/// Distinct-subject count per value of `attribute`, sorted by value.
pub fn distinct_subjects_by(records: &[CohortRecord], attribute: Attribute) -> Vec<GroupCount> {
    let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.attribute(attribute))
            .or_default()
            .insert(record.subject_id.as_str());
    }
    groups
        .into_iter()
        .map(|(value, subjects)| GroupCount {
            value: value.to_string(),
            subjects: subjects.len(),
        })
        .collect()
}

/// Mean raw count of `population` across the cohort's samples.
///
/// `None` for an empty cohort or a population outside the set.
pub fn population_mean(
    records: &[CohortRecord],
    populations: &PopulationSet,
    population: &str,
) -> Option<f64> {
    let index = populations.position(population)?;
    let counts: Vec<f64> = records
        .iter()
        .filter_map(|r| r.counts.get(index))
        .map(|&c| c as f64)
        .collect();
    crate::ttest::mean(&counts)
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
