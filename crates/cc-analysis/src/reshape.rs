//! Wide-to-long reshape of cohort records.
//!
//! Each record yields exactly one [`LongCountRow`] per population, in
//! population-set order, so `R` records always become `R × P` rows.

use crate::error::{AnalysisError, AnalysisResult};
use cc_core::{Attribute, CohortRecord, PopulationSet};
use serde::Serialize;
use std::io::Write;

/// One (sample, population) observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongCountRow {
    pub sample_id: String,
    pub subject_id: String,
    /// Value of the grouping attribute for the sample's subject
    pub group: String,
    pub population: String,
    pub count: i64,
    /// `count / total * 100`; `None` when the sample's total count is zero
    pub percentage: Option<f64>,
}

/// Reshape `records` into long form, carrying `group_by` as the group.
pub fn to_long(
    records: &[CohortRecord],
    populations: &PopulationSet,
    group_by: Attribute,
) -> AnalysisResult<Vec<LongCountRow>> {
    let mut rows = Vec::with_capacity(records.len() * populations.len());
    for record in records {
        if record.counts.len() != populations.len() {
            return Err(AnalysisError::CountMismatch {
                sample_id: record.sample_id.clone(),
                expected: populations.len(),
                found: record.counts.len(),
            });
        }
        let total = record.total_count();
        let group = record.attribute(group_by);
        for (population, &count) in populations.iter().zip(&record.counts) {
            rows.push(LongCountRow {
                sample_id: record.sample_id.clone(),
                subject_id: record.subject_id.clone(),
                group: group.to_string(),
                population: population.to_string(),
                count,
                percentage: percentage(count, total),
            });
        }
    }
    log::debug!(
        "Reshaped {} records into {} long-form rows",
        records.len(),
        rows.len()
    );
    Ok(rows)
}

fn percentage(count: i64, total: i128) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(count as f64 / total as f64 * 100.0)
    }
}

/// Write long-form rows as CSV for an external plotting step.
///
/// Undefined percentages are written as empty fields.
pub fn write_long_csv<W: Write>(rows: &[LongCountRow], writer: W) -> AnalysisResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv.write_record([
            "sample_id",
            "subject_id",
            "group",
            "population",
            "count",
            "percentage",
        ])?;
    }
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
