//! Populate the `samples` table.

use crate::error::{DbError, DbResult, DbResultExt};
use cc_core::{PopulationSet, Sample, SubjectId};
use duckdb::types::Value;
use duckdb::Connection;
use std::collections::HashSet;

/// INSERT statement for `samples`, built once per population set.
pub struct SampleInsert {
    sql: String,
    population_count: usize,
}

impl SampleInsert {
    pub fn new(populations: &PopulationSet) -> Self {
        let columns: String = populations.iter().map(|p| format!(", {p}")).collect();
        let placeholders = ", ?".repeat(populations.len());
        Self {
            sql: format!(
                "INSERT INTO samples (sample_id, subject_id, sample_type, time_from_treatment_start{columns}) \
                 VALUES (?, ?, ?, ?{placeholders})"
            ),
            population_count: populations.len(),
        }
    }
}

/// Insert one sample row.
///
/// `known_subjects` holds the subjects inserted earlier in this ingestion
/// pass; a sample whose subject is not among them is rejected with
/// [`DbError::ReferentialGap`] instead of being stored with a dangling
/// reference.
pub fn insert_sample(
    conn: &Connection,
    insert: &SampleInsert,
    sample: &Sample,
    known_subjects: &HashSet<SubjectId>,
) -> DbResult<()> {
    if !known_subjects.contains(&sample.subject_id) {
        return Err(DbError::ReferentialGap {
            sample_id: sample.sample_id.to_string(),
            subject_id: sample.subject_id.to_string(),
        });
    }
    if sample.counts.len() != insert.population_count {
        return Err(DbError::QueryError(format!(
            "sample {} has {} counts, expected {}",
            sample.sample_id,
            sample.counts.len(),
            insert.population_count
        )));
    }

    let mut values = vec![
        Value::Text(sample.sample_id.to_string()),
        Value::Text(sample.subject_id.to_string()),
        Value::Text(sample.sample_type.clone()),
        Value::BigInt(sample.time_from_treatment_start),
    ];
    values.extend(sample.counts.iter().map(|c| Value::BigInt(*c)));

    conn.execute(&insert.sql, duckdb::params_from_iter(values))
        .query_context(&format!("insert sample {}", sample.sample_id))?;
    Ok(())
}
