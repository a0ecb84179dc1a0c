//! Cohort retrieval: Subject ⋈ Sample restricted by a [`CohortFilter`].
//!
//! The join is an inner join on `subject_id`, so a sample without a
//! matching subject is excluded rather than failing the query. Filter
//! values are always bound as parameters.

use crate::connection::CountsDb;
use crate::error::{DbResult, DbResultExt};
use cc_core::{CohortFilter, CohortRecord, PopulationSet};
use duckdb::types::Value;

/// Fixed leading columns of every cohort query, in read order.
const BASE_COLUMNS: &[&str] = &[
    "s.sample_id",
    "s.subject_id",
    "sub.project",
    "sub.condition",
    "sub.age",
    "sub.sex",
    "sub.treatment",
    "sub.response",
    "s.sample_type",
    "s.time_from_treatment_start",
];

/// A composed cohort SELECT and its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

fn qualified(column: &str) -> String {
    match column {
        "sample_type" => "s.sample_type".to_string(),
        other => format!("sub.{other}"),
    }
}

/// Compose the filter into one SELECT.
///
/// With `case_sensitive` set, categorical clauses are exact matches on the
/// stored text: a stored "PBMC" does not match a filter of "pbmc". Otherwise
/// both sides are lower-cased.
pub fn build_cohort_query(
    filter: &CohortFilter,
    populations: &PopulationSet,
    case_sensitive: bool,
) -> CohortQuery {
    let mut select: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    select.extend(populations.iter().map(|p| format!("s.{p}")));

    let mut clauses = Vec::new();
    let mut params = Vec::new();

    for (column, value) in filter.categorical_clauses() {
        let column = qualified(column);
        if case_sensitive {
            clauses.push(format!("{column} = ?"));
        } else {
            clauses.push(format!("lower({column}) = lower(?)"));
        }
        params.push(Value::Text(value.to_string()));
    }
    if let Some(time) = filter.time_from_treatment_start {
        clauses.push("s.time_from_treatment_start = ?".to_string());
        params.push(Value::BigInt(time));
    }
    if let Some(min_age) = filter.min_age {
        clauses.push("sub.age >= ?".to_string());
        params.push(Value::BigInt(min_age));
    }
    if let Some(max_age) = filter.max_age {
        clauses.push("sub.age <= ?".to_string());
        params.push(Value::BigInt(max_age));
    }

    let mut sql = format!(
        "SELECT {} FROM samples s JOIN subjects sub ON sub.subject_id = s.subject_id",
        select.join(", ")
    );
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY s.sample_id");

    CohortQuery { sql, params }
}

/// Fetch the cohort matching `filter`, ordered by sample id.
///
/// An empty result is a valid cohort, not an error.
pub fn fetch_cohort(
    db: &CountsDb,
    filter: &CohortFilter,
    case_sensitive: bool,
) -> DbResult<Vec<CohortRecord>> {
    let populations = db.populations();
    let query = build_cohort_query(filter, populations, case_sensitive);
    log::debug!("Cohort query: {}", query.sql);

    let base = BASE_COLUMNS.len();
    let population_count = populations.len();

    let mut stmt = db
        .conn()
        .prepare(&query.sql)
        .query_context("prepare cohort query")?;
    let records = stmt
        .query_map(duckdb::params_from_iter(query.params.iter()), |row| {
            let counts = (0..population_count)
                .map(|i| row.get::<_, i64>(base + i))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CohortRecord {
                sample_id: row.get(0)?,
                subject_id: row.get(1)?,
                project: row.get(2)?,
                condition: row.get(3)?,
                age: row.get(4)?,
                sex: row.get(5)?,
                treatment: row.get(6)?,
                response: row.get(7)?,
                sample_type: row.get(8)?,
                time_from_treatment_start: row.get(9)?,
                counts,
            })
        })
        .query_context("run cohort query")?
        .collect::<Result<Vec<_>, _>>()
        .query_context("read cohort row")?;

    if records.is_empty() {
        log::warn!("Cohort ({filter}) is empty");
    } else {
        log::info!("Cohort ({filter}): {} samples", records.len());
    }
    Ok(records)
}

#[cfg(test)]
#[path = "cohort_test.rs"]
mod tests;
