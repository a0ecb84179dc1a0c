//! Populate the `subjects` table.

use crate::error::{DbResult, DbResultExt};
use cc_core::Subject;
use duckdb::Connection;

/// Insert one subject row. The caller guarantees the id is new.
pub fn insert_subject(conn: &Connection, subject: &Subject) -> DbResult<()> {
    conn.execute(
        "INSERT INTO subjects (subject_id, project, condition, age, sex, treatment, response)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        duckdb::params![
            subject.subject_id.as_str(),
            subject.project,
            subject.condition,
            subject.age,
            subject.sex,
            subject.treatment,
            subject.response,
        ],
    )
    .query_context(&format!("insert subject {}", subject.subject_id))?;
    Ok(())
}
