//! Ingestion of the wide source file into the store.
//!
//! A run is all-or-nothing: the existing store is discarded, every row is
//! inserted inside one transaction, and on any failure the transaction is
//! rolled back and the new store file deleted.

use crate::connection::{remove_store_files, CountsDb};
use crate::error::{DbError, DbResult};
use crate::populate::{insert_sample, insert_subject, SampleInsert};
use cc_core::{Config, SampleId, SourceReader, SourceRow, SubjectId};
use duckdb::Connection;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;

/// Rows committed by a successful ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub subjects: usize,
    pub samples: usize,
}

/// Rebuild the store at `config.store_path` from `config.source_path`.
///
/// A missing source or a header that breaks the contract fails before the
/// existing store is touched.
pub fn ingest(config: &Config) -> DbResult<IngestSummary> {
    let mut reader = SourceReader::open(
        &config.source_path,
        config.delimiter_byte(),
        &config.populations,
    )?;
    log::info!(
        "Ingesting {} into {}",
        config.source_path.display(),
        config.store_path.display()
    );

    let result = CountsDb::create(&config.store_path, &config.populations)
        .and_then(|db| load_rows(&db, &mut reader));

    match result {
        Ok(summary) => {
            log::info!(
                "Loaded {} subjects and {} samples",
                summary.subjects,
                summary.samples
            );
            Ok(summary)
        }
        Err(e) => {
            // The connection is closed by now; drop the half-built file too.
            if let Err(cleanup) = remove_store_files(&config.store_path) {
                log::warn!("Failed to remove incomplete store: {cleanup}");
            }
            Err(e)
        }
    }
}

/// Insert every source row into `db` inside a single transaction.
pub fn load_rows<R: Read>(db: &CountsDb, reader: &mut SourceReader<R>) -> DbResult<IngestSummary> {
    let insert = SampleInsert::new(db.populations());
    db.transaction(|conn| {
        let mut batch = IngestBatch::default();
        for row in reader.rows() {
            batch.insert_row(conn, &insert, row?)?;
        }
        Ok(IngestSummary {
            subjects: batch.subjects.len(),
            samples: batch.samples.len(),
        })
    })
}

/// Identity sets for the rows inserted so far in one pass.
#[derive(Default)]
struct IngestBatch {
    subjects: HashSet<SubjectId>,
    samples: HashSet<SampleId>,
}

impl IngestBatch {
    fn insert_row(&mut self, conn: &Connection, insert: &SampleInsert, row: SourceRow) -> DbResult<()> {
        // First occurrence of a subject wins; later rows only add samples.
        if !self.subjects.contains(&row.subject.subject_id) {
            insert_subject(conn, &row.subject)?;
            self.subjects.insert(row.subject.subject_id.clone());
        }

        if self.samples.contains(&row.sample.sample_id) {
            return Err(DbError::DuplicateSample {
                sample_id: row.sample.sample_id.to_string(),
                line: row.line,
            });
        }
        insert_sample(conn, insert, &row.sample, &self.subjects)?;
        self.samples.insert(row.sample.sample_id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
