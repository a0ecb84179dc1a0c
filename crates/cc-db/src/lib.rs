//! DuckDB store for cellcohort.
//!
//! Holds the normalized `subjects` / `samples` tables built from the wide
//! source file, ingests that file transactionally, and answers cohort
//! queries. Ingestion is the only writer; analysis passes open the store
//! read-only.

pub mod connection;
pub mod ddl;
pub mod error;
pub mod ingest;
pub mod populate;
pub mod query;

pub use connection::{remove_store_files, CountsDb};
pub use error::{DbError, DbResult};
pub use ingest::{ingest, load_rows, IngestSummary};
pub use query::{fetch_cohort, CohortQuery};
