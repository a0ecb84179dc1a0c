//! Error types for the cell-count store.

use cc_core::CoreError;
use thiserror::Error;

/// Store, ingestion, and query errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open or create the store (D001).
    #[error("[D001] Store connection failed: {0}")]
    ConnectionError(String),

    /// Analysis was requested against a store that does not exist (D002).
    #[error("[D002] Store not found at {path}; run `cellcohort load` first")]
    StoreNotFound { path: String },

    /// SQL execution error inside the store (D003).
    #[error("[D003] Store query failed: {0}")]
    QueryError(String),

    /// Transaction management error (D004).
    #[error("[D004] Store transaction failed: {0}")]
    TransactionError(String),

    /// A sample references a subject not inserted in this ingestion pass (D005).
    #[error("[D005] Sample '{sample_id}' references subject '{subject_id}' which was not ingested")]
    ReferentialGap {
        sample_id: String,
        subject_id: String,
    },

    /// The same sample id appears on two source rows (D006).
    #[error("[D006] Duplicate sample '{sample_id}' at line {line}")]
    DuplicateSample { sample_id: String, line: u64 },

    /// The store was built with a different population set (D007).
    #[error("[D007] Store populations [{stored}] do not match configured populations [{configured}]; re-run `cellcohort load`")]
    PopulationMismatch { stored: String, configured: String },

    /// Source or configuration error surfaced during ingestion (D008).
    #[error("[D008] {0}")]
    Source(#[from] CoreError),

    /// DuckDB driver error with preserved source chain (D009).
    #[error("[D009] DuckDB error")]
    DuckDb(#[source] duckdb::Error),
}

/// Result type alias for [`DbError`].
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::DuckDb(err)
    }
}

/// Attach a short description of the failed step to a DuckDB error.
pub(crate) trait DbResultExt<T> {
    fn query_context(self, what: &str) -> DbResult<T>;
}

impl<T> DbResultExt<T> for Result<T, duckdb::Error> {
    fn query_context(self, what: &str) -> DbResult<T> {
        self.map_err(|e| DbError::QueryError(format!("{what}: {e}")))
    }
}
