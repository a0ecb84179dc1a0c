//! Store connection wrapper.
//!
//! [`CountsDb`] owns a DuckDB [`Connection`] for one unit of work: an
//! ingestion run or an analysis pass. The connection closes when the value
//! is dropped.

use crate::ddl::schema_statements;
use crate::error::{DbError, DbResult, DbResultExt};
use cc_core::PopulationSet;
use duckdb::{AccessMode, Connection};
use std::path::{Path, PathBuf};

/// Wrapper around a DuckDB connection to the cell-count store.
///
/// Single-threaded; ingestion is the only writer and analysis passes
/// never overlap it.
pub struct CountsDb {
    conn: Connection,
    populations: PopulationSet,
}

impl CountsDb {
    /// Discard any store at `path` and create a fresh one with the schema
    /// applied.
    pub fn create(path: &Path, populations: &PopulationSet) -> DbResult<Self> {
        populations.validate()?;
        remove_store_files(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbError::ConnectionError(format!("{e}: {}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        log::debug!("Created store {}", path.display());
        Self::initialize(conn, populations)
    }

    /// Open an existing store read-only and check it was built with
    /// `populations`.
    pub fn open(path: &Path, populations: &PopulationSet) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::StoreNotFound {
                path: path.display().to_string(),
            });
        }
        let config = duckdb::Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        let db = Self {
            conn,
            populations: populations.clone(),
        };
        db.check_populations()?;
        Ok(db)
    }

    /// Create an in-memory store with the schema applied.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory(populations: &PopulationSet) -> DbResult<Self> {
        populations.validate()?;
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::initialize(conn, populations)
    }

    fn initialize(conn: Connection, populations: &PopulationSet) -> DbResult<Self> {
        for statement in schema_statements(populations) {
            log::debug!("Applying DDL: {}", statement.lines().next().unwrap_or_default());
            conn.execute_batch(&statement)
                .query_context("apply schema")?;
        }
        for (position, population) in populations.iter().enumerate() {
            conn.execute(
                "INSERT INTO store_meta (position, population) VALUES (?, ?)",
                duckdb::params![position as i64, population.as_str()],
            )
            .query_context("record populations")?;
        }
        Ok(Self {
            conn,
            populations: populations.clone(),
        })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Population set the store columns follow.
    pub fn populations(&self) -> &PopulationSet {
        &self.populations
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(DbError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                    log::warn!("ROLLBACK failed: {rollback_err}");
                }
            }
        }
        result
    }

    /// Number of subject rows.
    pub fn subject_count(&self) -> DbResult<usize> {
        self.count("SELECT COUNT(*) FROM subjects")
    }

    /// Number of sample rows.
    pub fn sample_count(&self) -> DbResult<usize> {
        self.count("SELECT COUNT(*) FROM samples")
    }

    fn count(&self, sql: &str) -> DbResult<usize> {
        let n: i64 = self
            .conn
            .query_row(sql, [], |row| row.get(0))
            .query_context("count rows")?;
        Ok(n as usize)
    }

    /// Populations recorded in the store, in position order.
    pub fn stored_populations(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT population FROM store_meta ORDER BY position")
            .query_context("prepare store_meta read")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .query_context("read store_meta")?
            .collect::<Result<Vec<_>, _>>()
            .query_context("read store_meta row")?;
        Ok(names)
    }

    fn check_populations(&self) -> DbResult<()> {
        let stored = self.stored_populations()?;
        let configured = self.populations.names();
        if stored != configured {
            return Err(DbError::PopulationMismatch {
                stored: stored.join(", "),
                configured: configured.join(", "),
            });
        }
        Ok(())
    }
}

/// Delete the store file and its write-ahead log, if present.
pub fn remove_store_files(path: &Path) -> DbResult<()> {
    for file in [path.to_path_buf(), wal_path(path)] {
        if file.exists() {
            std::fs::remove_file(&file)
                .map_err(|e| DbError::ConnectionError(format!("{e}: {}", file.display())))?;
            log::debug!("Removed {}", file.display());
        }
    }
    Ok(())
}

fn wal_path(path: &Path) -> PathBuf {
    let mut wal = path.as_os_str().to_owned();
    wal.push(".wal");
    PathBuf::from(wal)
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
