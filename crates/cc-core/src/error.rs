//! Error types for cc-core

use thiserror::Error;

/// Core error type for cellcohort
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_yaml::Error,
    },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Cohort preset not defined in the config
    #[error("[C004] Unknown cohort '{name}' (defined: {available})")]
    UnknownCohort { name: String, available: String },

    /// C005: Source file does not exist
    #[error("[C005] Source file not found: {path}")]
    SourceNotFound { path: String },

    /// C006: Source header lacks a required column
    #[error("[C006] Source {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    /// C007: A row has an absent or non-integer field
    #[error("[C007] Malformed row at line {line}, column '{column}': {message}")]
    MalformedRow {
        line: u64,
        column: String,
        message: String,
    },

    /// C008: Underlying CSV reader failure
    #[error("[C008] Failed to read source: {0}")]
    Csv(#[from] csv::Error),

    /// C009: IO error with file path context
    #[error("[C009] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
