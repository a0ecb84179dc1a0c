//! Schema DDL for the cell-count store.
//!
//! The `samples` table carries one `BIGINT` column per configured
//! population, so its DDL is generated from a validated
//! [`PopulationSet`]. Population names are restricted to lowercase
//! identifiers by validation and are therefore safe to splice in unquoted.

use cc_core::PopulationSet;

/// Subject table: one row per distinct subject id.
pub const SUBJECTS_DDL: &str = "CREATE TABLE subjects (
    subject_id VARCHAR PRIMARY KEY,
    project    VARCHAR NOT NULL,
    condition  VARCHAR NOT NULL,
    age        BIGINT  NOT NULL,
    sex        VARCHAR NOT NULL,
    treatment  VARCHAR NOT NULL,
    response   VARCHAR NOT NULL
);";

/// Records the population set (and its order) the store was built with.
pub const STORE_META_DDL: &str = "CREATE TABLE store_meta (
    position   INTEGER NOT NULL PRIMARY KEY,
    population VARCHAR NOT NULL
);";

/// `samples` DDL with one count column per population, in set order.
pub fn samples_ddl(populations: &PopulationSet) -> String {
    let count_columns: String = populations
        .iter()
        .map(|p| format!(",\n    {p} BIGINT NOT NULL"))
        .collect();
    format!(
        "CREATE TABLE samples (
    sample_id                 VARCHAR PRIMARY KEY,
    subject_id                VARCHAR NOT NULL REFERENCES subjects (subject_id),
    sample_type               VARCHAR NOT NULL,
    time_from_treatment_start BIGINT  NOT NULL{count_columns}
);"
    )
}

/// Full schema, in dependency order.
pub fn schema_statements(populations: &PopulationSet) -> Vec<String> {
    vec![
        SUBJECTS_DDL.to_string(),
        samples_ddl(populations),
        STORE_META_DDL.to_string(),
    ]
}
