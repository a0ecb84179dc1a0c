//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use cc_core::{CohortFilter, CohortRecord, Config, DEFAULT_CONFIG_FILE};
use cc_db::{fetch_cohort, CountsDb};
use std::path::Path;

use crate::cli::{FilterArgs, GlobalArgs};

/// Load the run configuration.
///
/// An explicit `--config` must exist. Without one, `cellcohort.yml` in the
/// working directory is used when present, built-in defaults otherwise.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.exists() {
        return Config::load(default).context("Failed to load config");
    }
    log::debug!("No {DEFAULT_CONFIG_FILE} found; using defaults");
    Ok(Config::default())
}

/// The cohort selected by `--cohort` with command-line clauses applied on top.
pub(crate) fn resolve_filter(config: &Config, args: &FilterArgs) -> Result<CohortFilter> {
    let base = match &args.cohort {
        Some(name) => config.cohort(name)?.clone(),
        None => CohortFilter::default(),
    };
    let filter = base.overlay(&args.to_filter());
    if let (Some(min), Some(max)) = (filter.min_age, filter.max_age) {
        anyhow::ensure!(min <= max, "--min-age {min} exceeds --max-age {max}");
    }
    Ok(filter)
}

/// Open the store, fetch the cohort, and close the store again.
pub(crate) fn fetch(config: &Config, filter: &CohortFilter) -> Result<Vec<CohortRecord>> {
    let db = CountsDb::open(&config.store_path, &config.populations)
        .context("Failed to open store; run `cellcohort load` first")?;
    let records = fetch_cohort(&db, filter, config.case_sensitive_filters)
        .context("Failed to query cohort")?;
    Ok(records)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
