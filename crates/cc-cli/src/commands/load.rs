//! Load command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, LoadArgs};
use crate::commands::common::load_config;

/// Execute the load command
pub(crate) fn execute(args: &LoadArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(source) = &args.source {
        config.source_path = source.clone();
    }
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }

    let summary = cc_db::ingest(&config).context("Failed to load source")?;
    println!(
        "Loaded {} subjects and {} samples from {} into {}",
        summary.subjects,
        summary.samples,
        config.source_path.display(),
        config.store_path.display()
    );
    Ok(())
}
