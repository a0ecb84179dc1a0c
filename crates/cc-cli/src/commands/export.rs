//! Export command implementation

use anyhow::{Context, Result};
use cc_analysis::{to_long, write_long_csv};
use std::fs::File;
use std::io::BufWriter;

use crate::cli::{ExportArgs, GlobalArgs};
use crate::commands::common::{fetch, load_config, resolve_filter};

/// Execute the export command
pub(crate) fn execute(args: &ExportArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let filter = resolve_filter(&config, &args.filter)?;
    let records = fetch(&config, &filter)?;
    let rows = to_long(&records, &config.populations, config.comparison.group_by)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_long_csv(&rows, BufWriter::new(file)).context("Failed to write long-form CSV")?;

    println!(
        "Wrote {} rows ({} samples) to {}",
        rows.len(),
        records.len(),
        args.output.display()
    );
    Ok(())
}
