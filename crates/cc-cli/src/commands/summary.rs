//! Summary command implementation

use anyhow::{Context, Result};
use cc_analysis::{summarize, write_json, write_summary_text, SummaryReport};

use crate::cli::{GlobalArgs, OutputFormat, SummaryArgs};
use crate::commands::common::{fetch, load_config, resolve_filter};

/// Execute the summary command
pub(crate) fn execute(args: &SummaryArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let filter = resolve_filter(&config, &args.filter)?;
    let records = fetch(&config, &filter)?;

    let report = SummaryReport {
        cohort: filter.to_string(),
        summary: summarize(&records),
    };
    let mut out = std::io::stdout().lock();
    let written = match args.format {
        OutputFormat::Text => write_summary_text(&report, &mut out),
        OutputFormat::Json => write_json(&report, &mut out),
    };
    written.context("Failed to write summary report")
}
