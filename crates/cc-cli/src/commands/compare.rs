//! Compare command implementation

use anyhow::{Context, Result};
use cc_analysis::{
    compare_populations, to_long, write_comparison_text, write_json, ComparisonReport,
    ComparisonSettings,
};

use crate::cli::{CompareArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{fetch, load_config, resolve_filter};

/// Execute the compare command
pub(crate) fn execute(args: &CompareArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let filter = resolve_filter(&config, &args.filter)?;

    let mut settings = ComparisonSettings::from_config(&config);
    if let Some(metric) = args.metric {
        settings.metric = metric.into();
    }
    if let Some(variance) = args.variance {
        settings.variance = variance.into();
    }

    let records = fetch(&config, &filter)?;
    let rows = to_long(&records, &config.populations, config.comparison.group_by)?;
    let results = compare_populations(&rows, &config.populations, &settings);
    let report = ComparisonReport::new(filter.to_string(), &settings, results);

    let mut out = std::io::stdout().lock();
    let written = match args.format {
        OutputFormat::Text => write_comparison_text(&report, &mut out),
        OutputFormat::Json => write_json(&report, &mut out),
    };
    written.context("Failed to write comparison report")
}
