//! Mean command implementation

use anyhow::Result;
use cc_analysis::population_mean;

use crate::cli::{GlobalArgs, MeanArgs};
use crate::commands::common::{fetch, load_config, resolve_filter};

/// Execute the mean command
pub(crate) fn execute(args: &MeanArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    anyhow::ensure!(
        config.populations.position(&args.population).is_some(),
        "Unknown population '{}'. Available: {}",
        args.population,
        config.populations.names().join(", ")
    );

    let filter = resolve_filter(&config, &args.filter)?;
    let records = fetch(&config, &filter)?;

    match population_mean(&records, &config.populations, &args.population) {
        Some(mean) => println!(
            "Mean {} count over {} samples ({}): {:.2}",
            args.population,
            records.len(),
            filter,
            mean
        ),
        None => println!("No samples match {filter}; mean {} is undefined", args.population),
    }
    Ok(())
}
