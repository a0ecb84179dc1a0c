//! CLI argument definitions using clap derive API

use cc_core::{CohortFilter, Metric, VarianceAssumption};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cellcohort - immune cell-count cohort comparisons
#[derive(Parser, Debug)]
#[command(name = "cellcohort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./cellcohort.yml when present)
    #[arg(short, long, global = true, env = "CELLCOHORT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the source file into a fresh store
    Load(LoadArgs),

    /// Compare the configured groups for every population
    Compare(CompareArgs),

    /// Distinct-subject breakdown of a cohort
    Summary(SummaryArgs),

    /// Mean raw count of one population over a cohort
    Mean(MeanArgs),

    /// Write a cohort's long-form counts as CSV
    Export(ExportArgs),
}

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Override the source file
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Override the store location
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Cohort selection shared by the analysis commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Named cohort from the config; flags below override its clauses
    #[arg(long)]
    pub cohort: Option<String>,

    #[arg(long)]
    pub project: Option<String>,

    #[arg(long)]
    pub condition: Option<String>,

    #[arg(long)]
    pub treatment: Option<String>,

    #[arg(long)]
    pub sex: Option<String>,

    #[arg(long)]
    pub response: Option<String>,

    #[arg(long)]
    pub sample_type: Option<String>,

    /// Time from treatment start, exact match
    #[arg(long)]
    pub time: Option<i64>,

    /// Minimum subject age, inclusive
    #[arg(long)]
    pub min_age: Option<i64>,

    /// Maximum subject age, inclusive
    #[arg(long)]
    pub max_age: Option<i64>,
}

impl FilterArgs {
    /// The clauses given on the command line
    pub fn to_filter(&self) -> CohortFilter {
        CohortFilter {
            project: self.project.clone(),
            condition: self.condition.clone(),
            treatment: self.treatment.clone(),
            sex: self.sex.clone(),
            response: self.response.clone(),
            sample_type: self.sample_type.clone(),
            time_from_treatment_start: self.time,
            min_age: self.min_age,
            max_age: self.max_age,
        }
    }
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Value compared between groups (default from config)
    #[arg(short, long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Variance assumption of the t-test (default from config)
    #[arg(long, value_enum)]
    pub variance: Option<VarianceArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the mean command
#[derive(Args, Debug)]
pub struct MeanArgs {
    /// Population whose mean count is reported
    #[arg(long)]
    pub population: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned tables
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Comparison metric
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricArg {
    /// Raw cell count
    Count,
    /// Share of the sample's total count
    Percentage,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Count => Metric::Count,
            MetricArg::Percentage => Metric::Percentage,
        }
    }
}

/// Variance assumption
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceArg {
    /// Unequal variances
    Welch,
    /// Pooled variance
    Pooled,
}

impl From<VarianceArg> for VarianceAssumption {
    fn from(arg: VarianceArg) -> Self {
        match arg {
            VarianceArg::Welch => VarianceAssumption::Welch,
            VarianceArg::Pooled => VarianceAssumption::Pooled,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
