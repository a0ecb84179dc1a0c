//! Configuration types and parsing for cellcohort.yml
//!
//! Every component receives the [`Config`] explicitly; nothing reads global
//! state, so separate runs and tests can use distinct configurations.

use crate::cohort::CohortFilter;
use crate::error::{CoreError, CoreResult};
use crate::model::Attribute;
use crate::population::PopulationSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cellcohort.yml";

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tabular source with one row per sample
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// Location of the persistent DuckDB store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Source field delimiter; fixed, never sniffed
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Ordered population set
    #[serde(default)]
    pub populations: PopulationSet,

    /// A comparison is significant when `p < significance_threshold`
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    /// Compare categorical filter values exactly as stored.
    ///
    /// When false, both the stored value and the filter value are
    /// lower-cased, so "PBMC" matches "pbmc".
    #[serde(default = "default_true")]
    pub case_sensitive_filters: bool,

    /// Two-group comparison settings
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Named cohort presets
    #[serde(default)]
    pub cohorts: BTreeMap<String, CohortFilter>,
}

/// Which value of a long-form row is compared between groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Raw cell count
    Count,
    /// Count as a percentage of the sample's total count
    #[default]
    Percentage,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Count => write!(f, "count"),
            Metric::Percentage => write!(f, "percentage"),
        }
    }
}

/// Variance assumption of the two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VarianceAssumption {
    /// Unequal variances, Welch-Satterthwaite degrees of freedom
    #[default]
    Welch,
    /// Equal variances, pooled estimate with n1 + n2 - 2 degrees of freedom
    Pooled,
}

impl fmt::Display for VarianceAssumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarianceAssumption::Welch => write!(f, "Welch t-test (unequal variances)"),
            VarianceAssumption::Pooled => write!(f, "Student t-test (pooled variance)"),
        }
    }
}

/// Settings for the per-population group comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonConfig {
    #[serde(default)]
    pub metric: Metric,

    #[serde(default)]
    pub variance: VarianceAssumption,

    /// Attribute whose values split the cohort
    #[serde(default)]
    pub group_by: Attribute,

    /// The two attribute values compared, first against second
    #[serde(default = "default_groups")]
    pub groups: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            variance: VarianceAssumption::default(),
            group_by: Attribute::default(),
            groups: default_groups(),
        }
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from("cell-count.csv")
}

fn default_store_path() -> PathBuf {
    PathBuf::from("cell_counts.duckdb")
}

fn default_delimiter() -> char {
    ','
}

fn default_significance_threshold() -> f64 {
    0.05
}

fn default_true() -> bool {
    true
}

fn default_groups() -> Vec<String> {
    vec!["yes".to_string(), "no".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            store_path: default_store_path(),
            delimiter: default_delimiter(),
            populations: PopulationSet::default(),
            significance_threshold: default_significance_threshold(),
            case_sensitive_filters: true,
            comparison: ComparisonConfig::default(),
            cohorts: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Relative `source_path` / `store_path` values are resolved against the
    /// directory containing the config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParse {
                path: path.display().to_string(),
                source: e,
            })?;
        if let Some(root) = path.parent() {
            config.source_path = resolve(root, &config.source_path);
            config.store_path = resolve(root, &config.store_path);
        }
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        self.populations.validate()?;

        if !(self.significance_threshold > 0.0 && self.significance_threshold < 1.0) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "significance_threshold must be between 0 and 1 (exclusive), got {}",
                    self.significance_threshold
                ),
            });
        }

        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            return Err(CoreError::ConfigInvalid {
                message: format!("delimiter {:?} must be a single ASCII character", self.delimiter),
            });
        }

        let groups = &self.comparison.groups;
        if groups.len() != 2 || groups[0] == groups[1] {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "comparison.groups must name exactly two distinct values, got {groups:?}"
                ),
            });
        }

        for (name, filter) in &self.cohorts {
            if let (Some(min), Some(max)) = (filter.min_age, filter.max_age) {
                if min > max {
                    return Err(CoreError::ConfigInvalid {
                        message: format!("cohort '{name}' has min_age {min} > max_age {max}"),
                    });
                }
            }
        }

        Ok(())
    }

    /// Source delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    /// Look up a named cohort preset
    pub fn cohort(&self, name: &str) -> CoreResult<&CohortFilter> {
        self.cohorts.get(name).ok_or_else(|| CoreError::UnknownCohort {
            name: name.to_string(),
            available: if self.cohorts.is_empty() {
                "none".to_string()
            } else {
                self.cohorts.keys().cloned().collect::<Vec<_>>().join(", ")
            },
        })
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
