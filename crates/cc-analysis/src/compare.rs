//! Per-population two-group comparison over long-form rows.

use crate::reshape::LongCountRow;
use crate::ttest::{self, TTest};
use cc_core::{Config, Metric, PopulationSet, VarianceAssumption};
use serde::Serialize;

/// Fewest non-missing observations a group needs for a test to run
pub const MIN_OBSERVATIONS: usize = 2;

/// Inputs that stay fixed across every population of one comparison run
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSettings {
    pub metric: Metric,
    pub variance: VarianceAssumption,
    /// Group labels, first compared against second
    pub groups: (String, String),
    pub significance_threshold: f64,
    /// Match group labels exactly; otherwise compare lower-cased labels
    pub case_sensitive: bool,
}

impl ComparisonSettings {
    /// Settings taken from a validated [`Config`].
    pub fn from_config(config: &Config) -> Self {
        let comparison = &config.comparison;
        let label = |i: usize| comparison.groups.get(i).cloned().unwrap_or_default();
        Self {
            metric: comparison.metric,
            variance: comparison.variance,
            groups: (label(0), label(1)),
            significance_threshold: config.significance_threshold,
            case_sensitive: config.case_sensitive_filters,
        }
    }

    fn matches(&self, group: &str, label: &str) -> bool {
        if self.case_sensitive {
            group == label
        } else {
            // Same folding as lower() in the cohort query
            group.to_lowercase() == label.to_lowercase()
        }
    }
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Observations of one group for one population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub label: String,
    /// Non-missing observations
    pub n: usize,
    pub mean: Option<f64>,
}

impl GroupStats {
    fn new(label: &str, values: &[f64]) -> Self {
        Self {
            label: label.to_string(),
            n: values.len(),
            mean: ttest::mean(values),
        }
    }
}

/// Comparison outcome for one population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub population: String,
    pub metric: Metric,
    pub group_a: GroupStats,
    pub group_b: GroupStats,
    pub t_statistic: Option<f64>,
    pub degrees_of_freedom: Option<f64>,
    /// Full-precision two-sided p-value; `None` when no test was run or
    /// the statistic is undefined
    pub p_value: Option<f64>,
    /// `p_value < threshold`; `None` whenever `p_value` is `None`
    pub significant: Option<bool>,
    /// Both groups have at least [`MIN_OBSERVATIONS`] observations
    pub sufficient_data: bool,
}

impl ComparisonResult {
    /// P-value rounded to 4 decimal places for reporting.
    pub fn rounded_p_value(&self) -> Option<f64> {
        self.p_value.map(|p| (p * 10_000.0).round() / 10_000.0)
    }
}

/// Compare the two configured groups for every population, in set order.
///
/// Missing values (undefined percentages, non-finite numbers) are dropped
/// from a group before testing, never counted as zero.
pub fn compare_populations(
    rows: &[LongCountRow],
    populations: &PopulationSet,
    settings: &ComparisonSettings,
) -> Vec<ComparisonResult> {
    if rows.is_empty() {
        log::warn!("Cohort is empty; every population lacks data");
    }
    let (label_a, label_b) = (&settings.groups.0, &settings.groups.1);

    populations
        .iter()
        .map(|population| {
            let values_for = |label: &str| -> Vec<f64> {
                rows.iter()
                    .filter(|r| r.population == population.as_str())
                    .filter(|r| settings.matches(&r.group, label))
                    .filter_map(|r| metric_value(r, settings.metric))
                    .collect()
            };
            let a = values_for(label_a);
            let b = values_for(label_b);
            log::debug!(
                "Testing {population}: {} {label_a} vs {} {label_b}",
                a.len(),
                b.len()
            );

            let sufficient_data = a.len() >= MIN_OBSERVATIONS && b.len() >= MIN_OBSERVATIONS;
            let test = if sufficient_data {
                let test = ttest::two_sample(&a, &b, settings.variance);
                if test.is_none() {
                    log::warn!("{population}: both groups have zero variance; no statistic");
                }
                test
            } else {
                log::warn!(
                    "{population}: insufficient data ({} {label_a}, {} {label_b}); test skipped",
                    a.len(),
                    b.len()
                );
                None
            };

            build_result(
                population.as_str(),
                settings,
                GroupStats::new(label_a, &a),
                GroupStats::new(label_b, &b),
                sufficient_data,
                test,
            )
        })
        .collect()
}

fn metric_value(row: &LongCountRow, metric: Metric) -> Option<f64> {
    let value = match metric {
        Metric::Count => Some(row.count as f64),
        Metric::Percentage => row.percentage,
    }?;
    value.is_finite().then_some(value)
}

fn build_result(
    population: &str,
    settings: &ComparisonSettings,
    group_a: GroupStats,
    group_b: GroupStats,
    sufficient_data: bool,
    test: Option<TTest>,
) -> ComparisonResult {
    ComparisonResult {
        population: population.to_string(),
        metric: settings.metric,
        group_a,
        group_b,
        t_statistic: test.map(|t| t.statistic),
        degrees_of_freedom: test.map(|t| t.degrees_of_freedom),
        p_value: test.map(|t| t.p_value),
        significant: test.map(|t| t.p_value < settings.significance_threshold),
        sufficient_data,
    }
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
