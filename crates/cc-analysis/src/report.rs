//! Text and JSON rendering of comparison and summary results.
//!
//! Both renderings are deterministic: populations appear in set order and
//! summary categories sorted by value.

use crate::compare::{ComparisonResult, ComparisonSettings};
use crate::error::AnalysisResult;
use crate::summary::{CohortSummary, GroupCount};
use cc_core::{Metric, VarianceAssumption};
use serde::Serialize;
use std::io::Write;

/// Comparison results together with the run parameters that produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Human-readable cohort filter
    pub cohort: String,
    pub metric: Metric,
    pub variance: VarianceAssumption,
    pub significance_threshold: f64,
    pub results: Vec<ComparisonResult>,
}

impl ComparisonReport {
    pub fn new(
        cohort: impl Into<String>,
        settings: &ComparisonSettings,
        results: Vec<ComparisonResult>,
    ) -> Self {
        Self {
            cohort: cohort.into(),
            metric: settings.metric,
            variance: settings.variance,
            significance_threshold: settings.significance_threshold,
            results,
        }
    }
}

/// Cohort summary with the filter that selected it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub cohort: String,
    #[serde(flatten)]
    pub summary: CohortSummary,
}

/// Render `report` as an aligned table, one row per population.
pub fn write_comparison_text<W: Write>(report: &ComparisonReport, out: &mut W) -> AnalysisResult<()> {
    writeln!(out, "Cohort: {}", report.cohort)?;
    writeln!(out, "Metric: {}", report.metric)?;
    writeln!(
        out,
        "Test:   {}, significant when p < {}",
        report.variance, report.significance_threshold
    )?;
    writeln!(out)?;

    let (label_a, label_b) = match report.results.first() {
        Some(r) => (r.group_a.label.to_uppercase(), r.group_b.label.to_uppercase()),
        None => ("A".to_string(), "B".to_string()),
    };
    let headers = [
        "POPULATION".to_string(),
        format!("N_{label_a}"),
        format!("MEAN_{label_a}"),
        format!("N_{label_b}"),
        format!("MEAN_{label_b}"),
        "T".to_string(),
        "P_VALUE".to_string(),
        "SIGNIFICANT".to_string(),
    ];
    let rows: Vec<Vec<String>> = report.results.iter().map(comparison_row).collect();
    write_table(out, &headers, &rows)?;

    let significant: Vec<&str> = report
        .results
        .iter()
        .filter(|r| r.significant == Some(true))
        .map(|r| r.population.as_str())
        .collect();
    writeln!(out)?;
    if significant.is_empty() {
        writeln!(out, "No population differs significantly.")?;
    } else {
        writeln!(out, "Significant: {}", significant.join(", "))?;
    }
    Ok(())
}

fn comparison_row(result: &ComparisonResult) -> Vec<String> {
    let significant = match (result.sufficient_data, result.significant) {
        (false, _) => "insufficient data".to_string(),
        (true, None) => "undefined".to_string(),
        (true, Some(true)) => "yes".to_string(),
        (true, Some(false)) => "no".to_string(),
    };
    vec![
        result.population.clone(),
        result.group_a.n.to_string(),
        fmt_opt(result.group_a.mean),
        result.group_b.n.to_string(),
        fmt_opt(result.group_b.mean),
        fmt_opt(result.t_statistic),
        fmt_opt(result.rounded_p_value()),
        significant,
    ]
}

/// Render `report` as three distinct-subject tables.
pub fn write_summary_text<W: Write>(report: &SummaryReport, out: &mut W) -> AnalysisResult<()> {
    let summary = &report.summary;
    writeln!(out, "Cohort:   {}", report.cohort)?;
    writeln!(out, "Samples:  {}", summary.samples)?;
    writeln!(out, "Subjects: {}", summary.subjects)?;

    for (title, column, groups) in [
        ("Subjects by project", "PROJECT", &summary.by_project),
        ("Subjects by response", "RESPONSE", &summary.by_response),
        ("Subjects by sex", "SEX", &summary.by_sex),
    ] {
        writeln!(out)?;
        writeln!(out, "{title}")?;
        write_table(
            out,
            &[column.to_string(), "SUBJECTS".to_string()],
            &group_rows(groups),
        )?;
    }
    Ok(())
}

fn group_rows(groups: &[GroupCount]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|g| {
            let value = if g.value.is_empty() {
                "(blank)".to_string()
            } else {
                g.value.clone()
            };
            vec![value, g.subjects.to_string()]
        })
        .collect()
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize, W: Write>(value: &T, out: &mut W) -> AnalysisResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn write_table<W: Write>(out: &mut W, headers: &[String], rows: &[Vec<String>]) -> AnalysisResult<()> {
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: &[String]| -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        parts.join("  ").trim_end().to_string()
    };

    writeln!(out, "{}", line(headers))?;
    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    writeln!(out, "{}", sep.join("  "))?;
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
