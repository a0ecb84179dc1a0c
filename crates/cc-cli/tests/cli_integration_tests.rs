//! Integration tests driving the cellcohort binary end to end

use std::path::Path;
use std::process::Command;

/// Path to the compiled cellcohort binary
fn cellcohort_bin() -> String {
    env!("CARGO_BIN_EXE_cellcohort").to_string()
}

/// Run a `cellcohort` command in `dir` and return (stdout, stderr, success).
fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(cellcohort_bin())
        .current_dir(dir)
        .env_remove("CELLCOHORT_CONFIG")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute cellcohort with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

const SOURCE: &str = "\
project,subject,condition,age,sex,treatment,response,sample,sample_type,time_from_treatment_start,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte
prj1,sbj1,melanoma,55,M,miraclib,yes,s1,PBMC,0,10,90,0,0,0
prj1,sbj2,melanoma,56,F,miraclib,yes,s2,PBMC,0,11,89,0,0,0
prj1,sbj3,melanoma,57,M,miraclib,yes,s3,PBMC,0,12,88,0,0,0
prj1,sbj4,melanoma,58,F,miraclib,no,s4,PBMC,0,21,179,0,0,0
prj2,sbj5,melanoma,59,M,miraclib,no,s5,PBMC,0,23,177,0,0,0
prj2,sbj6,melanoma,60,F,miraclib,no,s6,PBMC,0,25,175,0,0,0
prj2,sbj6,melanoma,60,F,miraclib,no,s7,PBMC,7,30,170,0,0,0
";

const CONFIG: &str = "\
cohorts:
  baseline_melanoma:
    condition: melanoma
    treatment: miraclib
    sample_type: PBMC
    time_from_treatment_start: 0
";

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cell-count.csv"), SOURCE).unwrap();
    std::fs::write(dir.path().join("cellcohort.yml"), CONFIG).unwrap();
    let (stdout, stderr, ok) = run(dir.path(), &["load"]);
    assert!(ok, "load failed: {stderr}");
    assert!(stdout.contains("Loaded 6 subjects and 7 samples"), "{stdout}");
    dir
}

#[test]
fn test_load_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, ok) = run(dir.path(), &["load"]);
    assert!(!ok);
    assert!(stderr.contains("C005"), "{stderr}");
    assert!(!dir.path().join("cell_counts.duckdb").exists());
}

#[test]
fn test_compare_baseline_cohort() {
    let dir = project();
    let (stdout, stderr, ok) = run(dir.path(), &["compare", "--cohort", "baseline_melanoma"]);
    assert!(ok, "{stderr}");
    assert!(stdout.contains("Metric: percentage"));
    let b_cell = stdout.lines().find(|l| l.starts_with("b_cell")).unwrap();
    assert!(b_cell.contains("0.5734"), "{b_cell}");
    assert!(b_cell.ends_with("no"));
}

#[test]
fn test_compare_json() {
    let dir = project();
    let (stdout, stderr, ok) = run(
        dir.path(),
        &["compare", "--cohort", "baseline_melanoma", "--format", "json"],
    );
    assert!(ok, "{stderr}");
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 5);
}

#[test]
fn test_summary_counts_subjects() {
    let dir = project();
    let (stdout, stderr, ok) = run(dir.path(), &["summary", "--project", "prj2"]);
    assert!(ok, "{stderr}");
    assert!(stdout.contains("Samples:  3\n"), "{stdout}");
    assert!(stdout.contains("Subjects: 2\n"), "{stdout}");
}

#[test]
fn test_mean_and_unknown_population() {
    let dir = project();
    let (stdout, _, ok) = run(
        dir.path(),
        &["mean", "--population", "b_cell", "--sex", "M", "--response", "yes"],
    );
    assert!(ok);
    assert!(stdout.contains("11.00"), "{stdout}");

    let (_, stderr, ok) = run(dir.path(), &["mean", "--population", "platelet"]);
    assert!(!ok);
    assert!(stderr.contains("Unknown population"), "{stderr}");
}

#[test]
fn test_export_long_csv() {
    let dir = project();
    let (_, stderr, ok) = run(
        dir.path(),
        &["export", "--cohort", "baseline_melanoma", "--output", "out/long.csv"],
    );
    assert!(ok, "{stderr}");
    let csv = std::fs::read_to_string(dir.path().join("out/long.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + 6 * 5);
}

#[test]
fn test_unknown_cohort_fails() {
    let dir = project();
    let (_, stderr, ok) = run(dir.path(), &["summary", "--cohort", "nope"]);
    assert!(!ok);
    assert!(stderr.contains("C004"), "{stderr}");
}
