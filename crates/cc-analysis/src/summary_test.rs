use super::*;
use crate::test_utils::make_record;

fn cohort() -> Vec<CohortRecord> {
    let mut s1 = make_record("s1", "sbj1", "yes", &[10, 0, 0, 0, 0]);
    let mut s2 = make_record("s2", "sbj1", "yes", &[20, 0, 0, 0, 0]);
    let mut s3 = make_record("s3", "sbj1", "yes", &[30, 0, 0, 0, 0]);
    for r in [&mut s1, &mut s2, &mut s3] {
        r.sex = "M".to_string();
    }
    let mut s4 = make_record("s4", "sbj2", "no", &[40, 0, 0, 0, 0]);
    s4.project = "prj2".to_string();
    let s5 = make_record("s5", "sbj3", "no", &[50, 0, 0, 0, 0]);
    vec![s1, s2, s3, s4, s5]
}

fn counts(groups: &[GroupCount]) -> Vec<(&str, usize)> {
    groups.iter().map(|g| (g.value.as_str(), g.subjects)).collect()
}

#[test]
fn test_subject_with_many_samples_counts_once() {
    let summary = summarize(&cohort());
    assert_eq!(summary.samples, 5);
    assert_eq!(summary.subjects, 3);
    assert_eq!(counts(&summary.by_project), vec![("prj1", 2), ("prj2", 1)]);
    assert_eq!(counts(&summary.by_response), vec![("no", 2), ("yes", 1)]);
    assert_eq!(counts(&summary.by_sex), vec![("F", 2), ("M", 1)]);
}

#[test]
fn test_empty_cohort_has_empty_tables() {
    let summary = summarize(&[]);
    assert_eq!(summary, CohortSummary::default());
}

#[test]
fn test_distinct_subjects_by_other_attribute() {
    let groups = distinct_subjects_by(&cohort(), Attribute::SampleType);
    assert_eq!(counts(&groups), vec![("PBMC", 3)]);
}

#[test]
fn test_population_mean() {
    let populations = PopulationSet::default();
    let mean = population_mean(&cohort(), &populations, "b_cell").unwrap();
    assert!((mean - 30.0).abs() < 1e-12);
    assert_eq!(population_mean(&cohort(), &populations, "nk_cell"), Some(0.0));
}

#[test]
fn test_population_mean_undefined() {
    let populations = PopulationSet::default();
    assert_eq!(population_mean(&[], &populations, "b_cell"), None);
    assert_eq!(population_mean(&cohort(), &populations, "platelet"), None);
}
