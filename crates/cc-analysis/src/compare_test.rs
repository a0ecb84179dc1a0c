use super::*;
use crate::reshape::to_long;
use crate::test_utils::{make_record, records_with_first_count};
use cc_core::Attribute;

fn count_settings(variance: VarianceAssumption) -> ComparisonSettings {
    ComparisonSettings {
        metric: Metric::Count,
        variance,
        ..ComparisonSettings::default()
    }
}

fn long_rows(yes: &[i64], no: &[i64]) -> Vec<LongCountRow> {
    let mut records = records_with_first_count("yes", yes);
    records.extend(records_with_first_count("no", no));
    to_long(&records, &PopulationSet::default(), Attribute::Response).unwrap()
}

fn row(sample: &str, group: &str, count: i64, percentage: Option<f64>) -> LongCountRow {
    LongCountRow {
        sample_id: sample.to_string(),
        subject_id: sample.to_string(),
        group: group.to_string(),
        population: "b_cell".to_string(),
        count,
        percentage,
    }
}

#[test]
fn test_defaults() {
    let settings = ComparisonSettings::default();
    assert_eq!(settings.metric, Metric::Percentage);
    assert_eq!(settings.variance, VarianceAssumption::Welch);
    assert_eq!(settings.groups, ("yes".to_string(), "no".to_string()));
    assert_eq!(settings.significance_threshold, 0.05);
}

#[test]
fn test_one_result_per_population_in_order() {
    let rows = long_rows(&[10, 12, 14], &[20, 25, 33, 41]);
    let results = compare_populations(
        &rows,
        &PopulationSet::default(),
        &count_settings(VarianceAssumption::Welch),
    );
    let order: Vec<&str> = results.iter().map(|r| r.population.as_str()).collect();
    assert_eq!(
        order,
        vec!["b_cell", "cd8_t_cell", "cd4_t_cell", "nk_cell", "monocyte"]
    );
}

#[test]
fn test_welch_known_p_value() {
    let rows = long_rows(&[10, 12, 14], &[20, 25, 33, 41]);
    let results = compare_populations(
        &rows,
        &PopulationSet::default(),
        &count_settings(VarianceAssumption::Welch),
    );
    let b_cell = &results[0];
    assert!(b_cell.sufficient_data);
    assert_eq!(b_cell.group_a.n, 3);
    assert_eq!(b_cell.group_b.n, 4);
    assert_eq!(b_cell.group_a.mean, Some(12.0));
    assert_eq!(b_cell.group_b.mean, Some(29.75));
    assert!((b_cell.t_statistic.unwrap() + 3.736842105263158).abs() < 1e-9);
    assert!((b_cell.p_value.unwrap() - 0.027345673712385558).abs() < 1e-5);
    assert_eq!(b_cell.rounded_p_value(), Some(0.0273));
    assert_eq!(b_cell.significant, Some(true));
}

#[test]
fn test_pooled_known_p_value() {
    let rows = long_rows(&[10, 12, 14], &[20, 25, 33, 41]);
    let results = compare_populations(
        &rows,
        &PopulationSet::default(),
        &count_settings(VarianceAssumption::Pooled),
    );
    let b_cell = &results[0];
    assert_eq!(b_cell.degrees_of_freedom, Some(5.0));
    assert!((b_cell.p_value.unwrap() - 0.02383686320312339).abs() < 1e-5);
    assert_eq!(b_cell.rounded_p_value(), Some(0.0238));
}

#[test]
fn test_constant_populations_have_no_p_value() {
    // Populations other than b_cell hold 100 in every sample.
    let rows = long_rows(&[10, 12, 14], &[20, 25, 33, 41]);
    let results = compare_populations(
        &rows,
        &PopulationSet::default(),
        &count_settings(VarianceAssumption::Welch),
    );
    for result in &results[1..] {
        assert!(result.sufficient_data);
        assert_eq!(result.p_value, None);
        assert_eq!(result.significant, None);
    }
}

#[test]
fn test_insufficient_data_guard() {
    let rows = long_rows(&[10], &[20, 25, 33, 41, 50]);
    let results = compare_populations(
        &rows,
        &PopulationSet::default(),
        &count_settings(VarianceAssumption::Welch),
    );
    for result in &results {
        assert!(!result.sufficient_data);
        assert_eq!(result.group_a.n, 1);
        assert_eq!(result.group_b.n, 5);
        assert_eq!(result.t_statistic, None);
        assert_eq!(result.p_value, None);
        assert_eq!(result.significant, None);
    }
}

#[test]
fn test_not_significant_above_threshold() {
    let mut records = vec![
        make_record("a1", "a1", "yes", &[10, 90, 0, 0, 0]),
        make_record("a2", "a2", "yes", &[11, 89, 0, 0, 0]),
        make_record("a3", "a3", "yes", &[12, 88, 0, 0, 0]),
    ];
    records.push(make_record("b1", "b1", "no", &[21, 179, 0, 0, 0]));
    records.push(make_record("b2", "b2", "no", &[23, 177, 0, 0, 0]));
    records.push(make_record("b3", "b3", "no", &[25, 175, 0, 0, 0]));
    let rows = to_long(&records, &PopulationSet::default(), Attribute::Response).unwrap();

    // b_cell percentages: yes [10, 11, 12], no [10.5, 11.5, 12.5]
    let results = compare_populations(&rows, &PopulationSet::default(), &ComparisonSettings::default());
    let b_cell = &results[0];
    assert!((b_cell.t_statistic.unwrap() + 0.6123724356957945).abs() < 1e-9);
    assert!((b_cell.p_value.unwrap() - 0.57339225382617).abs() < 1e-5);
    assert_eq!(b_cell.significant, Some(false));
}

#[test]
fn test_missing_values_are_excluded() {
    let rows = vec![
        row("a1", "yes", 1, Some(10.0)),
        row("a2", "yes", 2, Some(12.0)),
        row("a3", "yes", 0, None),
        row("a4", "yes", 3, Some(f64::NAN)),
        row("b1", "no", 4, Some(20.0)),
        row("b2", "no", 5, None),
    ];
    let populations = PopulationSet::new(["b_cell"]).unwrap();
    let results = compare_populations(&rows, &populations, &ComparisonSettings::default());
    let b_cell = &results[0];
    assert_eq!(b_cell.group_a.n, 2);
    assert_eq!(b_cell.group_a.mean, Some(11.0));
    assert_eq!(b_cell.group_b.n, 1);
    assert!(!b_cell.sufficient_data);

    // The same rows compared on raw counts have no missing values.
    let counts = ComparisonSettings {
        metric: Metric::Count,
        ..ComparisonSettings::default()
    };
    let results = compare_populations(&rows, &populations, &counts);
    assert_eq!(results[0].group_a.n, 4);
    assert_eq!(results[0].group_b.n, 2);
    assert!(results[0].sufficient_data);
}

#[test]
fn test_group_label_casing() {
    let rows = vec![
        row("a1", "Yes", 1, Some(10.0)),
        row("a2", "YES", 2, Some(12.0)),
        row("b1", "no", 4, Some(20.0)),
        row("b2", "No", 5, Some(24.0)),
    ];
    let populations = PopulationSet::new(["b_cell"]).unwrap();

    let exact = compare_populations(&rows, &populations, &ComparisonSettings::default());
    assert_eq!(exact[0].group_a.n, 0);
    assert_eq!(exact[0].group_b.n, 1);

    let relaxed = ComparisonSettings {
        case_sensitive: false,
        ..ComparisonSettings::default()
    };
    let results = compare_populations(&rows, &populations, &relaxed);
    assert_eq!(results[0].group_a.n, 2);
    assert_eq!(results[0].group_b.n, 2);
}

#[test]
fn test_group_label_casing_non_ascii() {
    let rows = vec![
        row("a1", "ÉLEVÉ", 1, Some(10.0)),
        row("a2", "Élevé", 2, Some(12.0)),
        row("b1", "bas", 4, Some(20.0)),
        row("b2", "BAS", 5, Some(24.0)),
    ];
    let populations = PopulationSet::new(["b_cell"]).unwrap();
    let relaxed = ComparisonSettings {
        groups: ("élevé".to_string(), "bas".to_string()),
        case_sensitive: false,
        ..ComparisonSettings::default()
    };
    let results = compare_populations(&rows, &populations, &relaxed);
    assert_eq!(results[0].group_a.n, 2);
    assert_eq!(results[0].group_b.n, 2);
}

#[test]
fn test_empty_rows() {
    let results = compare_populations(&[], &PopulationSet::default(), &ComparisonSettings::default());
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| !r.sufficient_data && r.p_value.is_none()));
    assert!(results.iter().all(|r| r.group_a.mean.is_none()));
}

#[test]
fn test_deterministic() {
    let rows = long_rows(&[10, 12, 14, 9], &[20, 25, 33, 41]);
    let settings = count_settings(VarianceAssumption::Welch);
    let first = compare_populations(&rows, &PopulationSet::default(), &settings);
    let second = compare_populations(&rows, &PopulationSet::default(), &settings);
    assert_eq!(first, second);
}
