//! Shared test utilities for cc-analysis

use cc_core::CohortRecord;

/// Build a melanoma/miraclib PBMC baseline record with the given identity,
/// response, and counts.
pub fn make_record(sample_id: &str, subject_id: &str, response: &str, counts: &[i64]) -> CohortRecord {
    CohortRecord {
        sample_id: sample_id.to_string(),
        subject_id: subject_id.to_string(),
        project: "prj1".to_string(),
        condition: "melanoma".to_string(),
        age: 50,
        sex: "F".to_string(),
        treatment: "miraclib".to_string(),
        response: response.to_string(),
        sample_type: "PBMC".to_string(),
        time_from_treatment_start: 0,
        counts: counts.to_vec(),
    }
}

/// Records whose first population count is `value` and whose other four
/// populations are fixed, one subject per record.
pub fn records_with_first_count(response: &str, values: &[i64]) -> Vec<CohortRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            make_record(
                &format!("{response}-s{i}"),
                &format!("{response}-sbj{i}"),
                response,
                &[*v, 100, 100, 100, 100],
            )
        })
        .collect()
}
