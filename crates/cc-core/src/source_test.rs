use super::*;

const HEADER: &str = "project,subject,condition,age,sex,treatment,response,sample,sample_type,time_from_treatment_start,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte";

fn reader(body: &str) -> CoreResult<SourceReader<&[u8]>> {
    SourceReader::from_reader(body.as_bytes(), "test.csv", b',', &PopulationSet::default())
}

fn collect(body: &str) -> CoreResult<Vec<SourceRow>> {
    let mut reader = reader(body)?;
    let rows = reader.rows().collect();
    rows
}

#[test]
fn test_parses_rows_in_file_order() {
    let body = format!(
        "{HEADER}\n\
         prj1,sbj000,melanoma,57,M,miraclib,yes,s000,PBMC,0,36000,24000,42000,7000,8000\n\
         prj1,sbj000,melanoma,57,M,miraclib,yes,s001,PBMC,7,30000,20000,40000,6000,9000\n"
    );
    let rows = collect(&body).unwrap();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.line, 2);
    assert_eq!(first.subject.subject_id, "sbj000");
    assert_eq!(first.subject.project, "prj1");
    assert_eq!(first.subject.age, 57);
    assert_eq!(first.subject.response, "yes");
    assert_eq!(first.sample.sample_id, "s000");
    assert_eq!(first.sample.sample_type, "PBMC");
    assert_eq!(first.sample.time_from_treatment_start, 0);
    assert_eq!(first.sample.counts, vec![36000, 24000, 42000, 7000, 8000]);

    assert_eq!(rows[1].line, 3);
    assert_eq!(rows[1].sample.time_from_treatment_start, 7);
}

#[test]
fn test_population_columns_follow_configured_order() {
    let body = "subject,project,condition,age,sex,treatment,response,sample,sample_type,time_from_treatment_start,monocyte,b_cell\n\
                sbj1,prj1,melanoma,40,F,miraclib,no,s1,PBMC,0,5,9\n";
    let populations = PopulationSet::new(["b_cell", "monocyte"]).unwrap();
    let mut reader =
        SourceReader::from_reader(body.as_bytes(), "test.csv", b',', &populations).unwrap();
    let rows: Vec<SourceRow> = reader.rows().collect::<CoreResult<_>>().unwrap();
    assert_eq!(rows[0].sample.counts, vec![9, 5]);
}

#[test]
fn test_missing_population_column() {
    let header = HEADER.replace(",monocyte", "");
    let err = reader(&format!("{header}\n")).err().unwrap();
    match err {
        CoreError::MissingColumn { column, .. } => assert_eq!(column, "monocyte"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_missing_required_column() {
    let header = HEADER.replace("age,", "");
    let err = reader(&format!("{header}\n")).err().unwrap();
    assert!(matches!(err, CoreError::MissingColumn { ref column, .. } if column == "age"));
}

#[test]
fn test_non_numeric_count_is_malformed() {
    let body = format!(
        "{HEADER}\nprj1,sbj1,melanoma,57,M,miraclib,yes,s1,PBMC,0,lots,1,1,1,1\n"
    );
    let err = collect(&body).unwrap_err();
    match err {
        CoreError::MalformedRow { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, "b_cell");
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn test_empty_age_is_malformed() {
    let body = format!("{HEADER}\nprj1,sbj1,melanoma,,M,miraclib,yes,s1,PBMC,0,1,1,1,1,1\n");
    let err = collect(&body).unwrap_err();
    assert!(matches!(err, CoreError::MalformedRow { ref column, .. } if column == "age"));
}

#[test]
fn test_short_row_is_malformed() {
    let body = format!("{HEADER}\nprj1,sbj1,melanoma,57,M,miraclib,yes,s1,PBMC,0,1,1\n");
    let err = collect(&body).unwrap_err();
    assert!(matches!(err, CoreError::MalformedRow { ref column, .. } if column == "cd4_t_cell"));
}

#[test]
fn test_negative_count_is_malformed() {
    let body = format!("{HEADER}\nprj1,sbj1,melanoma,57,M,miraclib,yes,s1,PBMC,0,1,-1,1,1,1\n");
    let err = collect(&body).unwrap_err();
    assert!(matches!(err, CoreError::MalformedRow { ref column, .. } if column == "cd8_t_cell"));
}

#[test]
fn test_empty_subject_id_is_malformed() {
    let body = format!("{HEADER}\nprj1,,melanoma,57,M,miraclib,yes,s1,PBMC,0,1,1,1,1,1\n");
    let err = collect(&body).unwrap_err();
    assert!(matches!(err, CoreError::MalformedRow { ref column, .. } if column == "subject"));
}

#[test]
fn test_blank_response_is_kept_verbatim() {
    let body = format!("{HEADER}\nprj3,sbj9,healthy,30,F,none,,s9,PBMC,0,1,1,1,1,1\n");
    let rows = collect(&body).unwrap();
    assert_eq!(rows[0].subject.response, "");
}

#[test]
fn test_tab_delimiter() {
    let body = format!(
        "{}\nprj1\tsbj1\tmelanoma\t57\tM\tmiraclib\tyes\ts1\tPBMC\t0\t1\t2\t3\t4\t5\n",
        HEADER.replace(',', "\t")
    );
    let mut reader =
        SourceReader::from_reader(body.as_bytes(), "test.tsv", b'\t', &PopulationSet::default())
            .unwrap();
    let rows: Vec<SourceRow> = reader.rows().collect::<CoreResult<_>>().unwrap();
    assert_eq!(rows[0].sample.counts, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SourceReader::open(
        &dir.path().join("cell-count.csv"),
        b',',
        &PopulationSet::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, CoreError::SourceNotFound { .. }));
}
