//! Reader for the wide cell-count source file.
//!
//! The header contract is fixed: the demographic/sample columns in
//! [`REQUIRED_COLUMNS`] plus one column per configured population. Columns
//! may appear in any order and extra columns are ignored.

use crate::error::{CoreError, CoreResult};
use crate::model::{Sample, SampleId, Subject, SubjectId};
use crate::population::PopulationSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Non-population columns every source must carry
pub const REQUIRED_COLUMNS: &[&str] = &[
    "subject",
    "project",
    "condition",
    "age",
    "sex",
    "treatment",
    "response",
    "sample",
    "sample_type",
    "time_from_treatment_start",
];

/// One parsed source row: the subject fields and the sample it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based line number in the source (header is line 1)
    pub line: u64,
    pub subject: Subject,
    pub sample: Sample,
}

/// Header positions resolved once per file
#[derive(Debug)]
struct ColumnIndex {
    subject: usize,
    project: usize,
    condition: usize,
    age: usize,
    sex: usize,
    treatment: usize,
    response: usize,
    sample: usize,
    sample_type: usize,
    time: usize,
    populations: Vec<(String, usize)>,
}

impl ColumnIndex {
    fn resolve(
        headers: &csv::StringRecord,
        populations: &PopulationSet,
        label: &str,
    ) -> CoreResult<Self> {
        let find = |column: &str| -> CoreResult<usize> {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| CoreError::MissingColumn {
                    path: label.to_string(),
                    column: column.to_string(),
                })
        };

        let populations = populations
            .iter()
            .map(|p| find(p.as_str()).map(|idx| (p.as_str().to_string(), idx)))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            subject: find("subject")?,
            project: find("project")?,
            condition: find("condition")?,
            age: find("age")?,
            sex: find("sex")?,
            treatment: find("treatment")?,
            response: find("response")?,
            sample: find("sample")?,
            sample_type: find("sample_type")?,
            time: find("time_from_treatment_start")?,
            populations,
        })
    }
}

/// Streaming reader producing [`SourceRow`]s in file order
pub struct SourceReader<R: Read> {
    reader: csv::Reader<R>,
    columns: ColumnIndex,
}

impl SourceReader<File> {
    /// Open `path` and check its header against the contract.
    pub fn open(path: &Path, delimiter: u8, populations: &PopulationSet) -> CoreResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::SourceNotFound {
                path: path.display().to_string(),
            },
            _ => CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            },
        })?;
        Self::from_reader(file, &path.display().to_string(), delimiter, populations)
    }
}

impl<R: Read> SourceReader<R> {
    /// Wrap any reader; `label` names the source in error messages.
    pub fn from_reader(
        input: R,
        label: &str,
        delimiter: u8,
        populations: &PopulationSet,
    ) -> CoreResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);
        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers, populations, label)?;
        Ok(Self { reader, columns })
    }

    /// Iterate rows, parsing each one. Iteration continues past a bad row;
    /// callers that need all-or-nothing semantics stop at the first error.
    pub fn rows(&mut self) -> impl Iterator<Item = CoreResult<SourceRow>> + '_ {
        let columns = &self.columns;
        self.reader.records().map(move |record| {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            parse_row(&record, columns, line)
        })
    }
}

fn parse_row(record: &csv::StringRecord, columns: &ColumnIndex, line: u64) -> CoreResult<SourceRow> {
    let field = |idx: usize, column: &str| -> CoreResult<String> {
        record
            .get(idx)
            .map(str::to_string)
            .ok_or_else(|| malformed(line, column, "field is absent"))
    };
    let integer = |idx: usize, column: &str| -> CoreResult<i64> {
        let raw = field(idx, column)?;
        if raw.is_empty() {
            return Err(malformed(line, column, "expected an integer, found an empty value"));
        }
        raw.parse::<i64>()
            .map_err(|_| malformed(line, column, &format!("expected an integer, found '{raw}'")))
    };
    let non_negative = |idx: usize, column: &str| -> CoreResult<i64> {
        let value = integer(idx, column)?;
        if value < 0 {
            return Err(malformed(line, column, &format!("must not be negative, found {value}")));
        }
        Ok(value)
    };

    let subject_id = SubjectId::try_new(field(columns.subject, "subject")?)
        .ok_or_else(|| malformed(line, "subject", "identifier is empty"))?;
    let sample_id = SampleId::try_new(field(columns.sample, "sample")?)
        .ok_or_else(|| malformed(line, "sample", "identifier is empty"))?;

    let subject = Subject {
        subject_id: subject_id.clone(),
        project: field(columns.project, "project")?,
        condition: field(columns.condition, "condition")?,
        age: non_negative(columns.age, "age")?,
        sex: field(columns.sex, "sex")?,
        treatment: field(columns.treatment, "treatment")?,
        response: field(columns.response, "response")?,
    };

    let counts = columns
        .populations
        .iter()
        .map(|(name, idx)| non_negative(*idx, name))
        .collect::<CoreResult<Vec<_>>>()?;

    let sample = Sample {
        sample_id,
        subject_id,
        sample_type: field(columns.sample_type, "sample_type")?,
        time_from_treatment_start: integer(columns.time, "time_from_treatment_start")?,
        counts,
    };

    Ok(SourceRow {
        line,
        subject,
        sample,
    })
}

fn malformed(line: u64, column: &str, message: &str) -> CoreError {
    CoreError::MalformedRow {
        line,
        column: column.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
