//! Subject and sample entities as read from the source and stored.

use crate::newtype_string::define_newtype_string;
use serde::{Deserialize, Serialize};
use std::fmt;

define_newtype_string! {
    /// Unique identifier of a study participant.
    pub struct SubjectId;
}

define_newtype_string! {
    /// Unique identifier of one biological sample.
    pub struct SampleId;
}

/// A study participant. Created once per distinct subject id during
/// ingestion; the first source row for the subject supplies every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub subject_id: SubjectId,
    pub project: String,
    pub condition: String,
    pub age: i64,
    pub sex: String,
    pub treatment: String,
    pub response: String,
}

/// One measurement event for a subject.
///
/// `counts` is aligned with the configured [`crate::PopulationSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_id: SampleId,
    pub subject_id: SubjectId,
    pub sample_type: String,
    pub time_from_treatment_start: i64,
    pub counts: Vec<i64>,
}

/// Categorical attributes a cohort can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Project,
    Condition,
    Sex,
    Treatment,
    #[default]
    Response,
    SampleType,
}

impl Attribute {
    /// Store column holding this attribute.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::Project => "project",
            Attribute::Condition => "condition",
            Attribute::Sex => "sex",
            Attribute::Treatment => "treatment",
            Attribute::Response => "response",
            Attribute::SampleType => "sample_type",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
