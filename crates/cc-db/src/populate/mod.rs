//! Insert functions for the store's entity tables.
//!
//! All functions take `&Connection` so callers can wrap them in a single
//! transaction via [`crate::CountsDb::transaction`].

pub mod samples;
pub mod subjects;

pub use samples::{insert_sample, SampleInsert};
pub use subjects::insert_subject;
