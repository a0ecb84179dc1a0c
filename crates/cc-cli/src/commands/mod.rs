//! CLI command implementations

pub(crate) mod common;
pub(crate) mod compare;
pub(crate) mod export;
pub(crate) mod load;
pub(crate) mod mean;
pub(crate) mod summary;
