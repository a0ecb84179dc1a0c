//! The ordered set of measured cell populations.
//!
//! The order of a [`PopulationSet`] is the order of store columns, long-form
//! rows, and report blocks. It is fixed by configuration and never derived
//! from the order columns happen to appear in a source header.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Populations measured when no configuration overrides them.
pub const DEFAULT_POPULATIONS: &[&str] = &["b_cell", "cd8_t_cell", "cd4_t_cell", "nk_cell", "monocyte"];

/// A single cell population, named by its source column / store column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population(String);

impl Population {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name can be used verbatim as an unquoted SQL column.
    ///
    /// Lowercase ASCII letters, digits and `_`, not starting with a digit.
    pub fn is_valid_identifier(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, duplicate-free list of populations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopulationSet(Vec<Population>);

impl Default for PopulationSet {
    fn default() -> Self {
        Self(DEFAULT_POPULATIONS.iter().map(|p| Population::new(*p)).collect())
    }
}

impl PopulationSet {
    /// Build a set from names, validating it.
    pub fn new<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self(names.into_iter().map(Population::new).collect());
        set.validate()?;
        Ok(set)
    }

    /// Check non-emptiness, identifier shape and uniqueness.
    pub fn validate(&self) -> CoreResult<()> {
        if self.0.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "populations must not be empty".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for population in &self.0 {
            if !population.is_valid_identifier() {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "population '{population}' must be a lowercase identifier (a-z, 0-9, _)"
                    ),
                });
            }
            if !seen.insert(population.as_str()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("population '{population}' is listed twice"),
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Population> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of `name` within the set, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|p| p.as_str() == name)
    }

    /// Population names in order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Population::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a PopulationSet {
    type Item = &'a Population;
    type IntoIter = std::slice::Iter<'a, Population>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "population_test.rs"]
mod tests;
