//! Course code to course ID mapping
//!
//! The map is loaded once before the crawl from a JSON object such as
//! `{"CMSC 12100": 1, "CMSC 15100": 2}` and never mutated afterwards.

use crate::index::CourseId;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the course map
#[derive(Debug, Error)]
pub enum CourseMapError {
    #[error("Failed to read course map: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse course map JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable mapping from course code to numeric course ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeIdMap {
    ids: HashMap<String, CourseId>,
}

impl CodeIdMap {
    /// Loads the map from a JSON file
    pub fn load(path: &Path) -> Result<Self, CourseMapError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses the map from a JSON object of code to integer ID
    pub fn from_json(json: &str) -> Result<Self, CourseMapError> {
        let ids: HashMap<String, CourseId> = serde_json::from_str(json)?;
        Ok(Self { ids })
    }

    /// Exact-match lookup of a course code
    pub fn get(&self, code: &str) -> Option<CourseId> {
        self.ids.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CourseId)> for CodeIdMap {
    fn from_iter<I: IntoIterator<Item = (S, CourseId)>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
