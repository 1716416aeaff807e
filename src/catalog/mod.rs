//! Course catalog extraction
//!
//! This module turns a parsed catalog page into course records:
//! - `text`: text cleanup shared by the extractor and the indexer
//! - `extract`: course block discovery, including subsequence blocks

mod extract;
mod text;

pub use extract::CourseExtractor;
pub use text::normalize;

use std::collections::HashMap;

/// Short course identifier such as `"CMSC 12100"`
pub type CourseCode = String;

/// One text blob found for a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub code: CourseCode,
    /// Cleaned title and description, joined by a space
    pub text: String,
}

/// Course text blobs found on a single page, keyed by course code
///
/// Codes keep the order in which they were first seen and every blob added for
/// a code is kept; a later blob never replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePage {
    order: Vec<CourseCode>,
    blocks: HashMap<CourseCode, Vec<String>>,
}

impl CoursePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text blob for `code`. Empty codes carry no course and are ignored.
    pub fn add(&mut self, code: &str, text: String) {
        if code.is_empty() {
            return;
        }
        match self.blocks.get_mut(code) {
            Some(texts) => texts.push(text),
            None => {
                self.order.push(code.to_string());
                self.blocks.insert(code.to_string(), vec![text]);
            }
        }
    }

    /// Text blobs accumulated for `code`, in document order
    pub fn get(&self, code: &str) -> Option<&[String]> {
        self.blocks.get(code).map(Vec::as_slice)
    }

    /// Number of distinct course codes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of text blobs across all codes
    pub fn blob_count(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }

    /// Course codes in first-seen order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every `(code, text)` pair, grouped by code in first-seen order
    pub fn records(&self) -> impl Iterator<Item = CourseRecord> + '_ {
        self.order.iter().flat_map(move |code| {
            self.blocks[code].iter().map(move |text| CourseRecord {
                code: code.clone(),
                text: text.clone(),
            })
        })
    }
}
