//! Word-to-course inverted index
//!
//! - `course_map`: the externally supplied course code to course ID mapping
//! - `builder`: tokenization, stopword filtering and index updates

mod builder;
mod course_map;

pub use builder::{tokenize, IndexBuilder, IndexOutcome, MissPolicy, STOPWORDS};
pub use course_map::{CodeIdMap, CourseMapError};

use std::collections::HashMap;

/// Numeric course identifier from the course map
pub type CourseId = u32;

/// Mapping from normalized word to the set of courses whose text contains it
///
/// Words keep their first-insertion order and so do the course IDs of a word,
/// which makes the serialized index deterministic for a deterministic crawl.
/// A `(word, id)` pair is stored at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    words: Vec<String>,
    postings: HashMap<String, Vec<CourseId>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `word` with `id`
    ///
    /// Returns true if the association is new.
    pub fn insert(&mut self, word: &str, id: CourseId) -> bool {
        match self.postings.get_mut(word) {
            Some(ids) if ids.contains(&id) => false,
            Some(ids) => {
                ids.push(id);
                true
            }
            None => {
                self.words.push(word.to_string());
                self.postings.insert(word.to_string(), vec![id]);
                true
            }
        }
    }

    /// Course IDs associated with `word`
    pub fn get(&self, word: &str) -> Option<&[CourseId]> {
        self.postings.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str, id: CourseId) -> bool {
        self.get(word).is_some_and(|ids| ids.contains(&id))
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of `(word, id)` associations
    pub fn association_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Words and their course IDs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CourseId])> {
        self.words
            .iter()
            .map(move |word| (word.as_str(), self.postings[word].as_slice()))
    }
}
