use crate::catalog::normalize;
use crate::index::{CodeIdMap, CourseId, InvertedIndex};
use crate::CrawlError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Common words and catalog boilerplate that are never indexed
pub const STOPWORDS: &[&str] = &[
    "a", "also", "an", "and", "are", "as", "at", "be", "but", "by", "course", "for", "from",
    "how", "i", "ii", "iii", "in", "include", "is", "not", "of", "on", "or", "s", "sequence",
    "so", "social", "students", "such", "that", "the", "their", "this", "through", "to",
    "topics", "units", "we", "were", "which", "will", "with", "yet",
];

lazy_static! {
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Splits text into its distinct words
///
/// The text is normalized first, then split into maximal runs of word
/// characters. Each word is returned once, in order of first occurrence.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let mut seen = HashSet::new();
    WORD.find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// What to do with a course code that has no entry in the course map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Log the code once and leave the index untouched
    #[default]
    Skip,
    /// Fail with [`CrawlError::UnmappedCourse`]
    Strict,
}

/// Result of indexing one course text blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The blob was indexed; `added` counts new `(word, id)` associations
    Indexed { id: CourseId, added: usize },
    /// The code is not in the course map and the blob was skipped
    Unmapped,
}

/// Feeds course text blobs into an [`InvertedIndex`]
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    map: CodeIdMap,
    policy: MissPolicy,
    unmapped: HashSet<String>,
}

impl IndexBuilder {
    pub fn new(map: CodeIdMap, policy: MissPolicy) -> Self {
        Self {
            map,
            policy,
            unmapped: HashSet::new(),
        }
    }

    /// Indexes one text blob of a course
    ///
    /// Every distinct non-stopword of `text` is associated with the course's
    /// ID. Indexing the same `(code, text)` twice leaves the index unchanged
    /// after the first call.
    pub fn index_course(
        &mut self,
        code: &str,
        text: &str,
        index: &mut InvertedIndex,
    ) -> Result<IndexOutcome, CrawlError> {
        let id = match self.map.get(code) {
            Some(id) => id,
            None => return self.unmapped(code),
        };

        let added = tokenize(text)
            .iter()
            .filter(|token| !is_stopword(token))
            .filter(|token| index.insert(token, id))
            .count();

        tracing::trace!("Indexed {} ({}): {} new associations", code, id, added);
        Ok(IndexOutcome::Indexed { id, added })
    }

    fn unmapped(&mut self, code: &str) -> Result<IndexOutcome, CrawlError> {
        match self.policy {
            MissPolicy::Strict => Err(CrawlError::UnmappedCourse {
                code: code.to_string(),
            }),
            MissPolicy::Skip => {
                if self.unmapped.insert(code.to_string()) {
                    tracing::warn!("Course code {} is not in the course map, skipping", code);
                }
                Ok(IndexOutcome::Unmapped)
            }
        }
    }

    /// Distinct course codes skipped because they are not in the course map
    pub fn unmapped_codes(&self) -> usize {
        self.unmapped.len()
    }

    pub fn course_map(&self) -> &CodeIdMap {
        &self.map
    }
}
