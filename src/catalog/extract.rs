//! Course block extraction from catalog markup
//!
//! A catalog page lists courses as `div.courseblock` elements holding a
//! `p.courseblocktitle` (code and title) and zero or more `p.courseblockdesc`
//! paragraphs. A sequence is written as a header block followed by (or
//! wrapping) `div.courseblock.subsequence` blocks; every course of the
//! sequence is indexed with the header's text as well as its own.

use crate::catalog::text::normalize;
use crate::catalog::CoursePage;
use crate::config::DEFAULT_CODE_PATTERN;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

lazy_static! {
    static ref BLOCK: Selector = Selector::parse("div.courseblock").expect("valid selector");
    static ref TITLE: Selector = Selector::parse("p.courseblocktitle").expect("valid selector");
    static ref DESC: Selector = Selector::parse("p.courseblockdesc").expect("valid selector");
}

const BLOCK_CLASS: &str = "courseblock";
const SUBSEQUENCE_CLASS: &str = "subsequence";

/// Extracts course records from parsed catalog pages
#[derive(Debug, Clone)]
pub struct CourseExtractor {
    code_pattern: Regex,
}

impl Default for CourseExtractor {
    fn default() -> Self {
        Self {
            code_pattern: Regex::new(DEFAULT_CODE_PATTERN).expect("valid default code pattern"),
        }
    }
}

impl CourseExtractor {
    /// Creates an extractor recognising course codes with `pattern`
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            code_pattern: Regex::new(pattern)?,
        })
    }

    /// Parses `html` and extracts its courses
    pub fn extract_html(&self, html: &str) -> CoursePage {
        self.extract(&Html::parse_document(html))
    }

    /// Extracts every course block of a parsed page
    ///
    /// Blocks are visited in document order. A block with a title adds its
    /// text blob under its own code; then every subsequence block it heads
    /// receives that same blob under the subsequence's code.
    pub fn extract(&self, document: &Html) -> CoursePage {
        let mut page = CoursePage::new();

        for block in document.select(&BLOCK) {
            let (code, title) = self.code_and_title(block).unwrap_or_default();
            let text = join_text(&title, &description(block));

            page.add(&code, text.clone());

            for sub in subsequences(block) {
                if let Some((sub_code, _)) = self.code_and_title(sub) {
                    page.add(&sub_code, text.clone());
                }
            }
        }

        page
    }

    /// Finds the block's course code and cleaned title
    ///
    /// Returns `None` when the block has no title of its own. A title without
    /// a recognisable code yields an empty code.
    fn code_and_title(&self, block: ElementRef<'_>) -> Option<(String, String)> {
        let title_node = block
            .select(&TITLE)
            .find(|title| owned_by(*title, block))?;
        let raw = title_node.text().collect::<String>().replace('\u{a0}', " ");

        let codes: Vec<&str> = self
            .code_pattern
            .find_iter(&raw)
            .map(|m| m.as_str())
            .collect();

        if codes.len() > 1 {
            tracing::warn!(
                "Multiple course codes {:?} in one title, using {}",
                codes,
                codes[0]
            );
        }

        let code = codes.first().map(|c| c.to_string()).unwrap_or_default();
        let title = self.code_pattern.replace_all(&raw, "").trim().to_string();

        Some((code, title))
    }
}

/// Concatenated, normalized text of the block's own description paragraphs
fn description(block: ElementRef<'_>) -> String {
    block
        .select(&DESC)
        .filter(|desc| owned_by(*desc, block))
        .map(|desc| normalize(&desc.text().collect::<String>()).trim().to_string())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_text(title: &str, description: &str) -> String {
    match (title.is_empty(), description.is_empty()) {
        (true, _) => description.to_string(),
        (_, true) => title.to_string(),
        _ => format!("{} {}", title, description),
    }
}

/// Blocks whose courses inherit `block`'s text
///
/// These are the subsequence blocks directly owned by `block` (their nearest
/// enclosing course block is `block`), followed by the run of subsequence
/// blocks right after it. A block that is itself a subsequence never heads its
/// following siblings.
fn subsequences<'a>(block: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut found: Vec<ElementRef<'a>> = block
        .select(&BLOCK)
        .filter(|sub| has_class(*sub, SUBSEQUENCE_CLASS) && owned_by(*sub, block))
        .collect();

    if has_class(block, SUBSEQUENCE_CLASS) {
        return found;
    }

    for sibling in block.next_siblings() {
        match sibling.value() {
            Node::Text(text) if text.trim().is_empty() => continue,
            Node::Comment(_) => continue,
            Node::Element(_) => match ElementRef::wrap(sibling) {
                Some(el) if is_block(el) && has_class(el, SUBSEQUENCE_CLASS) => found.push(el),
                _ => break,
            },
            _ => break,
        }
    }

    found
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn is_block(el: ElementRef<'_>) -> bool {
    el.value().name() == "div" && has_class(el, BLOCK_CLASS)
}

/// True when the nearest course block enclosing `node` is `block`
///
/// Only strict ancestors count, so a block is never owned by itself.
fn owned_by(node: ElementRef<'_>, block: ElementRef<'_>) -> bool {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| is_block(*el))
        .is_some_and(|owner| (*owner).id() == (*block).id())
}
