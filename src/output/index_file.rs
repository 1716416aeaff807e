//! Serialized form of the inverted index
//!
//! One header line `ID|word`, then one `id|word` line per association. Words
//! come in the index's insertion order and, within a word, IDs in the order
//! they were added.

use crate::index::InvertedIndex;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header line of the index file
pub const INDEX_HEADER: &str = "ID|word";

/// Renders the index to its text form
///
/// An empty index renders as the header line alone.
pub fn render_index(index: &InvertedIndex) -> String {
    let mut out = String::with_capacity(16 * (index.association_count() + 1));
    out.push_str(INDEX_HEADER);
    out.push('\n');

    for (word, ids) in index.iter() {
        for id in ids {
            out.push_str(&format!("{}|{}\n", id, word));
        }
    }

    out
}

/// Writes the index to `path`, replacing any existing file
///
/// Returns the number of association rows written.
pub fn write_index(index: &InvertedIndex, path: &Path) -> OutputResult<usize> {
    let rendered = render_index(index);

    let mut file = File::create(path)?;
    file.write_all(rendered.as_bytes())?;

    let rows = index.association_count();
    tracing::info!("Wrote {} index rows to {}", rows, path.display());
    Ok(rows)
}
