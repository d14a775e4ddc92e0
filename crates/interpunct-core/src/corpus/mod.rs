pub mod extractor;

use serde::{Deserialize, Serialize};

pub use extractor::{is_tag_marker, TagExtractor, TAG_MARKER};

/// One corpus line after tag extraction.
///
/// `words` and `labels` always have the same length; every word carries
/// exactly one label, `"<none>"` when no marker followed it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotatedExample {
    pub words: Vec<String>,
    pub labels: Vec<String>,
}

impl AnnotatedExample {
    /// Number of words in the example.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces, the form handed to subword tokenizers.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}
