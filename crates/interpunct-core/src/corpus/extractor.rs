//! # Tag Extractor
//!
//! Splits a corpus line into words and per-word labels. Inline tag markers
//! such as `<comma>` or `<full_stop>` are removed from the word stream and
//! attached to the word that precedes them.

use crate::corpus::AnnotatedExample;
use crate::error::{InterpunctError, Result};
use crate::labels::NO_TAG;

/// Character that turns a token into a tag marker.
pub const TAG_MARKER: char = '<';

/// Returns `true` if the token is a tag marker rather than a word.
pub fn is_tag_marker(token: &str) -> bool {
    token.contains(TAG_MARKER)
}

/// Extractor for tag-annotated corpus lines.
#[derive(Debug, Clone, Default)]
pub struct TagExtractor;

impl TagExtractor {
    /// Create a new extractor instance.
    pub fn new() -> Self {
        Self
    }

    /// Extract the word and label sequences from one corpus line.
    ///
    /// # Arguments
    /// * `line` - Whitespace-separated corpus line
    /// * `start_index` - Number of leading fields to drop (utterance ids etc.)
    ///
    /// # Errors
    /// Returns [`InterpunctError::MalformedLine`] when a tag marker appears
    /// before any word.
    ///
    /// # Examples
    /// ```
    /// use interpunct_core::corpus::TagExtractor;
    ///
    /// let example = TagExtractor::new()
    ///     .extract("0 hello world <comma> foo", 1)
    ///     .unwrap();
    /// assert_eq!(example.words, ["hello", "world", "foo"]);
    /// assert_eq!(example.labels, ["<none>", "<comma>", "<none>"]);
    /// ```
    pub fn extract(&self, line: &str, start_index: usize) -> Result<AnnotatedExample> {
        let fields = line.split_whitespace().skip(start_index);

        let mut words: Vec<String> = Vec::new();
        let mut labels: Vec<String> = Vec::new();

        // `field` walks the raw token stream, `last_word` points at the most
        // recently emitted word. Markers never advance `last_word`.
        let mut last_word: Option<usize> = None;

        for (field, raw) in fields.enumerate() {
            let token = raw.to_lowercase();

            if is_tag_marker(&token) {
                let target = last_word.ok_or_else(|| InterpunctError::MalformedLine {
                    marker: token.clone(),
                    field,
                })?;
                labels[target] = token;
            } else {
                last_word = Some(words.len());
                words.push(token);
                labels.push(NO_TAG.to_string());
            }
        }

        Ok(AnnotatedExample { words, labels })
    }
}
