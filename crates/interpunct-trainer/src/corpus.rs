//! Corpus loading for tag-annotated text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use interpunct_core::{AnnotatedExample, TagExtractor};
use tracing::info;

use crate::error::{Result, TrainerError};

/// Examples extracted from one corpus file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    examples: Vec<AnnotatedExample>,
}

impl Corpus {
    pub fn new(examples: Vec<AnnotatedExample>) -> Self {
        Self { examples }
    }

    /// Extract examples from an iterator of lines.
    ///
    /// Reads at most `max_lines` lines. Empty lines yield empty examples so
    /// line numbers and example indices stay in step.
    pub fn from_lines<I, S>(lines: I, start_index: usize, max_lines: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let limit = max_lines.unwrap_or(usize::MAX);
        extract_lines(lines.into_iter().take(limit).map(Ok), start_index)
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[AnnotatedExample] {
        &self.examples
    }

    pub fn words(&self) -> impl Iterator<Item = &Vec<String>> + '_ {
        self.examples.iter().map(|e| &e.words)
    }

    /// Label sequences, one per example.
    pub fn labels(&self) -> impl Iterator<Item = &Vec<String>> + '_ {
        self.examples.iter().map(|e| &e.labels)
    }

    /// Tokenizer input: each example's words joined by single spaces.
    pub fn texts(&self) -> Vec<String> {
        self.examples.iter().map(AnnotatedExample::text).collect()
    }

    /// Append another corpus after this one.
    pub fn extend(&mut self, other: Corpus) {
        self.examples.extend(other.examples);
    }

    pub fn into_examples(self) -> Vec<AnnotatedExample> {
        self.examples
    }
}

/// Load a corpus file.
///
/// # Arguments
/// * `start_index` - Leading fields to drop from every line
/// * `max_lines` - Stop after this many lines
pub fn read_corpus<P: AsRef<Path>>(
    path: P,
    start_index: usize,
    max_lines: Option<usize>,
) -> Result<Corpus> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let lines = reader
        .lines()
        .take(max_lines.unwrap_or(usize::MAX))
        .map(|line| line.map_err(TrainerError::from));
    let corpus = extract_lines(lines, start_index)?;

    info!(
        path = %path.display(),
        examples = corpus.len(),
        "loaded corpus"
    );
    Ok(corpus)
}

/// Extract each line in turn, numbering errors from 1.
fn extract_lines<I, S>(lines: I, start_index: usize) -> Result<Corpus>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let extractor = TagExtractor::new();
    let mut examples = Vec::new();

    for (i, line) in lines.into_iter().enumerate() {
        let line = line?;
        let example = extractor
            .extract(line.as_ref(), start_index)
            .map_err(|source| TrainerError::CorpusLine { line: i + 1, source })?;
        examples.push(example);
    }

    Ok(Corpus { examples })
}
