//! File names and readers/writers for prepared artifacts.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use interpunct_core::{LabelVocabulary, SentinelLabels, VocabularyFile};

use crate::error::Result;

pub const VOCAB_FILE: &str = "vocab.json";
pub const TRAIN_FILE: &str = "train.jsonl";
pub const TEST_FILE: &str = "test.jsonl";
pub const LM_FILE: &str = "lm.jsonl";

/// Write the `id2label` / `label2id` interchange file.
pub fn write_vocabulary<P: AsRef<Path>>(path: P, vocabulary: &LabelVocabulary) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &vocabulary.to_file())?;
    Ok(())
}

/// Load a frozen vocabulary from its interchange file.
pub fn read_vocabulary<P: AsRef<Path>>(
    path: P,
    sentinels: &SentinelLabels,
) -> Result<LabelVocabulary> {
    let reader = BufReader::new(File::open(path)?);
    let file: VocabularyFile = serde_json::from_reader(reader)?;
    Ok(LabelVocabulary::from_file(&file, sentinels)?)
}
