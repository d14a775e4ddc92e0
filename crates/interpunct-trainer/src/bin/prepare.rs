//! Interpunct dataset preparation
//!
//! Reads tag-annotated train/test corpora (plus an optional LM corpus),
//! encodes them with a Hugging Face tokenizer and writes the label
//! vocabulary and aligned datasets to an output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use interpunct_core::SentinelLabels;
use interpunct_trainer::config::{DEFAULT_LM_LENGTH, DEFAULT_MAX_LENGTH, DEFAULT_PAD_LENGTH};
use interpunct_trainer::{run_prepare, LmSchedule, PrepareConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "interpunct-prepare")]
#[command(about = "Prepare punctuation-tag corpora for token classification")]
#[command(version)]
struct Cli {
    /// Training corpus
    #[arg(long, env = "INTERPUNCT_TRAIN_SET", default_value = "train.txt")]
    train_set: PathBuf,

    /// Evaluation corpus
    #[arg(long, env = "INTERPUNCT_TEST_SET", default_value = "dev.txt")]
    test_set: PathBuf,

    /// Language-model corpus (lines without an id field)
    #[arg(long, env = "INTERPUNCT_LM_SET")]
    lm_set: Option<PathBuf>,

    /// Lines read from the LM corpus
    #[arg(long, env = "INTERPUNCT_LM_LENGTH", default_value_t = DEFAULT_LM_LENGTH)]
    lm_length: usize,

    /// -1 merges the LM corpus into train; otherwise it is written as its own split
    #[arg(
        long,
        env = "INTERPUNCT_LM_EPOCHS",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    lm_epochs: i64,

    /// Leading fields dropped from train and test lines
    #[arg(long, env = "INTERPUNCT_START_INDEX", default_value_t = 1)]
    start_index: usize,

    /// Cap on lines read from train and test
    #[arg(long, env = "INTERPUNCT_MAX_LINES")]
    max_lines: Option<usize>,

    /// Padded lengths are rounded up to a multiple of this
    #[arg(long, env = "INTERPUNCT_PAD_LENGTH", default_value_t = DEFAULT_PAD_LENGTH)]
    pad_length: usize,

    /// Tokenizer truncation length
    #[arg(long, env = "INTERPUNCT_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Hugging Face tokenizer.json
    #[arg(short, long, env = "INTERPUNCT_TOKENIZER")]
    tokenizer: PathBuf,

    /// Output directory
    #[arg(short, long, env = "INTERPUNCT_OUTPUT_DIR", default_value = "prepared")]
    output_dir: PathBuf,

    /// Label marking a word with no following tag
    #[arg(long, env = "INTERPUNCT_NO_TAG", default_value = interpunct_core::labels::NO_TAG)]
    no_tag: String,

    /// Label marking a punctuation-only token
    #[arg(
        long,
        env = "INTERPUNCT_PUNCTUATION_ONLY",
        default_value = interpunct_core::labels::PUNCTUATION_ONLY
    )]
    punctuation_only: String,
}

impl Cli {
    fn into_config(self) -> Result<PrepareConfig> {
        let schedule = LmSchedule::from_epochs(self.lm_epochs)?;
        let sentinels = SentinelLabels::new()
            .with_no_tag(self.no_tag)
            .with_punctuation_only(self.punctuation_only);

        let mut config = PrepareConfig::new()
            .with_train_set(self.train_set)
            .with_test_set(self.test_set)
            .with_lm_schedule(schedule)
            .with_start_index(self.start_index)
            .with_max_lines(self.max_lines)
            .with_pad_length(self.pad_length)
            .with_max_length(self.max_length)
            .with_tokenizer(self.tokenizer)
            .with_output_dir(self.output_dir)
            .with_sentinels(sentinels);
        if let Some(lm_set) = self.lm_set {
            config = config.with_lm_set(lm_set, self.lm_length);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Cli::parse().into_config()?;
    info!(
        train = %config.train_set.display(),
        test = %config.test_set.display(),
        "preparing datasets"
    );

    let data = run_prepare(&config)
        .with_context(|| format!("failed to prepare {}", config.output_dir.display()))?;

    println!(
        "Prepared {} train / {} test examples ({} labels, length {}) in {}",
        data.train.len(),
        data.test.len(),
        data.vocabulary.num_labels(),
        data.train.length(),
        config.output_dir.display()
    );
    Ok(())
}
