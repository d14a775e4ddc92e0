//! Interpunct evaluation
//!
//! Scores a JSON-lines file of `{"gold": [...], "probs": [[...], ...]}`
//! records against a prepared label vocabulary and prints the metric map.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use interpunct_core::{EvaluatorConfig, MetricEvaluator, ScoringWindow, SentinelLabels};
use interpunct_trainer::artifacts::read_vocabulary;
use interpunct_trainer::{evaluate_records, read_predictions};

#[derive(Clone, Copy, ValueEnum)]
enum Window {
    /// First n positions, n being the number of gold labels
    Prefix,
    /// Positions where gold is not padding
    GoldMask,
}

impl From<Window> for ScoringWindow {
    fn from(window: Window) -> Self {
        match window {
            Window::Prefix => ScoringWindow::Prefix,
            Window::GoldMask => ScoringWindow::GoldMask,
        }
    }
}

#[derive(Parser)]
#[command(name = "interpunct-evaluate")]
#[command(about = "Score punctuation-tag predictions with role-filtered F1")]
#[command(version)]
struct Cli {
    /// vocab.json written by interpunct-prepare
    #[arg(short, long, env = "INTERPUNCT_VOCAB", default_value = "prepared/vocab.json")]
    vocab: PathBuf,

    /// JSON-lines prediction records
    #[arg(short, long, env = "INTERPUNCT_PREDICTIONS")]
    predictions: PathBuf,

    /// Which prediction positions are scored
    #[arg(short, long, value_enum, default_value = "prefix")]
    window: Window,

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

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let sentinels = SentinelLabels::new()
        .with_no_tag(cli.no_tag)
        .with_punctuation_only(cli.punctuation_only);

    let vocabulary = read_vocabulary(&cli.vocab, &sentinels)
        .with_context(|| format!("failed to load vocabulary {}", cli.vocab.display()))?;

    let file = File::open(&cli.predictions)
        .with_context(|| format!("failed to open {}", cli.predictions.display()))?;
    let records = read_predictions(BufReader::new(file))?;

    let evaluator = MetricEvaluator::with_config(
        &vocabulary,
        EvaluatorConfig::new().with_window(cli.window.into()),
    );
    let report = evaluate_records(&evaluator, &records)?;

    println!("{}", serde_json::to_string_pretty(&report.to_map())?);
    Ok(())
}
