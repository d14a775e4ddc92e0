//! # Interpunct Trainer
//!
//! Corpus preparation and evaluation tooling around `interpunct-core`.
//! Reads tag-annotated corpus files, encodes them with a subword tokenizer,
//! aligns labels to the padded encodings and scores model outputs.

pub mod artifacts;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod evaluation;
pub mod prepare;

pub use config::{LmSchedule, PrepareConfig};
pub use corpus::{read_corpus, Corpus};
pub use dataset::{DatasetItem, DatasetRecord, LabeledDataset};
pub use encoding::{HfSubwordEncoder, SubwordEncoder, SubwordEncoding};
pub use error::{Result, TrainerError};
pub use evaluation::{evaluate_records, evaluate_tensors, read_predictions, PredictionRecord};
pub use prepare::{prepare, prepare_corpora, run_prepare, write_prepared, PreparedData};
