use thiserror::Error;

use interpunct_core::InterpunctError;

/// Errors raised while preparing or scoring datasets.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Alignment, vocabulary or metric failure from the core pipeline.
    #[error(transparent)]
    Core(#[from] InterpunctError),

    /// A corpus line could not be extracted.
    #[error("corpus line {line}: {source}")]
    CorpusLine {
        /// 1-based line number in the corpus file.
        line: usize,
        source: InterpunctError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The subword tokenizer failed to load or encode.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("tensor error: {0}")]
    Candle(#[from] candle_core::Error),

    /// Train and test splits were padded to different lengths.
    #[error("train length with padding is {train} while test length is {test}")]
    PadLengthMismatch { train: usize, test: usize },

    /// The encoder returned encodings that do not match the examples.
    #[error("encoder output mismatch: {0}")]
    EncodingMismatch(String),

    #[error("dataset index {index} out of range for {len} examples")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for trainer operations.
pub type Result<T> = std::result::Result<T, TrainerError>;
