//! Run configuration for dataset preparation.

use std::path::PathBuf;

use interpunct_core::SentinelLabels;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainerError};

/// Default number of lines read from the LM corpus (the size of the
/// training split it is usually paired with).
pub const DEFAULT_LM_LENGTH: usize = 162_260;

/// Default multiple the tokenizer pads to.
pub const DEFAULT_PAD_LENGTH: usize = 256;

/// Default tokenizer truncation length.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// How LM corpus examples are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LmSchedule {
    /// Append the LM examples to the training split.
    Merge,
    /// Keep the LM examples as their own split, trained for `epochs` epochs.
    Separate { epochs: u32 },
}

impl LmSchedule {
    /// Map the command-line epoch count: `-1` merges, anything else is a
    /// separate split.
    pub fn from_epochs(epochs: i64) -> Result<Self> {
        match epochs {
            -1 => Ok(Self::Merge),
            n if n >= 0 => Ok(Self::Separate {
                epochs: u32::try_from(n)
                    .map_err(|_| TrainerError::InvalidConfig(format!("lm epochs {n} too large")))?,
            }),
            n => Err(TrainerError::InvalidConfig(format!(
                "lm epochs must be -1 or non-negative, got {n}"
            ))),
        }
    }
}

/// Configuration for [`crate::prepare`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub train_set: PathBuf,
    pub test_set: PathBuf,
    /// Optional language-model corpus read without a leading id field.
    pub lm_set: Option<PathBuf>,
    /// Maximum number of LM corpus lines.
    pub lm_length: usize,
    pub lm_schedule: LmSchedule,
    /// Leading fields dropped from train and test lines.
    pub start_index: usize,
    /// Cap on lines read from train and test.
    pub max_lines: Option<usize>,
    /// Padded sequence lengths are rounded up to a multiple of this.
    pub pad_length: usize,
    pub max_length: usize,
    /// Path to a `tokenizer.json`.
    pub tokenizer: PathBuf,
    pub output_dir: PathBuf,
    pub sentinels: SentinelLabels,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            train_set: PathBuf::from("train.txt"),
            test_set: PathBuf::from("dev.txt"),
            lm_set: None,
            lm_length: DEFAULT_LM_LENGTH,
            lm_schedule: LmSchedule::Merge,
            start_index: 1,
            max_lines: None,
            pad_length: DEFAULT_PAD_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            tokenizer: PathBuf::from("tokenizer.json"),
            output_dir: PathBuf::from("prepared"),
            sentinels: SentinelLabels::default(),
        }
    }
}

impl PrepareConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_train_set(mut self, path: impl Into<PathBuf>) -> Self {
        self.train_set = path.into();
        self
    }

    pub fn with_test_set(mut self, path: impl Into<PathBuf>) -> Self {
        self.test_set = path.into();
        self
    }

    /// Add an LM corpus capped at `lm_length` lines.
    pub fn with_lm_set(mut self, path: impl Into<PathBuf>, lm_length: usize) -> Self {
        self.lm_set = Some(path.into());
        self.lm_length = lm_length;
        self
    }

    pub fn with_lm_schedule(mut self, schedule: LmSchedule) -> Self {
        self.lm_schedule = schedule;
        self
    }

    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_pad_length(mut self, pad_length: usize) -> Self {
        self.pad_length = pad_length;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_tokenizer(mut self, path: impl Into<PathBuf>) -> Self {
        self.tokenizer = path.into();
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_sentinels(mut self, sentinels: SentinelLabels) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Reject settings the tokenizer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.pad_length == 0 {
            return Err(TrainerError::InvalidConfig(
                "pad length must be positive".into(),
            ));
        }
        if self.max_length < 2 {
            return Err(TrainerError::InvalidConfig(format!(
                "max length {} leaves no room for content",
                self.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrepareConfig::default();
        assert_eq!(config.train_set, PathBuf::from("train.txt"));
        assert_eq!(config.test_set, PathBuf::from("dev.txt"));
        assert_eq!(config.pad_length, 256);
        assert_eq!(config.start_index, 1);
        assert_eq!(config.lm_schedule, LmSchedule::Merge);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PrepareConfig::new()
            .with_train_set("a.txt")
            .with_lm_set("lm.txt", 10)
            .with_lm_schedule(LmSchedule::Separate { epochs: 2 })
            .with_pad_length(128)
            .with_max_lines(Some(5));

        assert_eq!(config.lm_set, Some(PathBuf::from("lm.txt")));
        assert_eq!(config.lm_length, 10);
        assert_eq!(config.pad_length, 128);
        assert_eq!(config.max_lines, Some(5));
    }

    #[test]
    fn test_zero_pad_length_rejected() {
        let config = PrepareConfig::new().with_pad_length(0);
        assert!(matches!(
            config.validate(),
            Err(TrainerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_lm_schedule_from_epochs() {
        assert_eq!(LmSchedule::from_epochs(-1).unwrap(), LmSchedule::Merge);
        assert_eq!(
            LmSchedule::from_epochs(3).unwrap(),
            LmSchedule::Separate { epochs: 3 }
        );
        assert!(LmSchedule::from_epochs(-2).is_err());
    }
}
