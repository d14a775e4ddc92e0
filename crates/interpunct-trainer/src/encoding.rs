//! # Subword Encoding
//!
//! The subword tokenizer is a black box: text goes in, token ids and an
//! attention mask come out. [`HfSubwordEncoder`] backs it with a Hugging
//! Face `tokenizer.json`; tests and callers with their own tokenizer can
//! implement [`SubwordEncoder`] directly.

use std::path::Path;

use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer as HfTokenizer, TruncationParams};
use tracing::debug;

use crate::error::{Result, TrainerError};

/// Token ids and attention mask for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubwordEncoding {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
}

impl SubwordEncoding {
    /// Padded length of the encoding.
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

/// Turns a batch of texts into equally long subword encodings.
///
/// Implementations must prepend exactly one start token to every text and
/// pad all encodings of a batch to the same length.
pub trait SubwordEncoder {
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<SubwordEncoding>>;
}

/// [`SubwordEncoder`] backed by a Hugging Face tokenizer.
pub struct HfSubwordEncoder {
    tokenizer: HfTokenizer,
}

impl HfSubwordEncoder {
    /// Load a `tokenizer.json` and configure batch padding.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        pad_length: usize,
        max_length: usize,
    ) -> Result<Self> {
        let tokenizer = HfTokenizer::from_file(path.as_ref())
            .map_err(|e| TrainerError::Tokenizer(e.to_string()))?;
        Self::new(tokenizer, pad_length, max_length)
    }

    /// Wrap a tokenizer, padding each batch to its longest sequence rounded
    /// up to a multiple of `pad_length` and truncating at `max_length`.
    pub fn new(mut tokenizer: HfTokenizer, pad_length: usize, max_length: usize) -> Result<Self> {
        if pad_length == 0 {
            return Err(TrainerError::InvalidConfig(
                "pad length must be positive".into(),
            ));
        }

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            pad_to_multiple_of: Some(pad_length),
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| TrainerError::Tokenizer(e.to_string()))?;

        Ok(Self { tokenizer })
    }
}

impl SubwordEncoder for HfSubwordEncoder {
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<SubwordEncoding>> {
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let encodings = self
            .tokenizer
            .encode_batch(inputs, true)
            .map_err(|e| TrainerError::Tokenizer(format!("encode error: {e}")))?;

        debug!(
            texts = texts.len(),
            length = encodings.first().map(|e| e.len()).unwrap_or(0),
            "encoded batch"
        );

        Ok(encodings
            .into_iter()
            .map(|encoding| SubwordEncoding {
                input_ids: encoding.get_ids().to_vec(),
                attention_mask: encoding.get_attention_mask().to_vec(),
            })
            .collect())
    }
}

/// One id per whitespace-separated word, framed by start and end ids and
/// padded to a multiple of `pad_length`.
#[cfg(test)]
pub(crate) struct WordEncoder {
    pub pad_length: usize,
}

#[cfg(test)]
impl SubwordEncoder for WordEncoder {
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<SubwordEncoding>> {
        let ids: Vec<Vec<u32>> = texts
            .iter()
            .map(|text| {
                let mut ids = vec![101];
                ids.extend(text.split_whitespace().map(|w| 1000 + w.len() as u32));
                ids.push(102);
                ids
            })
            .collect();

        let longest = ids.iter().map(Vec::len).max().unwrap_or(0);
        let length = longest.div_ceil(self.pad_length) * self.pad_length;

        Ok(ids
            .into_iter()
            .map(|mut input_ids| {
                let mut attention_mask = vec![1; input_ids.len()];
                input_ids.resize(length, 0);
                attention_mask.resize(length, 0);
                SubwordEncoding {
                    input_ids,
                    attention_mask,
                }
            })
            .collect())
    }
}
