//! # Labeled Dataset
//!
//! Pairs subword encodings with label arrays aligned to the same padded
//! length, ready to be served to a token-classification training loop.

use std::io::Write;

use candle_core::{Device, Tensor};
use interpunct_core::{AnnotatedExample, LabelVocabulary, SequenceAligner};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoding::{SubwordEncoder, SubwordEncoding};
use crate::error::{Result, TrainerError};

/// One example as tensors.
#[derive(Debug, Clone)]
pub struct DatasetItem {
    /// `u32`, shape `[length]`.
    pub input_ids: Tensor,
    /// `u32`, shape `[length]`.
    pub attention_mask: Tensor,
    /// `i64`, shape `[length]`.
    pub labels: Tensor,
}

/// Serialized example, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub labels: Vec<u32>,
}

/// Encoded examples with aligned labels, all of one padded length.
#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    encodings: Vec<SubwordEncoding>,
    labels: Vec<Vec<u32>>,
    length: usize,
}

impl LabeledDataset {
    /// Encode the examples' texts and align their labels to the encoding
    /// length.
    pub fn build(
        examples: &[AnnotatedExample],
        vocabulary: &LabelVocabulary,
        encoder: &dyn SubwordEncoder,
    ) -> Result<Self> {
        let texts: Vec<String> = examples.iter().map(AnnotatedExample::text).collect();
        let encodings = encoder.encode_batch(&texts)?;

        if encodings.len() != examples.len() {
            return Err(TrainerError::EncodingMismatch(format!(
                "{} encodings for {} examples",
                encodings.len(),
                examples.len()
            )));
        }

        let length = encodings.first().map(SubwordEncoding::len).unwrap_or(0);
        if let Some((idx, e)) = encodings
            .iter()
            .enumerate()
            .find(|(_, e)| e.len() != length || e.attention_mask.len() != length)
        {
            return Err(TrainerError::EncodingMismatch(format!(
                "encoding {idx} has length {} but the batch is padded to {length}",
                e.len()
            )));
        }

        let aligner = SequenceAligner::new();
        let labels = examples
            .iter()
            .map(|example| -> Result<Vec<u32>> {
                let codes = vocabulary.encode(&example.labels)?;
                Ok(aligner.align(&codes, length)?)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(examples = examples.len(), length, "built labeled dataset");
        Ok(Self {
            encodings,
            labels,
            length,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Padded sequence length shared by every example.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Aligned label arrays.
    pub fn labels(&self) -> &[Vec<u32>] {
        &self.labels
    }

    pub fn encodings(&self) -> &[SubwordEncoding] {
        &self.encodings
    }

    /// Example `idx` as tensors on `device`.
    pub fn get(&self, idx: usize, device: &Device) -> Result<DatasetItem> {
        let (encoding, labels) = self
            .encodings
            .get(idx)
            .zip(self.labels.get(idx))
            .ok_or(TrainerError::IndexOutOfRange {
                index: idx,
                len: self.len(),
            })?;

        let labels: Vec<i64> = labels.iter().map(|&c| i64::from(c)).collect();
        Ok(DatasetItem {
            input_ids: Tensor::new(encoding.input_ids.as_slice(), device)?,
            attention_mask: Tensor::new(encoding.attention_mask.as_slice(), device)?,
            labels: Tensor::new(labels.as_slice(), device)?,
        })
    }

    /// Serializable records in dataset order.
    pub fn records(&self) -> impl Iterator<Item = DatasetRecord> + '_ {
        self.encodings
            .iter()
            .zip(&self.labels)
            .map(|(encoding, labels)| DatasetRecord {
                input_ids: encoding.input_ids.clone(),
                attention_mask: encoding.attention_mask.clone(),
                labels: labels.clone(),
            })
    }

    /// Write one JSON record per line.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in self.records() {
            serde_json::to_writer(&mut writer, &record)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::encoding::WordEncoder;
    use candle_core::DType;
    use interpunct_core::InterpunctError;
    use pretty_assertions::assert_eq;

    fn corpus() -> Corpus {
        Corpus::from_lines(
            ["0 hello world <comma> foo", "1 yes <full_stop>"],
            1,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_build_aligns_labels_after_start_token() {
        let corpus = corpus();
        let vocab = LabelVocabulary::fit(corpus.labels()).unwrap();
        let dataset =
            LabeledDataset::build(corpus.examples(), &vocab, &WordEncoder { pad_length: 8 })
                .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.length(), 8);
        // <none>=1, <comma>=2, <full_stop>=3
        assert_eq!(dataset.labels()[0], vec![0, 1, 2, 1, 0, 0, 0, 0]);
        assert_eq!(dataset.labels()[1], vec![0, 3, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_test_label_fails() {
        let train = corpus();
        let vocab = LabelVocabulary::fit(train.labels()).unwrap();
        let test = Corpus::from_lines(["0 what <question_mark>"], 1, None).unwrap();

        let err = LabeledDataset::build(test.examples(), &vocab, &WordEncoder { pad_length: 8 })
            .unwrap_err();
        assert!(matches!(
            err,
            TrainerError::Core(InterpunctError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_overflow_surfaces() {
        struct Truncating;
        impl SubwordEncoder for Truncating {
            fn encode_batch(&self, texts: &[String]) -> Result<Vec<SubwordEncoding>> {
                Ok(texts
                    .iter()
                    .map(|_| SubwordEncoding {
                        input_ids: vec![101, 7, 102],
                        attention_mask: vec![1, 1, 1],
                    })
                    .collect())
            }
        }

        let corpus = corpus();
        let vocab = LabelVocabulary::fit(corpus.labels()).unwrap();
        let err = LabeledDataset::build(corpus.examples(), &vocab, &Truncating).unwrap_err();
        assert!(matches!(
            err,
            TrainerError::Core(InterpunctError::AlignmentOverflow { .. })
        ));
    }

    #[test]
    fn test_get_returns_tensors() {
        let corpus = corpus();
        let vocab = LabelVocabulary::fit(corpus.labels()).unwrap();
        let dataset =
            LabeledDataset::build(corpus.examples(), &vocab, &WordEncoder { pad_length: 8 })
                .unwrap();

        let item = dataset.get(0, &Device::Cpu).unwrap();
        assert_eq!(item.input_ids.dims(), &[8]);
        assert_eq!(item.labels.dtype(), DType::I64);
        assert_eq!(
            item.labels.to_vec1::<i64>().unwrap(),
            vec![0, 1, 2, 1, 0, 0, 0, 0]
        );

        assert!(matches!(
            dataset.get(2, &Device::Cpu),
            Err(TrainerError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_write_jsonl() {
        let corpus = corpus();
        let vocab = LabelVocabulary::fit(corpus.labels()).unwrap();
        let dataset =
            LabeledDataset::build(corpus.examples(), &vocab, &WordEncoder { pad_length: 8 })
                .unwrap();

        let mut buf = Vec::new();
        dataset.write_jsonl(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let records: Vec<DatasetRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].labels, dataset.labels()[1]);
        assert_eq!(records[0].input_ids[0], 101);
    }
}
