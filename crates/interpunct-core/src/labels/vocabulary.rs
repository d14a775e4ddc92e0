//! # Label Vocabulary
//!
//! Closed mapping between label strings and integer codes. Codes are dense,
//! start at 1 and follow first-seen order over the fitting data; code 0 is
//! reserved for [`PAD`]. A vocabulary is immutable once built and is passed
//! by reference to every component that needs it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InterpunctError, Result};
use crate::labels::role::{LabelRole, SentinelLabels, PAD, PAD_CODE};

/// Frozen label ↔ code mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    /// Indexed by code; `labels[0]` is always [`PAD`].
    labels: Vec<String>,
    roles: Vec<LabelRole>,
    codes: HashMap<String, u32>,
}

/// Serialized form consumed by the model layer (`id2label` / `label2id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyFile {
    pub id2label: BTreeMap<u32, String>,
    pub label2id: BTreeMap<String, u32>,
    pub num_labels: usize,
}

impl LabelVocabulary {
    /// Fit a vocabulary with the default sentinel labels.
    ///
    /// # Examples
    /// ```
    /// use interpunct_core::labels::LabelVocabulary;
    ///
    /// let train = vec![
    ///     vec!["<none>".to_string(), "<comma>".to_string()],
    ///     vec!["<full_stop>".to_string(), "<none>".to_string()],
    /// ];
    /// let vocab = LabelVocabulary::fit(&train).unwrap();
    ///
    /// assert_eq!(vocab.code_of("<none>"), Some(1));
    /// assert_eq!(vocab.code_of("<comma>"), Some(2));
    /// assert_eq!(vocab.decode(0), Some("<pad>"));
    /// assert_eq!(vocab.num_labels(), 4);
    /// ```
    pub fn fit<I>(sequences: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[String]>,
    {
        Self::fit_with(sequences, &SentinelLabels::default())
    }

    /// Fit a vocabulary, assigning roles from the given sentinel set.
    pub fn fit_with<I>(sequences: I, sentinels: &SentinelLabels) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[String]>,
    {
        let mut vocab = Self::empty();

        for sequence in sequences {
            for label in sequence.as_ref() {
                if label == PAD {
                    return Err(InterpunctError::ReservedLabel(label.clone()));
                }
                if vocab.codes.contains_key(label.as_str()) {
                    continue;
                }
                vocab.push(label.clone(), sentinels.role_of(label));
            }
        }

        debug!(labels = vocab.num_labels(), "fitted label vocabulary");
        Ok(vocab)
    }

    /// Rebuild a frozen vocabulary from its serialized form.
    ///
    /// The codes must be dense, code 0 must be [`PAD`] and both directions
    /// of the mapping must agree.
    pub fn from_file(file: &VocabularyFile, sentinels: &SentinelLabels) -> Result<Self> {
        if file.id2label.len() != file.num_labels || file.label2id.len() != file.num_labels {
            return Err(InterpunctError::InvalidVocabulary(format!(
                "num_labels is {} but id2label has {} and label2id has {} entries",
                file.num_labels,
                file.id2label.len(),
                file.label2id.len()
            )));
        }

        match file.id2label.get(&PAD_CODE) {
            Some(label) if label == PAD => {}
            other => {
                return Err(InterpunctError::InvalidVocabulary(format!(
                    "code 0 must map to {PAD:?}, found {other:?}"
                )));
            }
        }
        if file.label2id.get(PAD) != Some(&PAD_CODE) {
            return Err(InterpunctError::InvalidVocabulary(format!(
                "label2id must map {PAD:?} to {PAD_CODE}"
            )));
        }

        let mut vocab = Self::empty();
        for (expected, (&code, label)) in (1u32..).zip(file.id2label.iter().skip(1)) {
            if code != expected {
                return Err(InterpunctError::InvalidVocabulary(format!(
                    "codes are not dense: expected {expected}, found {code}"
                )));
            }
            if file.label2id.get(label) != Some(&code) {
                return Err(InterpunctError::InvalidVocabulary(format!(
                    "label2id disagrees with id2label for {label:?}"
                )));
            }
            if label == PAD || vocab.codes.contains_key(label.as_str()) {
                return Err(InterpunctError::InvalidVocabulary(format!(
                    "label {label:?} is mapped more than once"
                )));
            }
            vocab.push(label.clone(), sentinels.role_of(label));
        }

        Ok(vocab)
    }

    /// Serialized `id2label` / `label2id` view.
    pub fn to_file(&self) -> VocabularyFile {
        let id2label = self
            .labels
            .iter()
            .enumerate()
            .map(|(code, label)| (code as u32, label.clone()))
            .collect();
        let label2id = self
            .labels
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as u32))
            .collect();

        VocabularyFile {
            id2label,
            label2id,
            num_labels: self.num_labels(),
        }
    }

    /// Encode a label sequence, failing on any label unseen at fit time.
    pub fn encode<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<u32>> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.code_of(label)
                    .filter(|&code| code != PAD_CODE)
                    .ok_or_else(|| InterpunctError::UnknownLabel(label.to_string()))
            })
            .collect()
    }

    /// Label string for a code.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.labels.get(code as usize).map(String::as_str)
    }

    /// Code for a label string.
    pub fn code_of(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Role of a code.
    pub fn role(&self, code: u32) -> Option<LabelRole> {
        self.roles.get(code as usize).copied()
    }

    /// Total number of codes, padding included (`K + 1`).
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Iterate over `(code, label, role)` triples in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str, LabelRole)> + '_ {
        self.labels
            .iter()
            .zip(self.roles.iter())
            .enumerate()
            .map(|(code, (label, role))| (code as u32, label.as_str(), *role))
    }

    fn empty() -> Self {
        let mut vocab = Self {
            labels: Vec::new(),
            roles: Vec::new(),
            codes: HashMap::new(),
        };
        vocab.push(PAD.to_string(), LabelRole::Padding);
        vocab
    }

    fn push(&mut self, label: String, role: LabelRole) {
        let code = self.labels.len() as u32;
        self.codes.insert(label.clone(), code);
        self.labels.push(label);
        self.roles.push(role);
    }
}
