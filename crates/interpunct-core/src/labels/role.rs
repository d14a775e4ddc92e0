//! # Label Roles
//!
//! Every code in a fitted vocabulary carries a role. Roles decide which
//! classes take part in the aggregate score, so filtering is a structural
//! check on the role instead of a comparison against label strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label given to words that no tag marker follows.
pub const NO_TAG: &str = "<none>";

/// Label of the "pure punctuation" sentinel class.
pub const PUNCTUATION_ONLY: &str = "<dots>";

/// Reserved label for code 0. Never present in corpus data.
pub const PAD: &str = "<pad>";

/// Code reserved for padding positions.
pub const PAD_CODE: u32 = 0;

/// Role of a label within the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelRole {
    /// A real tag that is scored.
    Content,
    /// The default label of untagged words.
    NoTag,
    /// The punctuation-only sentinel.
    PunctuationOnly,
    /// The reserved padding class.
    Padding,
}

impl LabelRole {
    /// Whether classes with this role count towards the aggregate F1.
    pub fn is_scored(&self) -> bool {
        matches!(self, LabelRole::Content)
    }
}

impl fmt::Display for LabelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelRole::Content => write!(f, "content"),
            LabelRole::NoTag => write!(f, "no-tag"),
            LabelRole::PunctuationOnly => write!(f, "punctuation-only"),
            LabelRole::Padding => write!(f, "padding"),
        }
    }
}

/// The label strings that receive the non-content roles.
///
/// Padding is always [`PAD`]; the other two may be overridden for corpora
/// that spell their sentinels differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelLabels {
    pub no_tag: String,
    pub punctuation_only: String,
}

impl Default for SentinelLabels {
    fn default() -> Self {
        Self {
            no_tag: NO_TAG.to_string(),
            punctuation_only: PUNCTUATION_ONLY.to_string(),
        }
    }
}

impl SentinelLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label used for untagged words.
    pub fn with_no_tag(mut self, label: impl Into<String>) -> Self {
        self.no_tag = label.into();
        self
    }

    /// Set the punctuation-only sentinel label.
    pub fn with_punctuation_only(mut self, label: impl Into<String>) -> Self {
        self.punctuation_only = label.into();
        self
    }

    /// Role for a label string.
    pub fn role_of(&self, label: &str) -> LabelRole {
        if label == PAD {
            LabelRole::Padding
        } else if label == self.no_tag {
            LabelRole::NoTag
        } else if label == self.punctuation_only {
            LabelRole::PunctuationOnly
        } else {
            LabelRole::Content
        }
    }
}
