pub mod role;
pub mod vocabulary;

pub use role::{LabelRole, SentinelLabels, NO_TAG, PAD, PAD_CODE, PUNCTUATION_ONLY};
pub use vocabulary::{LabelVocabulary, VocabularyFile};
