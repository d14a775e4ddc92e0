//! # Sequence Aligner
//!
//! Places word-level label codes into the fixed-length label array that
//! accompanies a subword-tokenized example. Subword tokenizers prepend one
//! start token, so label `i` lands at position `i + 1`; position 0 and every
//! position after the last label stay at the padding code.
//!
//! Only the first subword of a multi-piece word lines up with its label.
//! The remaining pieces see padding or a neighbouring word's label; that
//! noise is accepted in exchange for not depending on how the tokenizer
//! splits words.

use crate::error::{InterpunctError, Result};
use crate::labels::PAD_CODE;

/// Offset introduced by the tokenizer's start token.
pub const START_OFFSET: usize = 1;

/// Aligns encoded label sequences onto padded tokenizer-length arrays.
#[derive(Debug, Clone, Default)]
pub struct SequenceAligner;

impl SequenceAligner {
    pub fn new() -> Self {
        Self
    }

    /// Align one encoded label sequence to `target_length` positions.
    ///
    /// # Errors
    /// [`InterpunctError::AlignmentOverflow`] when `target_length` cannot
    /// hold the start slot plus every label. Nothing is ever truncated.
    ///
    /// # Examples
    /// ```
    /// use interpunct_core::align::SequenceAligner;
    ///
    /// let aligned = SequenceAligner::new().align(&[3, 5], 6).unwrap();
    /// assert_eq!(aligned, vec![0, 3, 5, 0, 0, 0]);
    /// ```
    pub fn align(&self, encoded: &[u32], target_length: usize) -> Result<Vec<u32>> {
        let required = encoded.len() + START_OFFSET;
        if target_length < required {
            return Err(InterpunctError::AlignmentOverflow {
                required,
                target_length,
            });
        }

        let mut aligned = vec![PAD_CODE; target_length];
        aligned[START_OFFSET..required].copy_from_slice(encoded);
        Ok(aligned)
    }

    /// Align every sequence of a batch to the same length.
    pub fn align_batch<S: AsRef<[u32]>>(
        &self,
        batch: &[S],
        target_length: usize,
    ) -> Result<Vec<Vec<u32>>> {
        batch
            .iter()
            .map(|encoded| self.align(encoded.as_ref(), target_length))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_align_basic() {
        let aligned = SequenceAligner::new().align(&[3, 5], 6).unwrap();
        assert_eq!(aligned, vec![0, 3, 5, 0, 0, 0]);
    }

    #[test]
    fn test_align_exact_fit() {
        let aligned = SequenceAligner::new().align(&[1, 2, 3], 4).unwrap();
        assert_eq!(aligned, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_align_empty_sequence() {
        let aligned = SequenceAligner::new().align(&[], 3).unwrap();
        assert_eq!(aligned, vec![0, 0, 0]);
    }

    #[test]
    fn test_align_overflow() {
        let err = SequenceAligner::new().align(&[1, 2, 3], 3).unwrap_err();
        match err {
            InterpunctError::AlignmentOverflow {
                required,
                target_length,
            } => {
                assert_eq!(required, 4);
                assert_eq!(target_length, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Even an empty sequence needs the start slot.
        assert!(SequenceAligner::new().align(&[], 0).is_err());
    }

    #[test]
    fn test_align_batch() {
        let batch: Vec<Vec<u32>> = vec![vec![2, 2], vec![4]];
        let aligned = SequenceAligner::new().align_batch(&batch, 4).unwrap();
        assert_eq!(aligned, vec![vec![0, 2, 2, 0], vec![0, 4, 0, 0]]);

        let batch: Vec<Vec<u32>> = vec![vec![1, 1, 1, 1], vec![1]];
        assert!(SequenceAligner::new().align_batch(&batch, 4).is_err());
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_content_region_is_exact(
                encoded in prop::collection::vec(1u32..50, 0..40),
                extra in 0usize..20,
            ) {
                let target_length = encoded.len() + 1 + extra;
                let aligned = SequenceAligner::new().align(&encoded, target_length).unwrap();

                prop_assert_eq!(aligned.len(), target_length);
                prop_assert_eq!(aligned[0], PAD_CODE);
                prop_assert_eq!(&aligned[1..=encoded.len()], encoded.as_slice());
                prop_assert!(aligned[encoded.len() + 1..].iter().all(|&c| c == PAD_CODE));
            }

            #[test]
            fn prop_short_target_always_fails(
                encoded in prop::collection::vec(1u32..50, 1..40),
                shortfall in 1usize..10,
            ) {
                let target_length = (encoded.len() + 1).saturating_sub(shortfall);
                prop_assert!(SequenceAligner::new().align(&encoded, target_length).is_err());
            }
        }
    }
}
