use thiserror::Error;

/// Errors raised by the Interpunct data-alignment pipeline.
///
/// Every variant propagates to the caller; nothing is silently repaired.
#[derive(Debug, Error)]
pub enum InterpunctError {
    /// A tag marker has no preceding word to attach to.
    #[error("tag marker {marker:?} at field {field} has no preceding word")]
    MalformedLine {
        /// The offending marker, lower-cased.
        marker: String,
        /// Index of the marker among the fields kept after `start_index`.
        field: usize,
    },

    /// A label was not seen while the vocabulary was fitted.
    #[error("label {0:?} is not part of the fitted vocabulary")]
    UnknownLabel(String),

    /// The reserved padding label appeared in corpus data.
    #[error("label {0:?} is reserved for padding and cannot occur in data")]
    ReservedLabel(String),

    /// The requested padded length cannot hold the start slot plus every label.
    #[error("aligned length {target_length} is too small: {required} positions required")]
    AlignmentOverflow {
        /// Positions needed (`labels + 1`).
        required: usize,
        /// Length that was requested.
        target_length: usize,
    },

    /// Gold and prediction batches disagree in shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A gold code has no entry in the vocabulary.
    #[error("code {0} is outside the label vocabulary")]
    UnknownCode(u32),

    /// A serialized vocabulary is inconsistent.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

/// Result type alias for Interpunct core operations.
pub type Result<T> = std::result::Result<T, InterpunctError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = InterpunctError::UnknownLabel("<colon>".into());
        assert!(err.to_string().contains("<colon>"));

        let err = InterpunctError::AlignmentOverflow {
            required: 7,
            target_length: 4,
        };
        assert_eq!(
            err.to_string(),
            "aligned length 4 is too small: 7 positions required"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InterpunctError>();
    }
}
