//! Error types for uplink decoding.
//!
//! Only payload-level failures are errors. An unmatched topic and a
//! translation-table miss are not: they surface as `None` from the router and
//! as [`Label::Undefined`](crate::tables::Label::Undefined) from the tables.

use crate::topic::Category;

/// Result type for decoder operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Decoder error types.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload text is not well-formed JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The container holding the category's slice is absent.
    #[error("Missing slice '{path}' for {category} payload")]
    MissingSlice {
        category: Category,
        path: &'static str,
    },

    /// The slice exists but has a kind the translator cannot read.
    #[error("Slice '{path}' for {category} payload is not {expected}")]
    UnexpectedKind {
        category: Category,
        path: &'static str,
        expected: &'static str,
    },

    /// Host metadata document could not be read.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// The output record could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
