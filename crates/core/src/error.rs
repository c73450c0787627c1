//! Boundary error model.

use thiserror::Error;

/// Result type used at the edges of the receipt pipeline.
pub type ReceiptResult<T> = Result<T, ReceiptError>;

/// Failures that happen *before* normalization starts.
///
/// The normalizer itself never fails: malformed fields degrade to defaults.
/// These variants only cover getting a document into memory in the first place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    /// The input text was not a JSON document.
    #[error("malformed order document: {0}")]
    MalformedJson(String),

    /// The input could not be read (file missing, stdin closed, ...).
    #[error("unreadable input: {0}")]
    Unreadable(String),
}

impl ReceiptError {
    pub fn malformed_json(msg: impl Into<String>) -> Self {
        Self::MalformedJson(msg.into())
    }

    pub fn unreadable(msg: impl Into<String>) -> Self {
        Self::Unreadable(msg.into())
    }
}

impl From<serde_json::Error> for ReceiptError {
    fn from(value: serde_json::Error) -> Self {
        Self::malformed_json(value.to_string())
    }
}
