use thiserror::Error;

/// Errors that can occur during canonicalization.
///
/// Normalization itself is total; only configuration and identity checks
/// can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("canonical document requires a non-empty doc_id")]
    MissingDocId,
}
