//! Error types produced by the extract crate.
//!
//! Every variant names the offending file and its declared format so a fatal
//! error can be reported without extra context.
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`Io`](ExtractError::Io) | file missing or unreadable |
//! | [`TooLarge`](ExtractError::TooLarge) | file exceeds `max_file_bytes` |
//! | [`WrongFormat`](ExtractError::WrongFormat) | magic bytes do not match the declared format |
//! | [`Encrypted`](ExtractError::Encrypted) | password-protected PDF |
//! | [`Parse`](ExtractError::Parse) | corrupt file, parser failure |
//! | [`Empty`](ExtractError::Empty) | no text and `allow_empty` is off |

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::DocumentFormat;

/// Fatal extraction failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("failed to read {format} file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        format: DocumentFormat,
        #[source]
        source: std::io::Error,
    },

    #[error("{format} file {} is {size} bytes, over the {limit} byte limit", .path.display())]
    TooLarge {
        path: PathBuf,
        format: DocumentFormat,
        size: u64,
        limit: u64,
    },

    #[error("{} is not a {format} file: {reason}", .path.display())]
    WrongFormat {
        path: PathBuf,
        format: DocumentFormat,
        reason: String,
    },

    #[error("{format} file {} is encrypted", .path.display())]
    Encrypted { path: PathBuf, format: DocumentFormat },

    #[error("failed to parse {format} file {}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        format: DocumentFormat,
        reason: String,
    },

    #[error("{format} file {} contains no extractable text", .path.display())]
    Empty { path: PathBuf, format: DocumentFormat },
}

impl ExtractError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ExtractError::Io { path, .. }
            | ExtractError::TooLarge { path, .. }
            | ExtractError::WrongFormat { path, .. }
            | ExtractError::Encrypted { path, .. }
            | ExtractError::Parse { path, .. }
            | ExtractError::Empty { path, .. } => path,
        }
    }

    pub fn format(&self) -> DocumentFormat {
        match self {
            ExtractError::Io { format, .. }
            | ExtractError::TooLarge { format, .. }
            | ExtractError::WrongFormat { format, .. }
            | ExtractError::Encrypted { format, .. }
            | ExtractError::Parse { format, .. }
            | ExtractError::Empty { format, .. } => *format,
        }
    }

    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Io { .. } => "io",
            ExtractError::TooLarge { .. } => "too_large",
            ExtractError::WrongFormat { .. } => "wrong_format",
            ExtractError::Encrypted { .. } => "encrypted",
            ExtractError::Parse { .. } => "parse",
            ExtractError::Empty { .. } => "empty",
        }
    }
}
