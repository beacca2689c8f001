use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering or writing report artifacts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("invalid report config: {0}")]
    InvalidConfig(String),

    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReportError::Write {
            path: path.into(),
            source,
        }
    }
}
