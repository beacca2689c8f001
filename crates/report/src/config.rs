use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Rendering options for the HTML report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Page title and top-level heading.
    pub title: String,
    /// Unchanged diff regions longer than this many characters are elided.
    /// `0` disables elision.
    pub collapse_equal_over: usize,
    /// Characters kept on each side of an elided region.
    pub context_chars: usize,
    /// Unmatched-sentence snippets are cut to this many characters.
    pub snippet_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "PDF vs DOCX comparison".to_string(),
            collapse_equal_over: 600,
            context_chars: 200,
            snippet_chars: 300,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.title.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "title must not be empty".into(),
            ));
        }
        if self.snippet_chars == 0 {
            return Err(ReportError::InvalidConfig(
                "snippet_chars must be greater than zero".into(),
            ));
        }
        if self.collapse_equal_over != 0 && self.context_chars * 2 >= self.collapse_equal_over {
            return Err(ReportError::InvalidConfig(format!(
                "context_chars ({}) must be less than half of collapse_equal_over ({})",
                self.context_chars, self.collapse_equal_over
            )));
        }
        Ok(())
    }
}
