//! YAML configuration for a comparison run.
//!
//! Every stage configuration can be set from a single YAML file. All sections
//! are optional and fall back to their defaults; command-line flags override
//! the file.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "manuscript check"
//!
//! extract:
//!   allow_empty: true
//!   include_tables: false
//!   parallel: true
//!   max_file_bytes: 104857600
//!
//! canonical:
//!   version: 1
//!   fold_typography: true
//!   drop_page_numbers: true
//!   drop_heading_lines: true
//!   strip_hyphenation: true
//!   strip_punctuation: false
//!
//! segment:
//!   min_sentence_chars: 10
//!
//! similarity:
//!   version: 1
//!   sentence_threshold: 80      # a fraction (0.8) works too
//!   coverage_strategy: substring
//!   use_parallel: false
//!
//! report:
//!   title: "PDF vs DOCX comparison"
//!   collapse_equal_over: 600
//!   context_chars: 200
//!   snippet_chars: 300
//!
//! logging:
//!   level: info
//!   format: pretty
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use canonical::{CanonicalizeConfig, SegmentConfig};
use extract::ExtractConfig;
use report::ReportConfig;
use serde::{Deserialize, Serialize};
use similarity::SimilarityConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Output format of the log lines written to stderr.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{other}` (expected pretty or json)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Logging section. `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Top-level configuration for one PDF/DOCX comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ComparatorConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub extract: ExtractConfig,

    /// Normalization policy, shared by both documents.
    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    /// Sentence splitting, shared by both documents.
    #[serde(default)]
    pub segment: SegmentConfig,

    #[serde(default)]
    pub similarity: SimilarityConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            extract: ExtractConfig::default(),
            canonical: CanonicalizeConfig::default(),
            segment: SegmentConfig::default(),
            similarity: SimilarityConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ComparatorConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let mut config: ComparatorConfig = serde_yaml::from_str(yaml)?;
        config.similarity.sentence_threshold =
            normalize_threshold(config.similarity.sentence_threshold);
        config.validate()?;
        Ok(config)
    }

    /// Set the sentence threshold from a fraction or a percentage.
    pub fn with_sentence_threshold(mut self, threshold: f64) -> Self {
        self.similarity.sentence_threshold = normalize_threshold(threshold);
        self
    }

    /// Similarity settings with this run's segmentation applied.
    pub fn similarity_config(&self) -> SimilarityConfig {
        self.similarity.clone().with_segment(self.segment.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.extract
            .validate()
            .map_err(|err| invalid("extract", err))?;
        self.canonical
            .validate()
            .map_err(|err| invalid("canonical", err))?;
        self.segment
            .validate()
            .map_err(|err| invalid("segment", err))?;
        self.similarity
            .validate()
            .map_err(|err| invalid("similarity", err))?;
        self.report
            .validate()
            .map_err(|err| invalid("report", err))?;
        if self.logging.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Thresholds above 1 are read as percentages (`80` -> `0.8`), so values
/// written for the 0-100 scale keep working. Anything outside `[0, 100]` is
/// returned unchanged for validation to reject.
///
/// ```rust
/// use doccmp::normalize_threshold;
///
/// assert_eq!(normalize_threshold(0.75), 0.75);
/// assert_eq!(normalize_threshold(80.0), 0.8);
/// assert_eq!(normalize_threshold(1.0), 1.0);
/// assert_eq!(normalize_threshold(250.0), 250.0);
/// ```
pub fn normalize_threshold(value: f64) -> f64 {
    if value > 1.0 && value <= 100.0 {
        value / 100.0
    } else {
        value
    }
}

fn invalid(section: &str, err: impl fmt::Display) -> ConfigLoadError {
    ConfigLoadError::Validation(format!("{section}: {err}"))
}

fn default_version() -> String {
    "1.0".to_string()
}
