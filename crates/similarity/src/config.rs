//! Configuration and error types for the similarity engine.
//!
//! Nothing here performs I/O; every metric is a pure function of
//! `(canonical_a, canonical_b, sentences_a, config)`.

use canonical::SegmentConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a PDF sentence is looked up in the DOCX text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStrategy {
    /// Best approximate occurrence anywhere in the DOCX text:
    /// `1 - d / len`, where `d` is the smallest edit distance between the
    /// sentence and any substring of the DOCX text. Independent of how the
    /// DOCX side would be segmented.
    #[default]
    Substring,
    /// Best token-sort ratio against any single DOCX sentence.
    BestSentence,
}

/// Configuration for [`compare`](crate::compare).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Configuration schema version. Bump when a metric's definition changes.
    pub version: u32,
    /// Minimum per-sentence score for a PDF sentence to count as covered.
    /// In `[0, 1]`.
    pub sentence_threshold: f64,
    pub coverage_strategy: CoverageStrategy,
    /// Score sentences on the rayon thread pool.
    pub use_parallel: bool,
    /// Segmentation applied to the DOCX text by
    /// [`CoverageStrategy::BestSentence`]. Callers copy their pipeline's
    /// segment settings here so both sides split the same way.
    #[serde(skip)]
    pub segment: SegmentConfig,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            version: 1,
            sentence_threshold: 0.8,
            coverage_strategy: CoverageStrategy::Substring,
            use_parallel: false,
            segment: SegmentConfig::default(),
        }
    }
}

impl SimilarityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.sentence_threshold = threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: CoverageStrategy) -> Self {
        self.coverage_strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_segment(mut self, segment: SegmentConfig) -> Self {
        self.segment = segment;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.version < 1 {
            return Err(SimilarityError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if !(0.0..=1.0).contains(&self.sentence_threshold) {
            return Err(SimilarityError::InvalidThreshold {
                threshold: self.sentence_threshold,
            });
        }
        if self.segment.min_sentence_chars == 0 {
            return Err(SimilarityError::InvalidSegment);
        }
        Ok(())
    }
}

/// Configuration errors. Metric computation itself never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: sentence_threshold must be within [0, 1] (got {threshold})")]
    InvalidThreshold { threshold: f64 },

    #[error("invalid config: min_sentence_chars must be >= 1")]
    InvalidSegment,
}
