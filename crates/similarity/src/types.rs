use serde::{Deserialize, Serialize};

use crate::diff::DiffSpan;

/// Similarity metrics for one comparison run.
///
/// Ratios are in `[0, 1]`. `sentence_coverage` is
/// `matched_sentences / total_sentences`, or 1.0 when there are no sentences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMetrics {
    pub char_ratio: f64,
    pub token_fuzzy_ratio: f64,
    pub sentence_coverage: f64,
    pub total_sentences: usize,
    pub matched_sentences: usize,
}

impl SimilarityMetrics {
    pub fn unmatched_sentences(&self) -> usize {
        self.total_sentences - self.matched_sentences
    }
}

/// Best score of one PDF sentence against the DOCX text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceMatch {
    /// Position of the sentence in the PDF sentence sequence.
    pub index: usize,
    pub text: String,
    pub score: f64,
    pub matched: bool,
}

/// Metrics together with the per-sentence results and word diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub metrics: SimilarityMetrics,
    pub sentence_matches: Vec<SentenceMatch>,
    pub diff: Vec<DiffSpan>,
}

impl ComparisonOutcome {
    /// Unmatched sentences, lowest score first; ties keep document order.
    pub fn unmatched(&self) -> Vec<&SentenceMatch> {
        let mut out: Vec<&SentenceMatch> =
            self.sentence_matches.iter().filter(|m| !m.matched).collect();
        out.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        out
    }
}
