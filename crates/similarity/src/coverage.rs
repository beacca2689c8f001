//! Sentence coverage: how many PDF sentences occur, approximately, in the
//! DOCX text.
//!
//! Each sentence is scored on its own, so reordered paragraphs on the DOCX
//! side do not lower coverage.

use canonical::{segment, SentenceUnit};
use rayon::prelude::*;

use crate::config::{CoverageStrategy, SimilarityConfig};
use crate::lcs::PatternMasks;
use crate::ratio::token_sort_ratio;
use crate::types::SentenceMatch;

/// Scores below the threshold by less than this still count as matched.
const SCORE_EPSILON: f64 = 1e-9;

/// Score every sentence of `sentences` against `target`.
pub(crate) fn match_sentences(
    sentences: &[SentenceUnit],
    target: &str,
    cfg: &SimilarityConfig,
) -> Vec<SentenceMatch> {
    match cfg.coverage_strategy {
        CoverageStrategy::Substring => {
            let target: Vec<char> = target.chars().collect();
            score_all(sentences, cfg, |sentence| substring_score(sentence, &target))
        }
        CoverageStrategy::BestSentence => {
            let candidates: Vec<SentenceUnit> = segment(target, &cfg.segment).collect();
            score_all(sentences, cfg, |sentence| {
                best_sentence_score(sentence, &candidates)
            })
        }
    }
}

fn score_all<F>(sentences: &[SentenceUnit], cfg: &SimilarityConfig, score: F) -> Vec<SentenceMatch>
where
    F: Fn(&str) -> f64 + Sync,
{
    let build = |unit: &SentenceUnit| {
        let best = score(&unit.text);
        SentenceMatch {
            index: unit.index,
            text: unit.text.clone(),
            score: best,
            matched: best + SCORE_EPSILON >= cfg.sentence_threshold,
        }
    };
    if cfg.use_parallel {
        sentences.par_iter().map(build).collect()
    } else {
        sentences.iter().map(build).collect()
    }
}

fn best_sentence_score(sentence: &str, candidates: &[SentenceUnit]) -> f64 {
    candidates
        .iter()
        .map(|candidate| token_sort_ratio(sentence, &candidate.text))
        .fold(0.0, f64::max)
}

/// `1 - d / len(sentence)` where `d` is the smallest edit distance between
/// `sentence` and any substring of `target`. Clamped to `[0, 1]`.
pub(crate) fn substring_score(sentence: &str, target: &[char]) -> f64 {
    let pattern: Vec<char> = sentence.chars().collect();
    if pattern.is_empty() {
        return 1.0;
    }
    let distance = min_substring_distance(&pattern, target);
    1.0 - distance as f64 / pattern.len() as f64
}

/// Smallest Levenshtein distance between `pattern` and any substring of
/// `text` (Myers' bit-vector search, one block per 64 pattern characters).
pub(crate) fn min_substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    let masks = PatternMasks::new(pattern);
    let blocks = masks.words();
    let last_bit = ((m - 1) % 64) as u32;
    let zeros = vec![0u64; blocks];

    let mut pv = vec![u64::MAX; blocks];
    let mut mv = vec![0u64; blocks];
    // Column 0: matching against the empty substring costs `m`.
    let mut score = m as isize;
    let mut best = m as isize;

    for symbol in text {
        let eq = masks.get(symbol).unwrap_or(&zeros);
        // Row 0 is all zeros: a match may start at any text position.
        let mut hin = 0i32;
        for block in 0..blocks {
            let out_bit = if block + 1 == blocks { last_bit } else { 63 };
            hin = advance_block(&mut pv[block], &mut mv[block], eq[block], hin, out_bit);
        }
        score += hin as isize;
        if score < best {
            best = score;
            if best == 0 {
                break;
            }
        }
    }
    best.max(0) as usize
}

/// Advance one 64-row block by one text column.
///
/// `hin` is the horizontal delta entering the block's top row (-1, 0 or +1);
/// the return value is the horizontal delta leaving row `out_bit`.
fn advance_block(pv: &mut u64, mv: &mut u64, eq: u64, hin: i32, out_bit: u32) -> i32 {
    let hin_neg = u64::from(hin < 0);
    let hin_pos = u64::from(hin > 0);

    let xv = eq | *mv;
    let eq = eq | hin_neg;
    let xh = ((eq & *pv).wrapping_add(*pv) ^ *pv) | eq;
    let mut ph = *mv | !(xh | *pv);
    let mut mh = *pv & xh;

    let hout = ((ph >> out_bit) & 1) as i32 - ((mh >> out_bit) & 1) as i32;

    ph = (ph << 1) | hin_pos;
    mh = (mh << 1) | hin_neg;
    *pv = mh | !(xv | ph);
    *mv = ph & xv;
    hout
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Quadratic semi-global edit distance.
    fn naive_distance(pattern: &[char], text: &[char]) -> usize {
        let m = pattern.len();
        let mut prev: Vec<usize> = (0..=m).collect();
        let mut best = prev[m];
        for &t in text {
            let mut cur = vec![0usize; m + 1];
            for i in 1..=m {
                let substitution = prev[i - 1] + usize::from(pattern[i - 1] != t);
                cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
            }
            best = best.min(cur[m]);
            prev = cur;
        }
        best
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn exact_substring_scores_one() {
        let target = chars("the quick brown fox. it jumps every day.");
        assert_eq!(substring_score("the quick brown fox.", &target), 1.0);
        assert_eq!(substring_score("brown", &target), 1.0);
    }

    #[test]
    fn reworded_sentence_scores_low() {
        let target = chars("the quick brown fox. it jumps every day.");
        let score = substring_score("it jumps daily.", &target);
        assert!(score < 0.8, "score {score}");
        assert!(score > 0.0);
    }

    #[test]
    fn empty_target_costs_whole_sentence() {
        assert_eq!(min_substring_distance(&chars("abc"), &[]), 3);
        assert_eq!(substring_score("abc", &[]), 0.0);
    }

    #[test]
    fn long_patterns_span_blocks() {
        let sentence = "a reasonably long sentence that certainly needs more than sixty four characters to be stored.";
        let mut target = String::from("prefix text ");
        target.push_str(&sentence.replace("certainly", "surely"));
        target.push_str(" suffix");
        let (p, t) = (chars(sentence), chars(&target));
        assert_eq!(min_substring_distance(&p, &t), naive_distance(&p, &t));
    }

    #[test]
    fn pattern_of_exactly_one_block() {
        let p = chars(&"x".repeat(64));
        let t = chars(&format!("yy{}yy", "x".repeat(63)));
        assert_eq!(min_substring_distance(&p, &t), 1);
    }

    proptest! {
        #[test]
        fn matches_naive(pattern in "[abc ]{1,150}", text in "[abcd ]{0,200}") {
            let (p, t) = (chars(&pattern), chars(&text));
            prop_assert_eq!(min_substring_distance(&p, &t), naive_distance(&p, &t));
        }

        #[test]
        fn appending_never_lowers_score(
            sentence in "[ab ]{1,40}",
            text in "[abc ]{0,80}",
            extra in "[abc ]{0,40}",
        ) {
            let base = chars(&text);
            let extended = chars(&format!("{text}{extra}"));
            prop_assert!(substring_score(&sentence, &extended) >= substring_score(&sentence, &base));
        }
    }
}
