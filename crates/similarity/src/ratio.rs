//! Whole-text ratios.
//!
//! Both ratios use the Indel-normalized similarity
//! `2 * LCS(a, b) / (|a| + |b|)` over Unicode scalar values: 1.0 for equal
//! texts, 0.0 when nothing is shared. Two empty texts are equal.

use canonical::{tokenize, Token};

use crate::lcs::lcs_len;

/// Indel similarity of two character sequences.
pub(crate) fn indel_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let lcs = lcs_len(a, b);
    (2 * lcs) as f64 / total as f64
}

/// Character-level similarity of two texts. Symmetric and reflexive.
///
/// ```rust
/// use similarity::char_ratio;
///
/// assert_eq!(char_ratio("same text", "same text"), 1.0);
/// assert_eq!(char_ratio("", ""), 1.0);
/// assert_eq!(char_ratio("abc", ""), 0.0);
/// assert_eq!(char_ratio("abcd", "abxd"), 0.75);
/// ```
pub fn char_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    indel_ratio_chars(&a, &b)
}

/// Token-sort ratio: whitespace tokens of each side are sorted and re-joined
/// with single spaces before taking the character ratio.
///
/// Reordered words score 1.0; a changed word costs roughly its length.
///
/// ```rust
/// use similarity::token_sort_ratio;
///
/// assert_eq!(token_sort_ratio("brown quick fox", "quick brown fox"), 1.0);
/// assert!(token_sort_ratio("it jumps daily", "it jumps every day") < 1.0);
/// ```
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    char_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(text: &str) -> String {
    let tokens = tokenize(text);
    let mut words: Vec<&str> = tokens.iter().map(Token::as_ref).collect();
    words.sort_unstable();
    words.join(" ")
}
