//! Bit-parallel longest common subsequence length.
//!
//! Hyyrö's formulation: one bit per pattern position, 64 positions per word,
//! one pass over the other sequence. Runs in `O(ceil(m / 64) * n)` word
//! operations, which keeps whole-document character ratios cheap.

use std::collections::HashMap;
use std::hash::Hash;

const WORD_BITS: usize = u64::BITS as usize;

/// Match masks: for each symbol, the pattern positions holding it.
pub(crate) struct PatternMasks<T> {
    masks: HashMap<T, Vec<u64>>,
    words: usize,
    len: usize,
}

impl<T: Copy + Eq + Hash> PatternMasks<T> {
    pub(crate) fn new(pattern: &[T]) -> Self {
        let words = pattern.len().div_ceil(WORD_BITS);
        let mut masks: HashMap<T, Vec<u64>> = HashMap::new();
        for (idx, &symbol) in pattern.iter().enumerate() {
            let mask = masks.entry(symbol).or_insert_with(|| vec![0; words]);
            mask[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
        }
        Self {
            masks,
            words,
            len: pattern.len(),
        }
    }

    pub(crate) fn get(&self, symbol: &T) -> Option<&[u64]> {
        self.masks.get(symbol).map(Vec::as_slice)
    }

    pub(crate) fn words(&self) -> usize {
        self.words
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

/// Length of the longest common subsequence of `a` and `b`.
pub(crate) fn lcs_len<T: Copy + Eq + Hash>(a: &[T], b: &[T]) -> usize {
    // The shorter side becomes the bit pattern.
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if pattern.is_empty() {
        return 0;
    }

    let masks = PatternMasks::new(pattern);
    let words = masks.words();
    let mut v = vec![u64::MAX; words];

    for symbol in text {
        let Some(m) = masks.get(symbol) else {
            continue;
        };
        let mut carry = 0u64;
        for (word, &mask) in v.iter_mut().zip(m) {
            let u = *word & mask;
            let (sum, c1) = word.overflowing_add(u);
            let (sum, c2) = sum.overflowing_add(carry);
            carry = u64::from(c1 || c2);
            *word = sum | (*word & !mask);
        }
    }

    // Zero bits among the first `m` positions count the LCS.
    let m = masks.len();
    let mut ones = 0usize;
    for (idx, word) in v.iter().enumerate() {
        let valid = (m - idx * WORD_BITS).min(WORD_BITS);
        let mask = if valid == WORD_BITS {
            u64::MAX
        } else {
            (1u64 << valid) - 1
        };
        ones += (word & mask).count_ones() as usize;
    }
    m - ones
}
