//! Word-level diff between two canonical texts.
//!
//! Texts are cut into alternating word and whitespace segments, which are
//! aligned with Myers' algorithm in linear space (middle-snake divide and
//! conquer). The resulting spans tile both texts: reading the old side of
//! every span in order rebuilds `a`, the new side rebuilds `b`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// How one aligned region of the two texts relates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffTag {
    Equal,
    /// Present only in the new (DOCX) text.
    Insert,
    /// Present only in the old (PDF) text.
    Delete,
    /// Old text replaced by new text.
    Replace,
}

/// One aligned region, as byte ranges into the old and new canonical texts.
///
/// `Insert` spans have an empty `old` range and `Delete` spans an empty `new`
/// range; the empty range still marks the position in that text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    pub tag: DiffTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl DiffSpan {
    /// The span's text on the old side (empty for inserts).
    pub fn old_text<'a>(&self, old: &'a str) -> &'a str {
        &old[self.old.clone()]
    }

    /// The span's text on the new side (empty for deletes).
    pub fn new_text<'a>(&self, new: &'a str) -> &'a str {
        &new[self.new.clone()]
    }

    pub fn is_equal(&self) -> bool {
        self.tag == DiffTag::Equal
    }
}

/// Align `old` and `new` word by word.
///
/// Empty inputs are valid: two empty texts give no spans, one empty side gives
/// a single insert or delete.
///
/// ```rust
/// use similarity::{diff_texts, DiffTag};
///
/// let old = "the quick brown fox";
/// let new = "the slow brown fox";
/// let spans = diff_texts(old, new);
/// let tags: Vec<DiffTag> = spans.iter().map(|s| s.tag).collect();
/// assert_eq!(tags, vec![DiffTag::Equal, DiffTag::Replace, DiffTag::Equal]);
/// assert_eq!(spans[1].old_text(old), "quick");
/// assert_eq!(spans[1].new_text(new), "slow");
/// ```
pub fn diff_texts(old: &str, new: &str) -> Vec<DiffSpan> {
    let old_segments = segments(old);
    let new_segments = segments(new);
    let old_words: Vec<&str> = old_segments.iter().map(|r| &old[r.clone()]).collect();
    let new_words: Vec<&str> = new_segments.iter().map(|r| &new[r.clone()]).collect();

    let mut ops = Vec::new();
    let max_d = max_d(old_words.len(), new_words.len());
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);
    conquer(
        &old_words,
        0..old_words.len(),
        &new_words,
        0..new_words.len(),
        &mut vf,
        &mut vb,
        &mut ops,
    );

    let ops = merge_ops(ops);
    ops.into_iter()
        .map(|op| DiffSpan {
            tag: op.tag,
            old: byte_range(&old_segments, &op.old, old.len()),
            new: byte_range(&new_segments, &op.new, new.len()),
        })
        .collect()
}

/// Alternating maximal runs of whitespace and non-whitespace.
fn segments(text: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(current) if current != space => {
                out.push(start..idx);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        out.push(start..text.len());
    }
    out
}

/// Byte range covered by segments `range`; an empty range maps to the byte
/// position where it would start.
fn byte_range(segments: &[Range<usize>], range: &Range<usize>, text_len: usize) -> Range<usize> {
    let start = segments.get(range.start).map_or(text_len, |seg| seg.start);
    if range.is_empty() {
        return start..start;
    }
    let end = segments[range.end - 1].end;
    start..end
}

/// Diff operation over segment indices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Op {
    tag: DiffTag,
    old: Range<usize>,
    new: Range<usize>,
}

/// Coalesce neighbours with the same tag, then fold each delete/insert run
/// into one `Replace`.
fn merge_ops(ops: Vec<Op>) -> Vec<Op> {
    let mut out: Vec<Op> = Vec::with_capacity(ops.len());
    for op in ops {
        if let Some(last) = out.last_mut() {
            let changed = |tag| matches!(tag, DiffTag::Insert | DiffTag::Delete | DiffTag::Replace);
            if last.tag == op.tag || (changed(last.tag) && changed(op.tag)) {
                if last.tag != op.tag {
                    last.tag = DiffTag::Replace;
                }
                last.old.end = op.old.end;
                last.new.end = op.new.end;
                continue;
            }
        }
        out.push(op);
    }
    out
}

fn max_d(old_len: usize, new_len: usize) -> usize {
    (old_len + new_len).div_ceil(2) + 1
}

/// Furthest-reaching x per diagonal `k`, indexed from `-max_d`.
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d],
        }
    }

    fn get(&self, k: isize) -> usize {
        self.v[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: usize) {
        self.v[(k + self.offset) as usize] = x;
    }
}

fn common_prefix_len(old: &[&str], old_range: Range<usize>, new: &[&str], new_range: Range<usize>) -> usize {
    old[old_range]
        .iter()
        .zip(&new[new_range])
        .take_while(|(a, b)| a == b)
        .count()
}

fn common_suffix_len(old: &[&str], old_range: Range<usize>, new: &[&str], new_range: Range<usize>) -> usize {
    old[old_range]
        .iter()
        .rev()
        .zip(new[new_range].iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Point where a shortest edit script crosses the middle, in absolute
/// indices.
fn find_middle_snake(
    old: &[&str],
    old_range: Range<usize>,
    new: &[&str],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)> {
    let n = old_range.len();
    let m = new_range.len();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;
    vf.set(1, 0);
    vb.set(1, 0);

    let d_max = max_d(n, m) as isize;
    for d in 0..d_max {
        // Forward paths.
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf.get(k - 1) < vf.get(k + 1)) {
                vf.get(k + 1)
            } else {
                vf.get(k - 1) + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    old,
                    old_range.start + x..old_range.end,
                    new,
                    new_range.start + y..new_range.end,
                );
            }
            vf.set(k, x);
            if odd && (k - delta).abs() < d && vf.get(k) + vb.get(-(k - delta)) >= n {
                return Some((x0 + old_range.start, y0 + new_range.start));
            }
        }

        // Backward paths.
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb.get(k - 1) < vb.get(k + 1)) {
                vb.get(k + 1)
            } else {
                vb.get(k - 1) + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let advance = common_suffix_len(
                    old,
                    old_range.start..old_range.start + n - x,
                    new,
                    new_range.start..new_range.start + m - y,
                );
                x += advance;
                y += advance;
            }
            vb.set(k, x);
            if !odd && (k - delta).abs() <= d && vb.get(k) + vf.get(-(k - delta)) >= n {
                return Some((n - x + old_range.start, m - y + new_range.start));
            }
        }
    }
    None
}

fn conquer(
    old: &[&str],
    mut old_range: Range<usize>,
    new: &[&str],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    ops: &mut Vec<Op>,
) {
    let prefix = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    if prefix > 0 {
        ops.push(Op {
            tag: DiffTag::Equal,
            old: old_range.start..old_range.start + prefix,
            new: new_range.start..new_range.start + prefix,
        });
    }
    old_range.start += prefix;
    new_range.start += prefix;

    let suffix = common_suffix_len(old, old_range.clone(), new, new_range.clone());
    old_range.end -= suffix;
    new_range.end -= suffix;

    if old_range.is_empty() && new_range.is_empty() {
        // Fully matched.
    } else if new_range.is_empty() {
        ops.push(Op {
            tag: DiffTag::Delete,
            old: old_range.clone(),
            new: new_range.start..new_range.start,
        });
    } else if old_range.is_empty() {
        ops.push(Op {
            tag: DiffTag::Insert,
            old: old_range.start..old_range.start,
            new: new_range.clone(),
        });
    } else if let Some((x, y)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        conquer(old, old_range.start..x, new, new_range.start..y, vf, vb, ops);
        conquer(old, x..old_range.end, new, y..new_range.end, vf, vb, ops);
    } else {
        ops.push(Op {
            tag: DiffTag::Replace,
            old: old_range.clone(),
            new: new_range.clone(),
        });
    }

    if suffix > 0 {
        ops.push(Op {
            tag: DiffTag::Equal,
            old: old_range.end..old_range.end + suffix,
            new: new_range.end..new_range.end + suffix,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn rebuild(spans: &[DiffSpan], old: &str, new: &str) -> (String, String) {
        let a = spans.iter().map(|s| s.old_text(old)).collect();
        let b = spans.iter().map(|s| s.new_text(new)).collect();
        (a, b)
    }

    fn tags(spans: &[DiffSpan]) -> Vec<DiffTag> {
        spans.iter().map(|s| s.tag).collect()
    }

    #[test]
    fn identical_texts_are_one_equal_span() {
        let text = "the quick brown fox.";
        let spans = diff_texts(text, text);
        assert_eq!(
            spans,
            vec![DiffSpan {
                tag: DiffTag::Equal,
                old: 0..text.len(),
                new: 0..text.len(),
            }]
        );
    }

    #[test]
    fn empty_sides() {
        assert!(diff_texts("", "").is_empty());
        assert_eq!(tags(&diff_texts("abc def", "")), vec![DiffTag::Delete]);
        assert_eq!(tags(&diff_texts("", "abc def")), vec![DiffTag::Insert]);
    }

    #[test]
    fn pure_insertion_and_deletion() {
        let old = "it jumps daily.";
        let new = "it jumps very daily.";
        let spans = diff_texts(old, new);
        assert_eq!(tags(&spans), vec![DiffTag::Equal, DiffTag::Insert, DiffTag::Equal]);
        assert_eq!(spans[1].new_text(new), "very ");
        assert!(spans[1].old.is_empty());

        let back = diff_texts(new, old);
        assert_eq!(tags(&back), vec![DiffTag::Equal, DiffTag::Delete, DiffTag::Equal]);
    }

    #[test]
    fn changed_words_become_replace() {
        let old = "the quick brown fox. it jumps daily.";
        let new = "the quick brown fox. it jumps every day.";
        let spans = diff_texts(old, new);
        let (a, b) = rebuild(&spans, old, new);
        assert_eq!(a, old);
        assert_eq!(b, new);
        let replaced: Vec<(&str, &str)> = spans
            .iter()
            .filter(|s| s.tag == DiffTag::Replace)
            .map(|s| (s.old_text(old), s.new_text(new)))
            .collect();
        assert_eq!(replaced, vec![("daily.", "every day.")]);
    }

    #[test]
    fn multibyte_offsets_are_char_boundaries() {
        let old = "café crème brûlée";
        let new = "café noir brûlée";
        let spans = diff_texts(old, new);
        let (a, b) = rebuild(&spans, old, new);
        assert_eq!(a, old);
        assert_eq!(b, new);
    }

    #[test]
    fn segments_alternate() {
        let text = "ab  cd\te";
        let parts: Vec<&str> = segments(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(parts, vec!["ab", "  ", "cd", "\t", "e"]);
    }

    fn words() -> impl Strategy<Value = String> {
        let pieces = prop::sample::select(vec!["a", "b", "c", "dd", "é", " ", " ", "."]);
        prop::collection::vec(pieces, 0..60).prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn spans_rebuild_both_texts(old in words(), new in words()) {
            let spans = diff_texts(&old, &new);
            let (a, b) = rebuild(&spans, &old, &new);
            prop_assert_eq!(a, old.clone());
            prop_assert_eq!(b, new.clone());
        }

        #[test]
        fn spans_are_contiguous_and_merged(old in words(), new in words()) {
            let spans = diff_texts(&old, &new);
            let (mut old_pos, mut new_pos) = (0, 0);
            for pair in spans.windows(2) {
                let both_changes = pair.iter().all(|s| !s.is_equal());
                prop_assert!(!both_changes, "adjacent change spans were not merged");
                prop_assert!(pair[0].tag != pair[1].tag);
            }
            for span in &spans {
                prop_assert_eq!(span.old.start, old_pos);
                prop_assert_eq!(span.new.start, new_pos);
                prop_assert!(!(span.old.is_empty() && span.new.is_empty()));
                old_pos = span.old.end;
                new_pos = span.new.end;
            }
            prop_assert_eq!(old_pos, old.len());
            prop_assert_eq!(new_pos, new.len());
        }

        #[test]
        fn equal_spans_match_text(old in words(), new in words()) {
            for span in diff_texts(&old, &new).iter().filter(|s| s.is_equal()) {
                prop_assert_eq!(span.old_text(&old), span.new_text(&new));
            }
        }
    }
}
