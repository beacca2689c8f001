//! Sentence segmentation over canonical text.
//!
//! A sentence ends at `.`, `?` or `!` (optionally repeated and optionally
//! followed by closing quotes or brackets) when the next character is
//! whitespace or the text ends. Fragments shorter than
//! [`SegmentConfig::min_sentence_chars`] are merged with the unit that follows
//! them, so `j. smith wrote this.` stays one unit.
//!
//! ```rust
//! use canonical::{segment, SegmentConfig};
//!
//! let units: Vec<_> = segment("first sentence here. second one here!", &SegmentConfig::default())
//!     .map(|unit| unit.text)
//!     .collect();
//! assert_eq!(units, vec!["first sentence here.", "second one here!"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::SegmentConfig;

/// A sentence-like span of canonical text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentenceUnit {
    /// Position in document order, starting at 0.
    pub index: usize,
    /// Byte offset (inclusive) in the canonical text.
    pub start: usize,
    /// Byte offset (exclusive) in the canonical text.
    pub end: usize,
    pub text: String,
}

/// Lazy iterator over the sentence units of a text.
///
/// Cloning forks the current position: a clone taken before iterating replays
/// the whole sequence.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    pos: usize,
    index: usize,
    min_chars: usize,
}

/// Split `text` into sentence units.
///
/// Empty or whitespace-only input yields an empty sequence.
pub fn segment<'a>(text: &'a str, cfg: &SegmentConfig) -> Sentences<'a> {
    Sentences {
        text,
        pos: 0,
        index: 0,
        min_chars: cfg.min_sentence_chars.max(1),
    }
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '?' | '!')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

impl<'a> Sentences<'a> {
    /// Byte offset just past the next sentence boundary at or after `from`,
    /// or `None` if the rest of the text has no boundary.
    fn next_boundary(&self, from: usize) -> Option<usize> {
        let rest = &self.text[from..];
        let mut chars = rest.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            if !is_terminal(ch) {
                continue;
            }
            let mut end = from + offset + ch.len_utf8();
            while let Some(&(next_offset, next)) = chars.peek() {
                if is_terminal(next) || is_closer(next) {
                    end = from + next_offset + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            match self.text[end..].chars().next() {
                None => return Some(end),
                Some(next) if next.is_whitespace() => return Some(end),
                Some(_) => continue,
            }
        }
        None
    }

    fn skip_whitespace(&self, from: usize) -> usize {
        self.text[from..]
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map_or(self.text.len(), |(offset, _)| from + offset)
    }
}

impl Iterator for Sentences<'_> {
    type Item = SentenceUnit;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.skip_whitespace(self.pos);
        if start >= self.text.len() {
            self.pos = self.text.len();
            return None;
        }

        let mut scan = start;
        let end = loop {
            match self.next_boundary(scan) {
                Some(boundary) => {
                    let long_enough = self.text[start..boundary].chars().count() >= self.min_chars;
                    let more_follows = self.skip_whitespace(boundary) < self.text.len();
                    if long_enough || !more_follows {
                        break boundary;
                    }
                    scan = boundary;
                }
                None => break self.text.trim_end().len().max(start),
            }
        };

        self.pos = end;
        let unit = SentenceUnit {
            index: self.index,
            start,
            end,
            text: self.text[start..end].to_string(),
        };
        self.index += 1;
        Some(unit)
    }
}
