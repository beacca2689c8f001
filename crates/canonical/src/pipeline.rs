use unicode_categories::UnicodeCategories;
use unicode_normalization::{is_nfkc, UnicodeNormalization};
use unicode_segmentation::UnicodeSegmentation;

use crate::cleanup::{
    drop_heading_lines, drop_page_number_lines, fold_typography, join_hyphenated, strip_invisible,
};
use crate::config::CanonicalizeConfig;
use crate::document::CanonicalizedDocument;
use crate::error::CanonicalError;
use crate::hash::hash_canonical_bytes;
use crate::token::tokenize;

/// Upper bound on NFKC/collapse rounds. Case folding can leave text that is
/// not NFKC; one extra round settles every input seen in practice.
const MAX_SETTLE_ROUNDS: usize = 3;

/// Main entry point. Takes extracted text and config and returns a
/// canonicalized document.
///
/// Empty canonical text is a valid result: a blank document still compares
/// (and scores zero against anything non-empty).
pub fn canonicalize(
    doc_id: impl Into<String>,
    input: &str,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalizedDocument, CanonicalError> {
    cfg.validate()?;

    let doc_id: String = doc_id.into();
    let trimmed = doc_id.trim();
    if trimmed.is_empty() {
        return Err(CanonicalError::MissingDocId);
    }
    let doc_id = if doc_id.len() == trimmed.len() {
        doc_id
    } else {
        trimmed.to_string()
    };

    let canonical_text = normalize(input, cfg);
    let tokens = tokenize(&canonical_text);
    let canonical_version = cfg.version;
    let sha256_hex = hash_canonical_bytes(canonical_version, canonical_text.as_bytes());

    tracing::debug!(
        doc_id = %doc_id,
        input_bytes = input.len(),
        canonical_bytes = canonical_text.len(),
        tokens = tokens.len(),
        "canonicalized"
    );

    Ok(CanonicalizedDocument {
        doc_id,
        canonical_text,
        tokens,
        sha256_hex,
        canonical_version,
        config: cfg.clone(),
    })
}

/// Normalize raw text into canonical form.
///
/// Deterministic and idempotent: `normalize(&normalize(x, c), c) == normalize(x, c)`.
/// The result never contains line breaks, runs of spaces, or leading and
/// trailing whitespace.
pub fn normalize(input: &str, cfg: &CanonicalizeConfig) -> String {
    // Compatibility forms first so ligatures and full-width forms are visible
    // to the folding passes below.
    let mut text: String = input.nfkc().collect();
    if cfg.fold_typography {
        text = fold_typography(&text);
    }
    text = strip_invisible(&text);
    if cfg.drop_page_numbers {
        text = drop_page_number_lines(&text);
    }
    if cfg.drop_heading_lines {
        text = drop_heading_lines(&text);
    }

    let mut canonical = collapse(&text, cfg);
    for _ in 0..MAX_SETTLE_ROUNDS {
        if is_nfkc(&canonical) {
            break;
        }
        let renormalized: String = canonical.nfkc().collect();
        canonical = collapse(&renormalized, cfg);
    }

    if cfg.strip_hyphenation {
        canonical = join_hyphenated(&canonical);
    }
    canonical
}

/// Lowercase and collapse delimiters into single spaces.
fn collapse(text: &str, cfg: &CanonicalizeConfig) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    // Graphemes keep multi-codepoint clusters together while lowercasing;
    // a single character may still expand (e.g. `İ` -> `i̇`).
    for grapheme in text.graphemes(true) {
        for lower in grapheme.to_lowercase().chars() {
            dispatch_char(lower, cfg, &mut out, &mut pending_space);
        }
    }
    out
}

/// Decides whether a character is part of a token or a delimiter.
fn dispatch_char(ch: char, cfg: &CanonicalizeConfig, out: &mut String, pending_space: &mut bool) {
    let is_delim = ch.is_whitespace() || (cfg.strip_punctuation && ch.is_punctuation());
    if is_delim {
        if !out.is_empty() {
            *pending_space = true;
        }
        return;
    }
    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
    out.push(ch);
}
