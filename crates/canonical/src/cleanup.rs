//! Character-level cleanup applied before whitespace collapsing.
//!
//! These passes remove the noise that differs between a PDF text layer and a
//! word-processor export without looking at which format the text came from.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_categories::UnicodeCategories;

/// Lines holding only a page number: `12`, `Page 12`, `12 / 40`.
static PAGE_NUMBER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[^\S\n]*(page[^\S\n]*)?\d+[^\S\n]*(/[^\S\n]*\d+)?[^\S\n]*$")
        .unwrap_or_else(|err| panic!("page number pattern must compile: {err}"))
});

/// Running section headers left on a line of their own: `Chapter`,
/// `Abstract`, `References`, `Resumen`.
static HEADING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[^\S\n]*(Chapter|CHAPTER|Abstract|References|Resumen)[^\S\n]*$")
        .unwrap_or_else(|err| panic!("heading pattern must compile: {err}"))
});

/// Map curly quotes and dashes to their ASCII counterparts.
pub(crate) fn fold_typography(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' => '-',
            other => other,
        })
        .collect()
}

/// Drop control characters (other than whitespace) and invisible format
/// characters such as soft hyphens, zero-width spaces and byte-order marks.
pub(crate) fn strip_invisible(text: &str) -> String {
    text.chars()
        .filter(|ch| ch.is_whitespace() || !(ch.is_other_control() || ch.is_other_format()))
        .collect()
}

/// Remove lines consisting only of a page number.
///
/// Text without line breaks is returned unchanged: a single-line string is
/// treated as already-flattened content, not as a page footer.
pub(crate) fn drop_page_number_lines(text: &str) -> String {
    drop_matching_lines(text, &PAGE_NUMBER_LINE)
}

/// Remove lines consisting only of a bare section header word. Case matters:
/// `references` inside running text is never on a line alone, but a
/// lower-cased header would be indistinguishable from content.
pub(crate) fn drop_heading_lines(text: &str) -> String {
    drop_matching_lines(text, &HEADING_LINE)
}

fn drop_matching_lines(text: &str, pattern: &Regex) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    pattern.replace_all(text, "").into_owned()
}

/// Re-join words split by a line-end hyphen in whitespace-collapsed text.
///
/// `letter '-' ' ' lowercase-letter` loses the hyphen and the space. Chains
/// (`a- b- c`) are handled in one pass because the decision looks at the
/// output built so far rather than the input.
pub(crate) fn join_hyphenated(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '-'
            && out.chars().next_back().is_some_and(char::is_alphabetic)
            && chars.get(i + 1) == Some(&' ')
            && chars.get(i + 2).is_some_and(|next| next.is_lowercase())
        {
            i += 2;
            continue;
        }
        out.push(ch);
        i += 1;
    }
    out
}
