//! Snippet shortening for report listings.

/// Shorten `text` to at most `max_chars` characters, appending `…` when cut.
///
/// Cuts on a character boundary and prefers the last space in the kept part
/// so report snippets do not end mid-word.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(idx, _)| idx);
    let kept = &text[..cut];
    let kept = match kept.rfind(' ') {
        Some(space) if space > 0 => &kept[..space],
        _ => kept,
    };
    format!("{}\u{2026}", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_words() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("alpha beta gamma", 12), "alpha beta\u{2026}");
        assert_eq!(truncate_chars("ééééé", 3), "ééé\u{2026}");
    }
}
