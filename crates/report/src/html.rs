//! Self-contained HTML rendering.
//!
//! The output has inline CSS and no scripts or external assets. All volatile
//! values (generation and extraction times) live in the single
//! `<p class="generated-at" id="generated-at">` element, so two reports for
//! the same inputs differ only on that line.

use std::fmt::Write as _;

use canonical::truncate_chars;
use similarity::{CoverageStrategy, DiffSpan, DiffTag};

use crate::config::ReportConfig;
use crate::model::{ComparisonReport, DocumentSummary};

const STYLE: &str = "\
body{font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;margin:2em auto;max-width:64em;color:#222;line-height:1.45}
h1{font-size:1.6em;margin-bottom:.2em}
h2{font-size:1.2em;margin-top:1.6em;border-bottom:1px solid #ddd}
.files,.generated-at{color:#555;margin:.2em 0}
table{border-collapse:collapse;margin:.6em 0}
th,td{border:1px solid #ccc;padding:.3em .7em;text-align:left;vertical-align:top}
th{background:#f4f4f4}
td.num{text-align:right;font-variant-numeric:tabular-nums}
ul.warnings{margin:.2em 0;padding-left:1.2em}
ol.unmatched li{margin:.3em 0}
.score{font-weight:bold;font-variant-numeric:tabular-nums;margin-right:.5em}
.diff{white-space:pre-wrap;word-wrap:break-word;border:1px solid #ddd;padding:1em;background:#fcfcfc}
del{background:#fdd;color:#900}
ins{background:#dfd;color:#060;text-decoration:none}
.elided{color:#888;font-style:italic}
.legend del,.legend ins{padding:0 .3em}
";

/// Escape text for use in HTML element content and attribute values.
///
/// ```rust
/// use report::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percentage with two decimals, e.g. `0.98765` -> `98.77%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Render the full report page.
pub fn render_html(report: &ComparisonReport, cfg: &ReportConfig) -> String {
    let mut html = String::with_capacity(
        4096 + 2 * (report.pdf_text.len() + report.docx_text.len()),
    );
    let title = escape_html(&cfg.title);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>\n{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(
        html,
        "<p class=\"files\">PDF: <strong>{}</strong> &harr; DOCX: <strong>{}</strong></p>",
        escape_html(&report.pdf.name),
        escape_html(&report.docx.name)
    );
    render_generated_at(&mut html, report);
    render_metrics(&mut html, report);
    render_settings(&mut html, report);
    render_documents(&mut html, report);
    render_unmatched(&mut html, report, cfg);
    render_diff(&mut html, report, cfg);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_generated_at(html: &mut String, report: &ComparisonReport) {
    let _ = writeln!(
        html,
        "<p class=\"generated-at\" id=\"generated-at\">Generated at {} \
         (PDF extracted {}, DOCX extracted {})</p>",
        report.generated_at.to_rfc3339(),
        report.pdf.extracted_at.to_rfc3339(),
        report.docx.extracted_at.to_rfc3339()
    );
}

fn render_metrics(html: &mut String, report: &ComparisonReport) {
    let metrics = &report.outcome.metrics;
    html.push_str("<h2>Metrics</h2>\n<table class=\"metrics\">\n");
    html.push_str("<tr><th>Metric</th><th>Value</th></tr>\n");
    let rows = [
        ("Character similarity", percent(metrics.char_ratio)),
        ("Token similarity (token sort ratio)", percent(metrics.token_fuzzy_ratio)),
        ("Sentence coverage", percent(metrics.sentence_coverage)),
        (
            "Matched PDF sentences",
            format!("{} / {}", metrics.matched_sentences, metrics.total_sentences),
        ),
        ("Unmatched PDF sentences", metrics.unmatched_sentences().to_string()),
        (
            "Identical after normalization",
            yes_no(report.identical_after_normalization()).to_string(),
        ),
    ];
    for (label, value) in rows {
        let _ = writeln!(
            html,
            "<tr><td>{label}</td><td class=\"num\">{}</td></tr>",
            escape_html(&value)
        );
    }
    html.push_str("</table>\n");
}

fn render_settings(html: &mut String, report: &ComparisonReport) {
    let settings = &report.settings;
    let policy = &settings.normalization;
    html.push_str("<h2>Settings</h2>\n<table class=\"settings\">\n");
    let rows = [
        ("Sentence match threshold", percent(settings.sentence_threshold)),
        (
            "Coverage strategy",
            match settings.coverage_strategy {
                CoverageStrategy::Substring => "best substring".to_string(),
                CoverageStrategy::BestSentence => "best sentence".to_string(),
            },
        ),
        ("Normalization version", policy.version.to_string()),
        ("Typography folded", yes_no(policy.fold_typography).to_string()),
        ("Page-number lines dropped", yes_no(policy.drop_page_numbers).to_string()),
        ("Heading lines dropped", yes_no(policy.drop_heading_lines).to_string()),
        ("Line-end hyphenation joined", yes_no(policy.strip_hyphenation).to_string()),
        ("Punctuation stripped", yes_no(policy.strip_punctuation).to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(html, "<tr><td>{label}</td><td>{}</td></tr>", escape_html(&value));
    }
    html.push_str("</table>\n");
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn render_documents(html: &mut String, report: &ComparisonReport) {
    html.push_str("<h2>Documents</h2>\n<table class=\"documents\">\n");
    html.push_str(
        "<tr><th>Format</th><th>File</th><th>Units</th><th>Bytes</th>\
         <th>Canonical chars</th><th>Tokens</th><th>Sentences</th>\
         <th>Canonical SHA-256</th><th>Warnings</th></tr>\n",
    );
    for doc in [&report.pdf, &report.docx] {
        document_row(html, doc);
    }
    html.push_str("</table>\n");
}

fn document_row(html: &mut String, doc: &DocumentSummary) {
    let _ = write!(
        html,
        "<tr><td>{}</td><td>{}</td><td class=\"num\">{} {}</td><td class=\"num\">{}</td>\
         <td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
         <td><code>{}</code></td><td>",
        doc.format,
        escape_html(&doc.name),
        doc.unit_count,
        doc.format.unit_name(),
        doc.byte_size,
        doc.canonical_chars,
        doc.token_count,
        doc.sentence_count,
        escape_html(&doc.sha256_hex)
    );
    if doc.warnings.is_empty() {
        html.push_str("none");
    } else {
        html.push_str("<ul class=\"warnings\">");
        for warning in &doc.warnings {
            let _ = write!(html, "<li>{}</li>", escape_html(&warning.to_string()));
        }
        html.push_str("</ul>");
    }
    html.push_str("</td></tr>\n");
}

fn render_unmatched(html: &mut String, report: &ComparisonReport, cfg: &ReportConfig) {
    let unmatched = report.unmatched_sentences();
    let _ = writeln!(
        html,
        "<h2>Unmatched PDF sentences ({})</h2>",
        unmatched.len()
    );
    if unmatched.is_empty() {
        html.push_str("<p>Every PDF sentence was found in the DOCX text.</p>\n");
        return;
    }
    html.push_str("<ol class=\"unmatched\">\n");
    for sentence in unmatched {
        let _ = writeln!(
            html,
            "<li><span class=\"score\">{}</span>{}</li>",
            percent(sentence.score),
            escape_html(&truncate_chars(&sentence.text, cfg.snippet_chars))
        );
    }
    html.push_str("</ol>\n");
}

fn render_diff(html: &mut String, report: &ComparisonReport, cfg: &ReportConfig) {
    html.push_str("<h2>Differences</h2>\n");
    html.push_str(
        "<p class=\"legend\"><del>only in PDF</del> <ins>only in DOCX</ins> \
         (computed on normalized text)</p>\n",
    );
    let spans = &report.outcome.diff;
    if spans.is_empty() {
        html.push_str("<p>Both documents are empty after normalization.</p>\n");
        return;
    }
    if spans.iter().all(DiffSpan::is_equal) {
        html.push_str("<p>No differences after normalization.</p>\n");
    }

    html.push_str("<div class=\"diff\">");
    let last = spans.len() - 1;
    for (idx, span) in spans.iter().enumerate() {
        let old = span.old_text(&report.pdf_text);
        let new = span.new_text(&report.docx_text);
        match span.tag {
            DiffTag::Equal => push_equal(html, old, idx == 0, idx == last, cfg),
            DiffTag::Delete => push_tagged(html, "del", old),
            DiffTag::Insert => push_tagged(html, "ins", new),
            DiffTag::Replace => {
                push_tagged(html, "del", old);
                push_tagged(html, "ins", new);
            }
        }
    }
    html.push_str("</div>\n");
}

fn push_tagged(html: &mut String, tag: &str, text: &str) {
    let _ = write!(html, "<{tag}>{}</{tag}>", escape_html(text));
}

/// Unchanged text, eliding the middle of long runs. The leading run keeps
/// only its tail and the trailing run only its head.
fn push_equal(html: &mut String, text: &str, first: bool, last: bool, cfg: &ReportConfig) {
    let chars = text.chars().count();
    if cfg.collapse_equal_over == 0 || chars <= cfg.collapse_equal_over {
        html.push_str(&escape_html(text));
        return;
    }

    let head = if first { 0 } else { cfg.context_chars };
    let tail = if last { 0 } else { cfg.context_chars };
    if head + tail >= chars {
        html.push_str(&escape_html(text));
        return;
    }
    let head_end = byte_offset(text, head);
    let tail_start = byte_offset(text, chars - tail);

    html.push_str(&escape_html(&text[..head_end]));
    let _ = write!(
        html,
        "<span class=\"elided\">[\u{2026} {} unchanged characters \u{2026}]</span>",
        chars - head - tail
    );
    html.push_str(&escape_html(&text[tail_start..]));
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>&'</b>"), "&lt;b&gt;&amp;&#x27;&lt;/b&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(percent(1.0), "100.00%");
        assert_eq!(percent(0.5), "50.00%");
        assert_eq!(percent(0.987654), "98.77%");
        assert_eq!(percent(0.0), "0.00%");
    }

    #[test]
    fn short_equal_runs_are_kept() {
        let mut html = String::new();
        push_equal(&mut html, "a < b", false, false, &ReportConfig::default());
        assert_eq!(html, "a &lt; b");
    }

    #[test]
    fn long_equal_runs_are_elided() {
        let cfg = ReportConfig {
            collapse_equal_over: 10,
            context_chars: 2,
            ..Default::default()
        };
        let text = "abcdefghijklmnop";

        let mut middle = String::new();
        push_equal(&mut middle, text, false, false, &cfg);
        assert!(middle.starts_with("ab<span class=\"elided\">"));
        assert!(middle.contains("12 unchanged characters"));
        assert!(middle.ends_with("</span>op"));

        let mut leading = String::new();
        push_equal(&mut leading, text, true, false, &cfg);
        assert!(leading.starts_with("<span class=\"elided\">"));
        assert!(leading.contains("14 unchanged characters"));

        let mut whole = String::new();
        push_equal(&mut whole, text, true, true, &cfg);
        assert!(whole.contains("16 unchanged characters"));
    }

    #[test]
    fn context_wider_than_collapse_keeps_run() {
        let cfg = ReportConfig {
            collapse_equal_over: 4,
            context_chars: 5,
            ..Default::default()
        };
        let mut html = String::new();
        push_equal(&mut html, "abcdefgh", false, false, &cfg);
        assert_eq!(html, "abcdefgh");

        let mut leading = String::new();
        push_equal(&mut leading, "abcdefgh", true, false, &cfg);
        assert!(leading.contains("3 unchanged characters"));
        assert!(leading.ends_with("</span>defgh"));
    }

    #[test]
    fn elision_respects_char_boundaries() {
        let cfg = ReportConfig {
            collapse_equal_over: 4,
            context_chars: 1,
            ..Default::default()
        };
        let mut html = String::new();
        push_equal(&mut html, "éééééé", false, false, &cfg);
        assert!(html.starts_with("é<span"));
        assert!(html.ends_with("</span>é"));
    }
}
