//! DOCX body text extraction.
//!
//! A DOCX file is a zip archive; the body lives in `word/document.xml`.
//! Paragraph text is the concatenation of its `w:t` runs, with `w:tab`,
//! `w:br` and `w:cr` mapped to whitespace. Deleted tracked changes
//! (`w:delText`) and field instructions (`w:instrText`) are not text.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ExtractError;
use crate::types::{DocumentFormat, ExtractWarning};
use crate::Extracted;

const MAGIC: &[u8] = b"PK\x03\x04";
const BODY_PART: &str = "word/document.xml";

pub(crate) fn extract_docx(
    path: &Path,
    bytes: &[u8],
    include_tables: bool,
) -> Result<Extracted, ExtractError> {
    if !bytes.starts_with(MAGIC) {
        return Err(ExtractError::WrongFormat {
            path: path.to_path_buf(),
            format: DocumentFormat::Docx,
            reason: "not a zip container".into(),
        });
    }

    let parse_error = |reason: String| ExtractError::Parse {
        path: path.to_path_buf(),
        format: DocumentFormat::Docx,
        reason,
    };

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| parse_error(format!("failed to open archive: {err}")))?;
    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(|err| parse_error(format!("missing {BODY_PART}: {err}")))?
        .read_to_string(&mut xml)
        .map_err(|err| parse_error(format!("failed to read {BODY_PART}: {err}")))?;

    let body = read_body(&xml, include_tables).map_err(parse_error)?;
    let mut warnings = Vec::new();
    if body.tables_skipped > 0 {
        warnings.push(ExtractWarning::TablesSkipped {
            count: body.tables_skipped,
        });
    }

    Ok(Extracted {
        text: body.text,
        unit_count: body.paragraphs,
        warnings,
    })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Body {
    text: String,
    paragraphs: usize,
    tables_skipped: usize,
}

/// Walk `document.xml` and collect paragraph text in document order.
fn read_body(xml: &str, include_tables: bool) -> Result<Body, String> {
    // Whitespace inside `w:t` is significant, so text is never trimmed.
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut body = Body::default();
    let mut paragraph = String::new();
    let mut table_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let skipping = table_depth > 0 && !include_tables;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tbl" => {
                    if table_depth == 0 && !include_tables {
                        body.tables_skipped += 1;
                    }
                    table_depth += 1;
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => {
                    if !skipping && !paragraph.trim().is_empty() {
                        body.text.push_str(&paragraph);
                        body.text.push_str("\n\n");
                        body.paragraphs += 1;
                    }
                    paragraph.clear();
                }
                _ => {}
            },
            // `w:tab` also appears in paragraph properties as a tab stop;
            // only a tab inside a run is content.
            Ok(Event::Empty(ref e)) if run_depth > 0 && !skipping => {
                match e.local_name().as_ref() {
                    b"tab" => paragraph.push('\t'),
                    b"br" | b"cr" => paragraph.push('\n'),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) if in_text && !skipping => {
                let text = e
                    .unescape()
                    .map_err(|err| format!("bad text at byte {}: {err}", reader.buffer_position()))?;
                paragraph.push_str(&text);
            }
            Ok(Event::CData(e)) if in_text && !skipping => {
                paragraph.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(format!(
                    "xml error at byte {}: {err}",
                    reader.buffer_position()
                ))
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    let trimmed = body.text.trim_end().len();
    body.text.truncate(trimmed);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    #[test]
    fn paragraphs_in_order_with_runs_joined() {
        let xml = document(
            r#"<w:p><w:r><w:t>The quick </w:t></w:r><w:r><w:t>brown fox.</w:t></w:r></w:p>
<w:p><w:r><w:t xml:space="preserve">It jumps</w:t><w:tab/><w:t>daily &amp; nightly.</w:t></w:r></w:p>"#,
        );
        let body = read_body(&xml, false).expect("valid xml");
        assert_eq!(body.text, "The quick brown fox.\n\nIt jumps\tdaily & nightly.");
        assert_eq!(body.paragraphs, 2);
    }

    #[test]
    fn deleted_text_and_field_codes_ignored() {
        let xml = document(
            r#"<w:p><w:r><w:t>kept</w:t></w:r><w:del><w:r><w:delText>removed</w:delText></w:r></w:del><w:r><w:instrText> PAGE </w:instrText></w:r></w:p>"#,
        );
        assert_eq!(read_body(&xml, false).expect("valid xml").text, "kept");
    }

    #[test]
    fn tab_stops_are_not_text() {
        let xml = document(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>body</w:t><w:br/><w:t>next</w:t></w:r></w:p>"#,
        );
        assert_eq!(read_body(&xml, false).expect("valid xml").text, "body\nnext");
    }

    #[test]
    fn tables_skipped_by_default() {
        let xml = document(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        let skipped = read_body(&xml, false).expect("valid xml");
        assert_eq!(skipped.text, "before\n\nafter");
        assert_eq!(skipped.tables_skipped, 1);

        let included = read_body(&xml, true).expect("valid xml");
        assert_eq!(included.text, "before\n\ncell\n\nafter");
        assert_eq!(included.tables_skipped, 0);
    }

    #[test]
    fn empty_body_is_empty_text() {
        let body = read_body(&document(""), false).expect("valid xml");
        assert_eq!(body, Body::default());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(read_body("<w:document><w:body><w:p></w:body>", false).is_err());
    }

    #[test]
    fn non_zip_rejected() {
        let err = extract_docx(Path::new("paper.docx"), b"%PDF-1.7", false)
            .expect_err("pdf bytes are not a docx");
        assert!(matches!(err, ExtractError::WrongFormat { .. }));
    }

    #[test]
    fn zip_without_body_rejected() {
        let err = extract_docx(Path::new("paper.docx"), b"PK\x03\x04garbage", false)
            .expect_err("corrupt zip fails");
        assert!(matches!(err, ExtractError::Parse { .. }));
    }
}
