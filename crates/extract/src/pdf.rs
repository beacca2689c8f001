//! PDF text layer extraction.
//!
//! `lopdf` validates the container and counts pages; `pdf-extract` produces
//! the text of each page, and the pages are joined here with a blank line so
//! a sentence ending at a page break stays separate from the next page.

use std::any::Any;
use std::panic;
use std::path::Path;

use crate::error::ExtractError;
use crate::types::{DocumentFormat, ExtractWarning};
use crate::Extracted;

const MAGIC: &[u8] = b"%PDF-";
/// Some producers put junk before the header; readers accept it within 1 KiB.
const MAGIC_WINDOW: usize = 1024;

pub(crate) fn extract_pdf(path: &Path, bytes: &[u8]) -> Result<Extracted, ExtractError> {
    let head = &bytes[..bytes.len().min(MAGIC_WINDOW)];
    if !head.windows(MAGIC.len()).any(|window| window == MAGIC) {
        return Err(ExtractError::WrongFormat {
            path: path.to_path_buf(),
            format: DocumentFormat::Pdf,
            reason: "missing %PDF- header".into(),
        });
    }

    let document = lopdf::Document::load_mem(bytes).map_err(|err| ExtractError::Parse {
        path: path.to_path_buf(),
        format: DocumentFormat::Pdf,
        reason: err.to_string(),
    })?;
    if document.trailer.get(b"Encrypt").is_ok() {
        return Err(ExtractError::Encrypted {
            path: path.to_path_buf(),
            format: DocumentFormat::Pdf,
        });
    }
    let page_count = document.get_pages().len();
    drop(document);

    // pdf-extract panics on some malformed font and encoding tables.
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|payload| ExtractError::Parse {
            path: path.to_path_buf(),
            format: DocumentFormat::Pdf,
            reason: format!("pdf parser panicked: {}", panic_message(payload.as_ref())),
        })?
        .map_err(|err| classify_output_error(path, &err.to_string()))?;

    let (text, blank_pages) = join_pages(&pages);
    let mut warnings = Vec::new();
    if blank_pages > 0 {
        warnings.push(ExtractWarning::BlankPages { count: blank_pages });
    }

    Ok(Extracted {
        text,
        unit_count: page_count,
        warnings,
    })
}

/// Join the per-page texts with a blank line, skipping empty pages.
///
/// Returns the text and the number of pages that came out empty.
fn join_pages<S: AsRef<str>>(pages: &[S]) -> (String, usize) {
    let mut text = String::new();
    let mut blank = 0;
    for page in pages {
        let page = page.as_ref().trim();
        if page.is_empty() {
            blank += 1;
            continue;
        }
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(page);
    }
    (text, blank)
}

fn classify_output_error(path: &Path, message: &str) -> ExtractError {
    let lowered = message.to_lowercase();
    if lowered.contains("encrypt") || lowered.contains("password") {
        ExtractError::Encrypted {
            path: path.to_path_buf(),
            format: DocumentFormat::Pdf,
        }
    } else {
        ExtractError::Parse {
            path: path.to_path_buf(),
            format: DocumentFormat::Pdf,
            reason: message.to_string(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_header() {
        let err = extract_pdf(Path::new("notes.pdf"), b"PK\x03\x04 not a pdf")
            .expect_err("zip bytes are not a pdf");
        assert!(matches!(err, ExtractError::WrongFormat { .. }));
    }

    #[test]
    fn rejects_truncated_body() {
        let err = extract_pdf(Path::new("broken.pdf"), b"%PDF-1.7\n1 0 obj\n<< /Type")
            .expect_err("truncated pdf fails");
        assert!(matches!(err, ExtractError::Parse { .. }));
        assert!(err.to_string().contains("broken.pdf"));
    }

    #[test]
    fn pages_joined_in_order() {
        let (text, blank) = join_pages(&["\n\nfirst page.\n", "second page.", "  \n"]);
        assert_eq!(text, "first page.\n\nsecond page.");
        assert_eq!(blank, 1);
    }

    #[test]
    fn page_boundary_keeps_words_apart() {
        let pages = vec![
            String::from("Chapter one opens quietly."),
            String::from("Chapter two ends loudly."),
        ];
        let (text, blank) = join_pages(&pages);
        assert_eq!(text, "Chapter one opens quietly.\n\nChapter two ends loudly.");
        assert_eq!(blank, 0);
    }

    #[test]
    fn encryption_messages_are_classified() {
        let err = classify_output_error(Path::new("a.pdf"), "The file is Encrypted");
        assert!(matches!(err, ExtractError::Encrypted { .. }));
        let err = classify_output_error(Path::new("a.pdf"), "unexpected token");
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn panic_payloads_are_readable() {
        let payload: Box<dyn Any + Send> = Box::new("bad font");
        assert_eq!(panic_message(payload.as_ref()), "bad font");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bad cmap"));
        assert_eq!(panic_message(payload.as_ref()), "bad cmap");
    }
}
