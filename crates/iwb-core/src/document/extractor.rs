//! Text recovery from document bytes using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::{debug, warn};

use super::{DocumentKind, Result};
use crate::error::TextExtractionError;
use crate::models::config::DocumentConfig;

/// Recover plain text from raw document bytes.
///
/// The result is whitespace-flattened when the config asks for it, which is
/// the form the field extractor expects.
pub fn extract_text(data: &[u8], kind: DocumentKind, config: &DocumentConfig) -> Result<String> {
    let text = match kind {
        DocumentKind::Pdf => extract_pdf_text(data, config.max_pages)?,
        DocumentKind::Text => String::from_utf8(data.to_vec())?,
    };

    let text = if config.normalize_whitespace {
        normalize_whitespace(&text)
    } else {
        text
    };

    let length = text.trim().chars().count();
    if length < config.min_text_length {
        return Err(TextExtractionError::Empty(length));
    }

    debug!("Recovered {} characters of text from {:?} document", length, kind);
    Ok(text)
}

/// Collapse every whitespace run (including newlines) to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_pdf_text(data: &[u8], max_pages: usize) -> Result<String> {
    let mut doc = Document::load_mem(data).map_err(|e| TextExtractionError::Pdf(e.to_string()))?;

    // Only the empty user password is tried
    let raw: Cow<'_, [u8]> = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(TextExtractionError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| TextExtractionError::Pdf(format!("failed to save decrypted PDF: {}", e)))?;
        Cow::Owned(decrypted)
    } else {
        Cow::Borrowed(data)
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(TextExtractionError::NoPages);
    }
    if page_count > max_pages {
        warn!(
            "PDF has {} pages, only single-page layouts are supported; fields are read from the whole text",
            page_count
        );
    }

    pdf_extract::extract_text_from_mem(&raw).map_err(|e| TextExtractionError::Pdf(e.to_string()))
}
