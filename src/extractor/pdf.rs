// file: src/extractor/pdf.rs
// description: page-by-page text extraction for PDF documents
// reference: https://docs.rs/lopdf

use crate::error::ExtractionError;
use crate::extractor::{TextUnit, UnitStream};
use crate::models::Location;
use lopdf::Document;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The header may be preceded by up to 1024 bytes of junk.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Loads the document eagerly and extracts page text on demand, one unit per
/// page numbered from 1.
pub fn extract(path: &Path) -> Result<UnitStream, ExtractionError> {
    let bytes = fs::read(path).map_err(|e| ExtractionError::unreadable(path, e))?;

    if !has_pdf_header(&bytes) {
        return Err(ExtractionError::unreadable(path, "missing %PDF header"));
    }

    let document =
        Document::load_mem(&bytes).map_err(|e| ExtractionError::unreadable(path, e))?;
    drop(bytes);

    if document.is_encrypted() {
        return Err(ExtractionError::unreadable(
            path,
            "document is password-protected",
        ));
    }

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let display_path = path.display().to_string();

    Ok(Box::new(page_numbers.into_iter().map(move |number| {
        let text = match document.extract_text(&[number]) {
            Ok(text) => text,
            Err(e) => {
                // Scanned or oddly encoded pages still count as pages.
                debug!(
                    "No text extracted from page {} of {}: {}",
                    number, display_path, e
                );
                String::new()
            }
        };
        Ok(TextUnit::new(text, Location::page(number)))
    })))
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW + 5)];
    window.windows(5).any(|w| w == b"%PDF-")
}
