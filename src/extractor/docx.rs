// file: src/extractor/docx.rs
// description: paragraph and table-cell text extraction for Word (.docx) documents
// reference: https://docs.rs/quick-xml, https://docs.rs/zip

use crate::error::ExtractionError;
use crate::extractor::{TextUnit, UnitStream};
use crate::models::Location;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

/// Every unit is addressed as the whole document; Word offers no finer
/// navigation target.
pub fn extract(path: &Path) -> Result<UnitStream, ExtractionError> {
    let file = File::open(path).map_err(|e| ExtractionError::unreadable(path, e))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| ExtractionError::unreadable(path, format!("not a docx archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::unreadable(path, format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::unreadable(path, e))?;

    let texts = body_texts(&xml).map_err(|e| ExtractionError::unreadable(path, e))?;

    Ok(Box::new(texts.into_iter().map(|text| {
        Ok(TextUnit::new(text, Location::WholeDocument))
    })))
}

/// Splits `word/document.xml` into body paragraphs and table cells, in
/// document order. Paragraphs inside a cell are joined with newlines and
/// reported once as the cell's text.
pub(crate) fn body_texts(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut texts = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut cells: Vec<String> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tc" => cells.push(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => paragraph.push('\t'),
                        b"w:br" | b"w:cr" => paragraph.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if in_text_run && let Some(paragraph) = paragraphs.last_mut() {
                    paragraph.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let paragraph = paragraphs.pop().unwrap_or_default();
                    match cells.last_mut() {
                        Some(cell) => {
                            if !cell.is_empty() {
                                cell.push('\n');
                            }
                            cell.push_str(&paragraph);
                        }
                        None => push_non_blank(&mut texts, paragraph),
                    }
                }
                b"w:tc" => {
                    let cell = cells.pop().unwrap_or_default();
                    push_non_blank(&mut texts, cell);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(texts)
}

fn push_non_blank(texts: &mut Vec<String>, text: String) {
    if !text.trim().is_empty() {
        texts.push(text);
    }
}
