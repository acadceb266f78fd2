// file: src/extractor/mod.rs
// description: per-format text extraction behind one lazy (text, location) contract
// reference: internal module structure

pub mod docx;
pub mod pdf;
pub mod spreadsheet;

use crate::config::FormatConfig;
use crate::error::ExtractionError;
use crate::models::{DocumentFormat, Location};
use serde::Serialize;
use std::path::Path;

/// One searchable piece of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub text: String,
    pub location: Location,
}

impl TextUnit {
    pub fn new(text: impl Into<String>, location: Location) -> Self {
        Self {
            text: text.into(),
            location,
        }
    }
}

/// Finite, single-pass sequence of units. An `Err` item ends the document.
pub type UnitStream = Box<dyn Iterator<Item = Result<TextUnit, ExtractionError>>>;

/// Optional extraction support, resolved once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub legacy_excel: bool,
}

impl Capabilities {
    /// Legacy Excel needs both the `xls` feature and the config switch.
    pub fn detect(formats: &FormatConfig) -> Self {
        Self {
            legacy_excel: cfg!(feature = "xls") && formats.legacy_excel,
        }
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        match format {
            DocumentFormat::Pdf | DocumentFormat::Docx | DocumentFormat::Xlsx => true,
            DocumentFormat::Xls => self.legacy_excel,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect(&FormatConfig::default())
    }
}

/// Opens `path` with the extractor registered for `format`.
pub fn extract(
    format: DocumentFormat,
    path: &Path,
    capabilities: &Capabilities,
) -> Result<UnitStream, ExtractionError> {
    if !capabilities.supports(format) {
        return Err(ExtractionError::UnsupportedFormat(format.to_string()));
    }

    match format {
        DocumentFormat::Pdf => pdf::extract(path),
        DocumentFormat::Docx => docx::extract(path),
        DocumentFormat::Xlsx => spreadsheet::extract_xlsx(path),
        DocumentFormat::Xls => extract_legacy_excel(path),
    }
}

#[cfg(feature = "xls")]
fn extract_legacy_excel(path: &Path) -> Result<UnitStream, ExtractionError> {
    spreadsheet::extract_xls(path)
}

#[cfg(not(feature = "xls"))]
fn extract_legacy_excel(_path: &Path) -> Result<UnitStream, ExtractionError> {
    Err(ExtractionError::UnsupportedFormat(
        DocumentFormat::Xls.to_string(),
    ))
}
