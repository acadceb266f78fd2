// file: src/models/document.rs
// description: per-document search outcome: format, status and ordered hits
// reference: internal data structures

use crate::models::keyword::Keyword;
use crate::models::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Xlsx,
    Xls,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Xlsx,
        DocumentFormat::Xls,
    ];

    /// Detects the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "xlsx" => Some(DocumentFormat::Xlsx),
            "xls" => Some(DocumentFormat::Xls),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Xls => "xls",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF document (page text)",
            DocumentFormat::Docx => "Word document (paragraphs and tables)",
            DocumentFormat::Xlsx => "Excel workbook (cell values)",
            DocumentFormat::Xls => "Legacy Excel workbook (cell values)",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Ok,
    Unsupported,
    Unreadable,
    Empty,
}

/// One matched location and the keywords found there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub location: Location,
    pub matched_keywords: BTreeSet<Keyword>,
}

impl Hit {
    pub fn new(location: Location, matched_keywords: BTreeSet<Keyword>) -> Self {
        Self {
            location,
            matched_keywords,
        }
    }

    pub fn keywords_label(&self) -> String {
        self.matched_keywords
            .iter()
            .map(Keyword::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub relative_path: String,
    pub format: DocumentFormat,
    pub hits: Vec<Hit>,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DocumentResult {
    pub fn new(path: PathBuf, relative_path: String, format: DocumentFormat) -> Self {
        Self {
            path,
            relative_path,
            format,
            hits: Vec::new(),
            status: DocumentStatus::Ok,
            detail: None,
        }
    }

    pub fn with_status(mut self, status: DocumentStatus, detail: Option<String>) -> Self {
        if status != DocumentStatus::Ok {
            self.hits.clear();
        }
        self.status = status;
        self.detail = detail;
        self
    }

    pub fn is_match(&self) -> bool {
        self.status == DocumentStatus::Ok && !self.hits.is_empty()
    }

    /// Documents the caller may want to surface as diagnostics.
    pub fn is_problem(&self) -> bool {
        self.status != DocumentStatus::Ok
    }

    /// Union of keywords across all hits.
    pub fn matched_keywords(&self) -> BTreeSet<Keyword> {
        self.hits
            .iter()
            .flat_map(|hit| hit.matched_keywords.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(terms: &[&str]) -> BTreeSet<Keyword> {
        terms.iter().filter_map(|t| Keyword::new(t)).collect()
    }

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/Report.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.Docx")),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("book.xlsx")),
            Some(DocumentFormat::Xlsx)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("old.XLS")),
            Some(DocumentFormat::Xls)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("readme.md")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_non_ok_status_drops_hits() {
        let mut result = DocumentResult::new(
            PathBuf::from("/tmp/a.pdf"),
            "a.pdf".to_string(),
            DocumentFormat::Pdf,
        );
        result
            .hits
            .push(Hit::new(Location::page(1), keywords(&["budget"])));
        assert!(result.is_match());

        let result = result.with_status(DocumentStatus::Unreadable, Some("broken".to_string()));
        assert!(result.hits.is_empty());
        assert!(!result.is_match());
        assert!(result.is_problem());
    }

    #[test]
    fn test_matched_keywords_union() {
        let mut result = DocumentResult::new(
            PathBuf::from("/tmp/b.xlsx"),
            "b.xlsx".to_string(),
            DocumentFormat::Xlsx,
        );
        result
            .hits
            .push(Hit::new(Location::cell("S", 1, 1), keywords(&["alpha"])));
        result.hits.push(Hit::new(
            Location::cell("S", 2, 1),
            keywords(&["beta", "alpha"]),
        ));

        let union: Vec<String> = result
            .matched_keywords()
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(union, vec!["alpha", "beta"]);
        assert_eq!(result.hits[1].keywords_label(), "alpha, beta");
    }
}
