// file: src/scanner/document.rs
// description: turns one candidate file into a DocumentResult, isolating per-file failures
// reference: drives an extractor and folds matcher output into hits

use crate::error::{ExtractionError, Result, SearchError};
use crate::extractor::{self, Capabilities, UnitStream};
use crate::matcher::Matcher;
use crate::models::{DocumentFormat, DocumentResult, DocumentStatus, Hit, Keyword, Location};
use crate::scanner::walker::CandidateFile;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

pub struct DocumentScanner {
    matcher: Matcher,
    capabilities: Capabilities,
}

impl DocumentScanner {
    pub fn new(matcher: Matcher, capabilities: Capabilities) -> Self {
        Self {
            matcher,
            capabilities,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Scans a single path; the extension must name a supported format.
    pub fn scan_path(&self, path: &Path) -> Result<DocumentResult> {
        let candidate = CandidateFile::from_path(path).ok_or_else(|| {
            SearchError::InvalidInput(format!(
                "unrecognized document extension: {}",
                path.display()
            ))
        })?;
        Ok(self.scan(&candidate))
    }

    /// Never fails: open, parse and capability problems end up in the
    /// result's status. Extracted text is dropped as soon as it is matched.
    pub fn scan(&self, file: &CandidateFile) -> DocumentResult {
        let result = DocumentResult::new(
            file.path.clone(),
            file.relative_path.clone(),
            file.format,
        );

        let units = match extractor::extract(file.format, &file.path, &self.capabilities) {
            Ok(units) => units,
            Err(ExtractionError::UnsupportedFormat(format)) => {
                debug!("No extractor available for {}", file.relative_path);
                return result.with_status(
                    DocumentStatus::Unsupported,
                    Some(format!("{} support is not available", format)),
                );
            }
            Err(err) => {
                warn!("Cannot read {}: {}", file.relative_path, err);
                return result.with_status(DocumentStatus::Unreadable, Some(err.to_string()));
            }
        };

        self.fold_units(file, result, units)
    }

    /// Matches every unit of one document. An error item makes the whole
    /// document unreadable and drops the hits gathered before it.
    pub(crate) fn fold_units(
        &self,
        file: &CandidateFile,
        mut result: DocumentResult,
        units: UnitStream,
    ) -> DocumentResult {
        let mut saw_text = false;
        let mut collapsed: BTreeSet<Keyword> = BTreeSet::new();

        for unit in units {
            let unit = match unit {
                Ok(unit) => unit,
                Err(err) => {
                    warn!("Extraction failed part-way through {}: {}", file.relative_path, err);
                    return result.with_status(DocumentStatus::Unreadable, Some(err.to_string()));
                }
            };

            if !unit.text.trim().is_empty() {
                saw_text = true;
            }

            let matched = self.matcher.matches(&unit.text);
            if matched.is_empty() {
                continue;
            }

            match file.format {
                DocumentFormat::Docx => collapsed.extend(matched),
                _ => result.hits.push(Hit::new(unit.location, matched)),
            }
        }

        if !collapsed.is_empty() {
            result.hits.push(Hit::new(Location::WholeDocument, collapsed));
        }

        if !saw_text {
            return result.with_status(
                DocumentStatus::Empty,
                Some("no extractable text".to_string()),
            );
        }

        debug!("{}: {} hit(s)", file.relative_path, result.hits.len());
        result
    }
}
