// file: src/models/report.rs
// description: aggregated, ordered result of one directory scan
// reference: built exclusively by the search worker, handed out once terminal

use crate::models::document::{DocumentResult, DocumentStatus};
use crate::models::keyword::KeywordSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How the search that produced a report ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub root: PathBuf,
    pub keywords: KeywordSet,
    pub completion: Completion,
    pub documents_scanned: usize,
    pub total_files: usize,
    pub documents_matched: Vec<DocumentResult>,
    pub diagnostics: Vec<DocumentResult>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl SearchReport {
    pub fn is_cancelled(&self) -> bool {
        self.completion == Completion::Cancelled
    }

    pub fn total_hits(&self) -> usize {
        self.documents_matched.iter().map(|d| d.hits.len()).sum()
    }

    pub fn count_with_status(&self, status: DocumentStatus) -> usize {
        self.diagnostics.iter().filter(|d| d.status == status).count()
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Accumulates document results while a search is running.
#[derive(Debug)]
pub(crate) struct ReportBuilder {
    root: PathBuf,
    keywords: KeywordSet,
    started_at: DateTime<Utc>,
    total_files: usize,
    documents_scanned: usize,
    documents_matched: Vec<DocumentResult>,
    diagnostics: Vec<DocumentResult>,
}

impl ReportBuilder {
    pub(crate) fn new(root: PathBuf, keywords: KeywordSet) -> Self {
        Self {
            root,
            keywords,
            started_at: Utc::now(),
            total_files: 0,
            documents_scanned: 0,
            documents_matched: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn set_total_files(&mut self, total: usize) {
        self.total_files = total;
    }

    /// Files a finished document: matches and problems go to separate lists,
    /// readable documents without hits are only counted.
    pub(crate) fn record(&mut self, result: DocumentResult) {
        self.documents_scanned += 1;
        if result.is_problem() {
            self.diagnostics.push(result);
        } else if result.is_match() {
            self.documents_matched.push(result);
        }
    }

    pub(crate) fn documents_scanned(&self) -> usize {
        self.documents_scanned
    }

    pub(crate) fn finish(self, completion: Completion, elapsed: Duration) -> SearchReport {
        SearchReport {
            root: self.root,
            keywords: self.keywords,
            completion,
            documents_scanned: self.documents_scanned,
            total_files: self.total_files,
            documents_matched: self.documents_matched,
            diagnostics: self.diagnostics,
            started_at: self.started_at,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}
