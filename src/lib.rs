// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

//! Keyword search across PDF, Word and Excel documents in a directory tree.
//!
//! A [`SearchCoordinator`] runs one search at a time on a background worker
//! and yields a [`SearchReport`] listing every page, cell or document that
//! contains at least one keyword. Files that cannot be read are reported as
//! diagnostics and never stop the search.

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod matcher;
pub mod models;
pub mod navigation;
pub mod pipeline;
pub mod scanner;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::{Config, FormatConfig, OutputConfig, SearchConfig};
pub use error::{ExtractionError, Result, SearchError};
pub use exporter::{ExportedReport, JsonExporter};
pub use extractor::{Capabilities, TextUnit};
pub use matcher::{MatchMode, Matcher};
pub use models::{
    Completion, DocumentFormat, DocumentResult, DocumentStatus, Hit, Keyword, KeywordSet,
    Location, SearchReport, SearchRequest,
};
pub use navigation::{NavigationResolver, NavigationTarget};
pub use pipeline::{
    CancelToken, ProgressObserver, ProgressTracker, ProgressUpdate, SearchCoordinator,
    SearchHandle, SearchState, SearchStats,
};
pub use scanner::{CandidateFile, DocumentScanner, FileWalker};
pub use utils::Validator;
