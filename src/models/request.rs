// file: src/models/request.rs
// description: validated search request built from the raw UI/CLI input

use crate::error::{Result, SearchError};
use crate::models::keyword::KeywordSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub directory: PathBuf,
    pub keywords: KeywordSet,
}

impl SearchRequest {
    pub fn new(directory: impl Into<PathBuf>, keywords: KeywordSet) -> Self {
        Self {
            directory: directory.into(),
            keywords,
        }
    }

    /// Builds a request from a directory and the raw keyword field.
    ///
    /// Keywords are checked first so a blank keyword field is reported the
    /// same way for every directory.
    pub fn parse(directory: impl AsRef<Path>, raw_keywords: &str) -> Result<Self> {
        let keywords = KeywordSet::parse(raw_keywords)?;
        let directory = directory.as_ref();
        if directory.as_os_str().is_empty() {
            return Err(SearchError::InvalidInput(
                "a directory to search is required".to_string(),
            ));
        }
        Ok(Self::new(directory, keywords))
    }
}
