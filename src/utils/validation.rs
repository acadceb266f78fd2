// file: src/utils/validation.rs
// description: request validation and path/text helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SearchError::InvalidInput(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(SearchError::InvalidInput(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Forward slashes only, no doubled separators, no surrounding blanks.
    pub fn sanitize_file_path(path: &str) -> String {
        let mut sanitized = path.trim().replace('\\', "/");
        while sanitized.contains("//") {
            sanitized = sanitized.replace("//", "/");
        }
        sanitized
    }

    /// Cuts `text` to `max_chars` characters, appending "..." when shortened.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        }
    }
}
