// file: src/scanner/walker.rs
// description: Directory walking and candidate document discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::DocumentFormat;
use crate::utils::validation::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Office writes `~$name.docx` owner files next to open documents.
const OFFICE_LOCK_PREFIX: &str = "~$";

pub struct FileWalker {
    config: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub format: DocumentFormat,
    pub size: u64,
}

impl CandidateFile {
    /// Builds a candidate for a single path, outside of any walk.
    pub fn from_path(path: &Path) -> Option<Self> {
        let format = DocumentFormat::from_path(path)?;
        let size = path.metadata().map(|m| m.len()).unwrap_or(0);
        let relative_path = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Some(Self {
            path: path.to_path_buf(),
            relative_path,
            format,
            size,
        })
    }
}

impl FileWalker {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Recursively lists documents with a recognized extension, sorted by
    /// full path so repeated walks yield the same order.
    pub fn collect(&self, root: &Path) -> Result<Vec<CandidateFile>> {
        Validator::validate_directory(root)?;
        info!("Scanning directory: {}", root.display());

        let mut files = Vec::new();
        let skip_hidden = self.config.skip_hidden;

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|entry| !(skip_hidden && entry.depth() > 0 && is_hidden(entry)));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            let Some(format) = DocumentFormat::from_path(path) else {
                continue;
            };

            let relative_path = Validator::sanitize_file_path(
                &path
                    .strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy(),
            );

            if is_lock_file(path) || self.should_skip(&relative_path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    warn!("Cannot stat {}: {}", path.display(), err);
                    continue;
                }
            };

            let max_size = (self.config.max_file_size_mb as u64) * 1_048_576;
            if max_size > 0 && size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1_048_576,
                    path.display()
                );
                continue;
            }

            files.push(CandidateFile {
                path: path.to_path_buf(),
                relative_path,
                format,
                size,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));

        info!("Found {} candidate documents", files.len());
        Ok(files)
    }

    /// Patterns apply below the search root only, never to the root's own path.
    fn should_skip(&self, path_str: &str) -> bool {
        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if path_str.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if path_str.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(OFFICE_LOCK_PREFIX))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
