// file: src/navigation.rs
// description: turns a hit location into something a viewer can focus
// reference: pure derivation, the consumer decides how to open documents

use crate::models::Location;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Implemented by whatever front end can open documents. The search core
/// never opens anything itself.
pub trait NavigationResolver {
    type Error;

    fn navigate(&self, path: &Path, location: &Location) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigationTarget {
    OpenDocument {
        path: PathBuf,
    },
    OpenPage {
        path: PathBuf,
        page: u32,
    },
    OpenCell {
        path: PathBuf,
        sheet: String,
        reference: String,
    },
}

impl NavigationTarget {
    pub fn resolve(path: &Path, location: &Location) -> Self {
        let path = path.to_path_buf();
        match location {
            Location::WholeDocument => Self::OpenDocument { path },
            Location::Page { index } => Self::OpenPage { path, page: *index },
            Location::Cell {
                sheet, reference, ..
            } => Self::OpenCell {
                path,
                sheet: sheet.clone(),
                reference: reference.clone(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::OpenDocument { path }
            | Self::OpenPage { path, .. }
            | Self::OpenCell { path, .. } => path,
        }
    }

    /// Viewer fragment in the form PDF readers accept, e.g. `page=3`.
    pub fn fragment(&self) -> Option<String> {
        match self {
            Self::OpenPage { page, .. } => Some(format!("page={}", page)),
            _ => None,
        }
    }

    /// The document path, with `#page=N` appended for PDF pages.
    pub fn address(&self) -> String {
        let base = self.path().display().to_string();
        match self.fragment() {
            Some(fragment) => format!("{}#{}", base, fragment),
            None => base,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::OpenDocument { .. } => "open document".to_string(),
            Self::OpenPage { page, .. } => format!("open at page {}", page),
            Self::OpenCell {
                sheet, reference, ..
            } => format!("select {} on sheet \"{}\"", reference, sheet),
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address(), self.describe())
    }
}
