// file: src/models/location.rs
// description: addressable points inside a document (page, cell, whole document)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where inside a document a hit was found.
///
/// `Cell::reference` is always derived from `row` and `column`; build cells
/// through [`Location::cell`] to keep the two in sync.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    WholeDocument,
    Page {
        index: u32,
    },
    Cell {
        sheet: String,
        row: u32,
        column: u32,
        reference: String,
    },
}

impl Location {
    pub fn page(index: u32) -> Self {
        Location::Page { index }
    }

    /// `row` and `column` are 1-based.
    pub fn cell(sheet: impl Into<String>, row: u32, column: u32) -> Self {
        Location::Cell {
            sheet: sheet.into(),
            row,
            column,
            reference: cell_reference(row, column),
        }
    }

    /// Short label suitable for rendering next to a hit.
    pub fn label(&self) -> String {
        match self {
            Location::WholeDocument => "Document".to_string(),
            Location::Page { index } => format!("Page {}", index),
            Location::Cell { reference, .. } => reference.clone(),
        }
    }

    pub fn sheet(&self) -> Option<&str> {
        match self {
            Location::Cell { sheet, .. } => Some(sheet),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell {
                sheet, reference, ..
            } => write!(f, "{}!{}", sheet, reference),
            other => f.write_str(&other.label()),
        }
    }
}

/// Converts a 1-based column number to spreadsheet letters (1 -> A, 27 -> AA).
pub fn column_letters(column: u32) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

pub fn cell_reference(row: u32, column: u32) -> String {
    format!("{}{}", column_letters(column), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(2), "B");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(53), "BA");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
        assert_eq!(column_letters(16384), "XFD");
    }

    #[test]
    fn test_cell_reference_derivation() {
        let a5 = Location::cell("Sheet1", 5, 1);
        let b10 = Location::cell("Sheet1", 10, 2);

        assert!(matches!(&a5, Location::Cell { reference, .. } if reference == "A5"));
        assert!(matches!(&b10, Location::Cell { reference, .. } if reference == "B10"));
        assert_eq!(a5.sheet(), Some("Sheet1"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Location::WholeDocument.label(), "Document");
        assert_eq!(Location::page(3).label(), "Page 3");
        assert_eq!(Location::cell("Data", 5, 1).label(), "A5");
        assert_eq!(Location::cell("Data", 5, 1).to_string(), "Data!A5");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Location::page(2)).unwrap();
        assert_eq!(json["kind"], "page");
        assert_eq!(json["index"], 2);

        let json = serde_json::to_value(Location::cell("S", 1, 3)).unwrap();
        assert_eq!(json["kind"], "cell");
        assert_eq!(json["reference"], "C1");
    }
}
