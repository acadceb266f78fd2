// file: src/extractor/spreadsheet.rs
// description: cell value extraction for Excel workbooks (.xlsx and legacy .xls)
// reference: https://docs.rs/calamine

use crate::error::ExtractionError;
use crate::extractor::{TextUnit, UnitStream};
use crate::models::Location;
use calamine::{Data, DataType, Range, Reader, Xlsx, open_workbook};
use std::fmt::Display;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

pub fn extract_xlsx(path: &Path) -> Result<UnitStream, ExtractionError> {
    let workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| ExtractionError::unreadable(path, e))?;
    Ok(workbook_units(workbook, path.to_path_buf()))
}

#[cfg(feature = "xls")]
pub fn extract_xls(path: &Path) -> Result<UnitStream, ExtractionError> {
    let workbook: calamine::Xls<_> =
        open_workbook(path).map_err(|e| ExtractionError::unreadable(path, e))?;
    Ok(workbook_units(workbook, path.to_path_buf()))
}

/// Yields cells sheet by sheet in workbook order, row-major within a sheet.
/// A sheet is only decoded once the previous one has been consumed.
fn workbook_units<RS, R>(mut workbook: R, path: PathBuf) -> UnitStream
where
    RS: Read + Seek + 'static,
    R: Reader<RS> + 'static,
    R::Error: Display,
{
    let sheet_names = workbook.sheet_names();

    Box::new(sheet_names.into_iter().flat_map(move |sheet| {
        let units: Vec<Result<TextUnit, ExtractionError>> =
            match workbook.worksheet_range(&sheet) {
                Ok(range) => sheet_units(&sheet, &range).into_iter().map(Ok).collect(),
                Err(e) => vec![Err(ExtractionError::unreadable(
                    &path,
                    format!("sheet '{}': {}", sheet, e),
                ))],
            };
        units
    }))
}

/// Non-blank cells with absolute 1-based coordinates. Formula cells carry
/// their cached value, so the formula text never shows up here.
pub(crate) fn sheet_units(sheet: &str, range: &Range<Data>) -> Vec<TextUnit> {
    let Some((first_row, first_column)) = range.start() else {
        return Vec::new();
    };

    range
        .used_cells()
        .filter_map(|(row, column, value)| {
            let text = display_value(value)?;
            let location = Location::cell(
                sheet,
                first_row + row as u32 + 1,
                first_column + column as u32 + 1,
            );
            Some(TextUnit::new(text, location))
        })
        .collect()
}

/// Dates are rendered as `YYYY-MM-DD HH:MM:SS` rather than Excel serials.
fn display_value(value: &Data) -> Option<String> {
    match value {
        Data::Empty => None,
        Data::DateTime(date) if date.is_datetime() => Some(formatted_datetime(value)),
        Data::DateTimeIso(_) => Some(formatted_datetime(value)),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}

fn formatted_datetime(value: &Data) -> String {
    value
        .as_datetime()
        .map(|datetime| datetime.to_string())
        .unwrap_or_else(|| value.to_string())
}
