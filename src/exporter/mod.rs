// file: src/exporter/mod.rs
// description: report export formats

pub mod json;

pub use json::{ExportedReport, JsonExporter};
