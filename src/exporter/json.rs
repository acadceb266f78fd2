// file: src/exporter/json.rs
// description: json export of search reports

use crate::error::Result;
use crate::models::SearchReport;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

#[derive(Debug, Serialize)]
pub struct ExportedReport<'a> {
    pub exported_at: String,
    pub generator: &'static str,
    #[serde(flatten)]
    pub report: &'a SearchReport,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &SearchReport, pretty: bool) -> Result<String> {
        let exported = ExportedReport {
            exported_at: Utc::now().to_rfc3339(),
            generator: concat!("docseek ", env!("CARGO_PKG_VERSION")),
            report,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&exported)?
        } else {
            serde_json::to_string(&exported)?
        };
        Ok(json)
    }

    /// Writes the rendered report, creating missing parent directories.
    pub fn write(&self, report: &SearchReport, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = self.render(report, pretty)?;
        fs::write(path, json)?;

        info!(
            "Exported {} matched documents to {}",
            report.documents_matched.len(),
            path.display()
        );
        Ok(())
    }
}
