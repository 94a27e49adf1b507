//! Printable PDF report for a classification and its diagnosis.
//!
//! Generation is deterministic for a given result, diagnosis and timestamp,
//! and never touches the network.

pub mod layout;
pub mod metrics;
pub mod pdf;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::info;

use crate::diagnosis::Diagnosis;
use crate::prediction::ClassificationResult;

pub use layout::{format_timestamp, layout_report, ReportLayout, TextRole, FOOTER_CAPTION, REPORT_TITLE};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered report with its suggested file name.
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Report {
    /// Write the report into `dir` under its suggested name, replacing any
    /// file of the same name.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        info!("Saved report to {}", path.display());
        Ok(path)
    }
}

/// Suggested file name embedding the report timestamp.
///
/// `:` and `/` are replaced so the name is valid on common filesystems.
pub fn report_filename(generated_at: &NaiveDateTime) -> String {
    let stamp = format_timestamp(generated_at).replace([':', '/'], "-");
    format!("leaf-disease-report-{}.pdf", stamp)
}

/// Render the report. The caller guarantees `result` is present.
pub fn generate(
    result: &ClassificationResult,
    diagnosis: &Diagnosis,
    generated_at: NaiveDateTime,
) -> Result<Report, ReportError> {
    let layout = layout_report(result, diagnosis, &generated_at);
    let bytes = pdf::render_pdf(&layout, REPORT_TITLE)?;
    let filename = report_filename(&generated_at);

    info!(
        "Generated report '{}' ({} pages, {} bytes)",
        filename,
        layout.pages.len(),
        bytes.len()
    );
    Ok(Report { filename, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filename_has_no_path_unsafe_characters() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(9, 7, 3)
            .unwrap();
        let name = report_filename(&at);
        assert_eq!(name, "leaf-disease-report-1-5-2026, 9-07-03 AM.pdf");
        assert!(!name.contains(':'));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_save_in_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports");
        let report = Report {
            filename: "r.pdf".to_string(),
            bytes: b"%PDF-1.5".to_vec(),
        };
        let path = report.save_in(&target).unwrap();
        assert_eq!(path, target.join("r.pdf"));
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.5");
    }
}
