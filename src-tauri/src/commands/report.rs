use std::path::PathBuf;

use tauri::{AppHandle, Manager};
use tracing::{info, warn};

use super::result_store;
use crate::diagnosis::interpret;
use crate::error::LeafDxError;
use crate::report;

/// Generate the PDF report for the stored result and save it.
///
/// # Returns
/// Absolute path of the written file.
#[tauri::command]
pub fn export_report(app: AppHandle) -> Result<String, String> {
    let result = result_store(&app)?
        .read()
        .ok_or_else(|| "Please upload an image first".to_string())?;

    let diagnosis = interpret(&result.probabilities).map_err(LeafDxError::from)?;
    let generated_at = chrono::Local::now().naive_local();
    let report = report::generate(&result, &diagnosis, generated_at).map_err(LeafDxError::from)?;

    let dir = export_dir(&app)?;
    let path = report.save_in(&dir).map_err(LeafDxError::from)?;
    info!("Exported report for '{}'", result.predicted_label);
    Ok(path.display().to_string())
}

/// Download directory, or the app data directory when there is none.
fn export_dir(app: &AppHandle) -> Result<PathBuf, LeafDxError> {
    if let Some(dir) = dirs::download_dir() {
        return Ok(dir);
    }
    warn!("No download directory; saving report to app data directory");
    app.path()
        .app_data_dir()
        .map_err(|e| LeafDxError::Export(format!("No writable directory for report: {}", e)))
}
