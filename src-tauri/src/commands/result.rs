use tauri::AppHandle;
use tracing::{info, warn};

use super::result_store;
use crate::config::ServiceConfig;
use crate::diagnosis::default_table;
use crate::error::LeafDxError;
use crate::result_view::ResultView;

/// Load the last result with its diagnosis. `None` means nothing to show.
#[tauri::command]
pub fn load_result_view(app: AppHandle) -> Result<Option<ResultView>, String> {
    let Some(result) = result_store(&app)?.read() else {
        info!("No stored prediction result");
        return Ok(None);
    };

    let config = ServiceConfig::load(&app).unwrap_or_else(|e| {
        warn!("Using default service config: {}", e);
        ServiceConfig::default()
    });
    let view = ResultView::build(&result, default_table(), &config).map_err(LeafDxError::from)?;
    Ok(Some(view))
}

#[tauri::command]
pub fn clear_result(app: AppHandle) -> Result<(), String> {
    info!("Clearing stored prediction result");
    result_store(&app)?.clear();
    Ok(())
}
