use tauri::AppHandle;
use tracing::info;

use crate::config::ServiceConfig;
use crate::prediction::{PredictionClient, ServiceHealth};

/// Probe the prediction service's health endpoint.
#[tauri::command]
pub async fn check_service_health(app: AppHandle) -> Result<ServiceHealth, String> {
    let config = ServiceConfig::load(&app)?;
    info!("Checking service health at {}", config.base_url);
    let client = PredictionClient::new(config).map_err(|e| e.to_string())?;
    Ok(client.health().await)
}
