use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::config::{parse_base_url, ServiceConfig, BASE_URL_KEY, PREFERENCES_FILE, TIMEOUT_KEY};
use crate::error::LeafDxError;

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    let value = store.get(key).and_then(|v| v.as_str().map(|s| s.to_string()));
    Ok(value)
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    validate_preference(key, value)?;

    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value.trim()));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })
}

/// Reject values that would break config resolution. Empty clears to default.
fn validate_preference(key: &str, value: &str) -> Result<(), LeafDxError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match key {
        BASE_URL_KEY => parse_base_url(value).map(|_| ()),
        TIMEOUT_KEY => ServiceConfig::resolve(None, None, Some(value)).map(|_| ()),
        _ => Ok(()),
    }
}
