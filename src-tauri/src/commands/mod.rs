pub mod config;
pub mod dosage;
pub mod health;
pub mod predict;
pub mod report;
pub mod result;

use tauri::{AppHandle, Wry};
use tauri_plugin_store::StoreExt;
use tracing::warn;

use crate::error::LeafDxError;
use crate::store::{ResultStore, TauriKvStore, RESULTS_FILE};

/// Open the persisted result slot.
pub(crate) fn result_store(app: &AppHandle) -> Result<ResultStore<TauriKvStore<Wry>>, LeafDxError> {
    let store = app.store(RESULTS_FILE).map_err(|e| {
        warn!("Failed to open result store: {}", e);
        LeafDxError::Store(e.to_string())
    })?;
    Ok(ResultStore::new(TauriKvStore::new(store)))
}
