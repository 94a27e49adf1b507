//! Key-value persistence seam.
//!
//! Components receive a `KeyValueStore` instead of reaching for the Tauri
//! store directly, so tests can run against `MemoryStore`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tauri::Runtime;
use tauri_plugin_store::Store;
use tracing::warn;

/// String slots addressed by key. Writes are fire-and-forget.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
    fn clear(&self, key: &str);
}

/// In-process store, used by tests and as a fallback when the app store
/// cannot be opened.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), value);
        }
    }

    fn clear(&self, key: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.remove(key);
        }
    }
}

/// Store backed by a `tauri-plugin-store` file, persisted across restarts.
pub struct TauriKvStore<R: Runtime> {
    store: Arc<Store<R>>,
}

impl<R: Runtime> TauriKvStore<R> {
    pub fn new(store: Arc<Store<R>>) -> Self {
        Self { store }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save() {
            warn!("Failed to save store: {}", e);
        }
    }
}

impl<R: Runtime> KeyValueStore for TauriKvStore<R> {
    fn read(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    fn write(&self, key: &str, value: String) {
        self.store.set(key, serde_json::Value::String(value));
        self.persist();
    }

    fn clear(&self, key: &str) {
        if self.store.delete(key) {
            self.persist();
        }
    }
}
