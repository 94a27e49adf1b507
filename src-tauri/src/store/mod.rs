//! Persisted storage for the last prediction result.

pub mod kv;
pub mod result_store;

pub use kv::{KeyValueStore, MemoryStore, TauriKvStore};
pub use result_store::{ResultStore, RESULT_KEY};

/// Store file holding the result slot.
pub const RESULTS_FILE: &str = "results.json";
