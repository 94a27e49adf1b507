use tracing::{error, info, warn};

use super::kv::KeyValueStore;
use crate::prediction::ClassificationResult;

/// Slot key holding the most recent classification.
pub const RESULT_KEY: &str = "predictionResult";

/// Single-slot persistence for the last `ClassificationResult`.
///
/// Last write wins. There is no history and no expiry.
pub struct ResultStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ResultStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Overwrite the slot with `result`.
    pub fn write(&self, result: &ClassificationResult) {
        match serde_json::to_string(result) {
            Ok(json) => {
                self.kv.write(RESULT_KEY, json);
                info!("Stored prediction result for '{}'", result.predicted_label);
            }
            // A well-formed result always serializes.
            Err(e) => error!("Failed to serialize prediction result: {}", e),
        }
    }

    /// Read the slot. Absent, malformed, and empty-distribution values all
    /// read as `None`, which callers treat as "no diagnosis yet".
    pub fn read(&self) -> Option<ClassificationResult> {
        let raw = self.kv.read(RESULT_KEY)?;
        match serde_json::from_str::<ClassificationResult>(&raw) {
            Ok(result) if result.probabilities.is_empty() => {
                warn!("Stored prediction result has an empty distribution; ignoring");
                None
            }
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Stored prediction result is malformed; ignoring: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) {
        self.kv.clear(RESULT_KEY);
    }
}
