//! Treatment table loading.
//!
//! - `default_table()` - the table embedded at compile time
//! - `load_table(path)` - a custom table from disk

use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;

use super::types::{ConditionEntry, TreatmentTable};

const DEFAULT_TABLE: &str = include_str!("../../config/treatments.toml");

static TABLE: OnceLock<TreatmentTable> = OnceLock::new();

/// Load a treatment table from a TOML file.
pub fn load_table(path: &Path) -> Result<TreatmentTable> {
    let content = std::fs::read_to_string(path)?;
    parse_table(&content)
}

/// Parse a treatment table from TOML text.
pub fn parse_table(content: &str) -> Result<TreatmentTable> {
    let table: TreatmentTable = toml::from_str(content)?;
    Ok(table)
}

/// The embedded table, parsed once.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_table() -> &'static TreatmentTable {
    TABLE.get_or_init(|| {
        toml::from_str(DEFAULT_TABLE).expect("embedded treatments.toml must be valid TOML")
    })
}

impl TreatmentTable {
    pub fn condition(&self, label: &str) -> Option<&ConditionEntry> {
        self.conditions.iter().find(|c| c.label == label)
    }

    pub fn is_healthy(&self, label: &str) -> bool {
        self.healthy.label == label
    }

    /// Every label the table recognizes, healthy marker first.
    pub fn known_labels(&self) -> Vec<&str> {
        std::iter::once(self.healthy.label.as_str())
            .chain(self.conditions.iter().map(|c| c.label.as_str()))
            .collect()
    }
}
