//! Type definitions for diagnosis interpretation.
//!
//! Table types deserialize from `config/treatments.toml`; `Diagnosis` is
//! serialized to the front-end.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// CONFIGURATION TYPES (loaded from TOML)
// =============================================================================

/// Root of the treatment table.
#[derive(Debug, Clone, Deserialize)]
pub struct TreatmentTable {
    pub healthy: HealthyEntry,
    pub fallback: FallbackEntry,
    pub conditions: Vec<ConditionEntry>,
}

/// The "no disease" marker and its general-care checklist.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthyEntry {
    /// Label as emitted by the prediction service
    pub label: String,
    pub display_name: String,
    pub care: String,
}

/// Advice for labels outside the known vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackEntry {
    pub display_name: String,
    pub advice: String,
}

/// A disease or pest condition with one text per severity tier.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    /// Label as emitted by the prediction service
    pub label: String,
    pub display_name: String,
    pub early: String,
    pub moderate: String,
    pub severe: String,
}

impl ConditionEntry {
    pub fn treatment(&self, tier: Tier) -> &str {
        match tier {
            Tier::Early => &self.early,
            Tier::Moderate => &self.moderate,
            Tier::Severe => &self.severe,
        }
    }
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Severity band selecting a treatment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// p <= 30
    Early,
    /// 30 < p <= 60
    Moderate,
    /// p > 60
    Severe,
}

impl Tier {
    pub fn for_probability(p: f64) -> Self {
        if p <= 30.0 {
            Tier::Early
        } else if p <= 60.0 {
            Tier::Moderate
        } else {
            Tier::Severe
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Early => write!(f, "early"),
            Tier::Moderate => write!(f, "moderate"),
            Tier::Severe => write!(f, "severe"),
        }
    }
}

/// Interpretation of a distribution: one condition and its treatment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub condition_label: String,
    /// Probability of the winning entry
    pub severity_percentage: f64,
    /// None for the healthy and unknown paths
    pub tier: Option<Tier>,
    pub treatment_text: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum DiagnosisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
