use tracing::debug;

use super::table::default_table;
use super::types::{Diagnosis, DiagnosisError, Tier, TreatmentTable};
use crate::prediction::Distribution;

/// Interpret a distribution against the embedded treatment table.
pub fn interpret(probabilities: &Distribution) -> Result<Diagnosis, DiagnosisError> {
    default_table().interpret(probabilities)
}

/// Entry with the strictly greatest probability. The first entry wins ties.
pub fn select_winner(probabilities: &Distribution) -> Result<(&str, f64), DiagnosisError> {
    let mut entries = probabilities.iter();
    let mut best = entries.next().ok_or_else(|| {
        DiagnosisError::InvalidInput("probability distribution is empty".to_string())
    })?;
    check_finite(best)?;

    for entry in entries {
        check_finite(entry)?;
        if entry.1 > best.1 {
            best = entry;
        }
    }
    Ok(best)
}

fn check_finite((label, p): (&str, f64)) -> Result<(), DiagnosisError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(DiagnosisError::InvalidInput(format!(
            "probability for '{}' is not a finite number",
            label
        )))
    }
}

impl TreatmentTable {
    /// Select the winning condition and its treatment text.
    ///
    /// Recomputes the maximum from the full distribution; the service's own
    /// `predicted_label` is not consulted.
    pub fn interpret(&self, probabilities: &Distribution) -> Result<Diagnosis, DiagnosisError> {
        let (label, p) = select_winner(probabilities)?;

        let diagnosis = if self.is_healthy(label) {
            Diagnosis {
                condition_label: self.healthy.display_name.clone(),
                severity_percentage: p,
                tier: None,
                treatment_text: self.healthy.care.clone(),
            }
        } else if let Some(condition) = self.condition(label) {
            let tier = Tier::for_probability(p);
            Diagnosis {
                condition_label: condition.display_name.clone(),
                severity_percentage: p,
                tier: Some(tier),
                treatment_text: condition.treatment(tier).to_string(),
            }
        } else {
            Diagnosis {
                condition_label: self.fallback.display_name.clone(),
                severity_percentage: p,
                tier: None,
                treatment_text: self.fallback.advice.clone(),
            }
        };

        debug!(
            "Interpreted '{}' at {}% as {} ({:?})",
            label, p, diagnosis.condition_label, diagnosis.tier
        );
        Ok(diagnosis)
    }
}
