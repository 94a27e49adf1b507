//! Display model for the result page.

use serde::Serialize;

use crate::config::ServiceConfig;
use crate::diagnosis::{Diagnosis, DiagnosisError, TreatmentTable};
use crate::prediction::ClassificationResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityEntry {
    pub label: String,
    pub value: f64,
}

/// Everything the result page renders, in service order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub predicted_label: String,
    pub confidence: f64,
    pub probabilities: Vec<ProbabilityEntry>,
    /// Absolute URL of the uploaded image, if the service returned one
    pub image_url: Option<String>,
    pub diagnosis: Diagnosis,
}

impl ResultView {
    pub fn build(
        result: &ClassificationResult,
        table: &TreatmentTable,
        config: &ServiceConfig,
    ) -> Result<Self, DiagnosisError> {
        let diagnosis = table.interpret(&result.probabilities)?;
        let probabilities = result
            .probabilities
            .iter()
            .map(|(label, value)| ProbabilityEntry {
                label: label.to_string(),
                value,
            })
            .collect();

        Ok(Self {
            predicted_label: result.predicted_label.clone(),
            confidence: result.confidence,
            probabilities,
            image_url: result
                .image_url
                .as_deref()
                .and_then(|path| config.resolve_image_url(path)),
            diagnosis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::{default_table, Tier};

    fn sample() -> ClassificationResult {
        ClassificationResult {
            predicted_label: "Leaf spot".to_string(),
            confidence: 71.2,
            probabilities: [("Healthy", 15.2), ("Leaf spot", 71.2), ("Powdery mildew", 13.6)]
                .into_iter()
                .collect(),
            image_url: Some("/static/uploads/leaf.jpg".to_string()),
        }
    }

    #[test]
    fn test_view_keeps_service_order() {
        let view = ResultView::build(&sample(), default_table(), &ServiceConfig::default()).unwrap();
        let labels: Vec<&str> = view.probabilities.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Healthy", "Leaf spot", "Powdery mildew"]);
    }

    #[test]
    fn test_view_resolves_image_and_diagnosis() {
        let view = ResultView::build(&sample(), default_table(), &ServiceConfig::default()).unwrap();
        assert_eq!(
            view.image_url.as_deref(),
            Some("http://localhost:5003/static/uploads/leaf.jpg")
        );
        assert_eq!(view.diagnosis.condition_label, "Leaf Spot");
        assert_eq!(view.diagnosis.tier, Some(Tier::Severe));
    }

    #[test]
    fn test_service_label_shown_even_when_it_disagrees() {
        let mut result = sample();
        result.predicted_label = "Healthy".to_string();
        let view = ResultView::build(&result, default_table(), &ServiceConfig::default()).unwrap();
        assert_eq!(view.predicted_label, "Healthy");
        assert_eq!(view.diagnosis.condition_label, "Leaf Spot");
    }
}
