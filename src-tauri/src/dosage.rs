//! Gymnema sylvestre intake guide.
//!
//! Fixed recommendations by age group and preparation form. Children are
//! never given a dose.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Adult,
    Elderly,
    Children,
}

impl AgeGroup {
    pub fn display_name(&self) -> &'static str {
        match self {
            AgeGroup::Adult => "Adult",
            AgeGroup::Elderly => "Elderly",
            AgeGroup::Children => "Children",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeForm {
    Capsule,
    Powder,
    Tea,
}

impl IntakeForm {
    pub fn display_name(&self) -> &'static str {
        match self {
            IntakeForm::Capsule => "Capsule",
            IntakeForm::Powder => "Powder",
            IntakeForm::Tea => "Tea",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DosageAdvice {
    pub age_group: String,
    pub form: String,
    pub dosage_text: String,
    pub warning: Option<String>,
}

pub const CHILD_WARNING: &str =
    "Gymnema sylvestre is unsafe for children under 18 years. Avoid all forms.";

fn dosage_text(age: AgeGroup, form: IntakeForm) -> Option<&'static str> {
    match (age, form) {
        (AgeGroup::Adult, IntakeForm::Capsule) => {
            Some("Take 1 capsule (500 mg) twice daily with meals.")
        }
        (AgeGroup::Adult, IntakeForm::Powder) => {
            Some("Mix 1 g with water or juice, twice daily after meals.")
        }
        (AgeGroup::Adult, IntakeForm::Tea) => Some(
            "Steep 2 g dried leaves in hot water for 10 minutes, drink twice daily.",
        ),
        (AgeGroup::Elderly, IntakeForm::Capsule) => Some(
            "Start with 1 capsule (500 mg) once daily. Increase to twice daily only if tolerated.",
        ),
        (AgeGroup::Elderly, IntakeForm::Powder) => {
            Some("Start with 1 g once daily. Increase to twice daily if no side effects.")
        }
        (AgeGroup::Elderly, IntakeForm::Tea) => Some(
            "Steep 2 g dried leaves, drink once daily. Increase to twice daily if tolerated.",
        ),
        (AgeGroup::Children, _) => None,
    }
}

pub fn recommend(age: AgeGroup, form: IntakeForm) -> DosageAdvice {
    let (text, warning) = match dosage_text(age, form) {
        Some(text) => (text.to_string(), None),
        None => ("Not recommended.".to_string(), Some(CHILD_WARNING.to_string())),
    };

    DosageAdvice {
        age_group: age.display_name().to_string(),
        form: form.display_name().to_string(),
        dosage_text: text,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adult_capsule() {
        let advice = recommend(AgeGroup::Adult, IntakeForm::Capsule);
        assert_eq!(advice.age_group, "Adult");
        assert_eq!(advice.form, "Capsule");
        assert_eq!(
            advice.dosage_text,
            "Take 1 capsule (500 mg) twice daily with meals."
        );
        assert!(advice.warning.is_none());
    }

    #[test]
    fn test_children_never_dosed() {
        for form in [IntakeForm::Capsule, IntakeForm::Powder, IntakeForm::Tea] {
            let advice = recommend(AgeGroup::Children, form);
            assert_eq!(advice.dosage_text, "Not recommended.");
            assert_eq!(advice.warning.as_deref(), Some(CHILD_WARNING));
        }
    }

    #[test]
    fn test_elderly_starts_lower() {
        let advice = recommend(AgeGroup::Elderly, IntakeForm::Tea);
        assert!(advice.dosage_text.contains("once daily"));
    }

    #[test]
    fn test_parse_lowercase_names() {
        let age: AgeGroup = serde_json::from_str("\"elderly\"").unwrap();
        let form: IntakeForm = serde_json::from_str("\"powder\"").unwrap();
        assert_eq!(age, AgeGroup::Elderly);
        assert_eq!(form, IntakeForm::Powder);
        assert!(serde_json::from_str::<AgeGroup>("\"teen\"").is_err());
    }
}
