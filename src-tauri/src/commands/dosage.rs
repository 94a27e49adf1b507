use tracing::info;

use crate::dosage::{self, AgeGroup, DosageAdvice, IntakeForm};

#[tauri::command]
pub fn recommend_dosage(age_group: AgeGroup, form: IntakeForm) -> DosageAdvice {
    info!("Dosage lookup: {:?} / {:?}", age_group, form);
    dosage::recommend(age_group, form)
}
