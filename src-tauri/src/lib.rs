pub mod config;
mod commands;
pub mod diagnosis;
pub mod dosage;
pub mod error;
pub mod prediction;
pub mod report;
pub mod result_view;
pub mod store;
pub mod submission;

pub use diagnosis::{interpret, Diagnosis, Tier};
pub use prediction::{ClassificationResult, Distribution};
pub use result_view::ResultView;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .manage(submission::SubmissionTracker::new())
        .invoke_handler(tauri::generate_handler![
            commands::config::get_preference,
            commands::config::set_preference,
            commands::health::check_service_health,
            commands::predict::submit_image,
            commands::predict::get_submission_state,
            commands::predict::abandon_submission,
            commands::result::load_result_view,
            commands::result::clear_result,
            commands::report::export_report,
            commands::dosage::recommend_dosage,
        ])
        .setup(|_app| {
            // Panics here on a malformed embedded table.
            let table = diagnosis::default_table();
            tracing::info!(
                "Loaded treatment table with {} conditions",
                table.conditions.len()
            );
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
