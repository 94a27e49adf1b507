//! Image upload commands.

use base64::Engine;
use serde::Deserialize;
use tauri::{AppHandle, State};
use tracing::{info, warn};

use super::result_store;
use crate::config::ServiceConfig;
use crate::prediction::{
    ClassificationResult, ErrorCategory, ImageUpload, PredictionClient, UploadFailure,
};
use crate::submission::{self, SubmissionState, SubmissionTracker};

/// Upload payload from the front-end file picker.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub file_name: String,
    /// MIME type reported by the browser, e.g. `image/jpeg`
    pub content_type: String,
    /// Base64-encoded file contents (from FileReader)
    pub image_base64: String,
}

/// Upload an image to the prediction service and persist the result.
#[tauri::command]
pub async fn submit_image(
    app: AppHandle,
    tracker: State<'_, SubmissionTracker>,
    request: SubmitRequest,
) -> Result<ClassificationResult, UploadFailure> {
    info!("Received upload request for '{}'", request.file_name);

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&request.image_base64)
        .map_err(|e| {
            warn!("Rejected upload with invalid base64: {}", e);
            UploadFailure {
                category: ErrorCategory::InvalidInput,
                message: "Please select an image file first".to_string(),
            }
        })?;
    let upload = ImageUpload {
        file_name: request.file_name,
        content_type: request.content_type,
        bytes,
    };

    let config = ServiceConfig::load(&app).map_err(|e| UploadFailure {
        category: ErrorCategory::Connectivity,
        message: e.to_string(),
    })?;
    let client = PredictionClient::new(config)?;
    let store = result_store(&app).map_err(|e| UploadFailure {
        category: ErrorCategory::Server,
        message: e.to_string(),
    })?;

    submission::submit(&tracker, &client, &store, &upload).await
}

#[tauri::command]
pub fn get_submission_state(tracker: State<'_, SubmissionTracker>) -> SubmissionState {
    tracker.snapshot()
}

/// Stop an upload left running by a page the user navigated away from.
#[tauri::command]
pub fn abandon_submission(tracker: State<'_, SubmissionTracker>) -> bool {
    tracker.abandon()
}
