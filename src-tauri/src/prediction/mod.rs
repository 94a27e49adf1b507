//! Client for the external leaf-disease prediction service.

pub mod client;
pub mod error;
pub mod types;

pub use client::{validate_upload, PredictionClient};
pub use error::{ErrorCategory, PredictError, UploadFailure};
pub use types::{ClassificationResult, Distribution, ImageUpload, ServiceHealth};
