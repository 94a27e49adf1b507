//! HTTP client for the external prediction service.
//!
//! One multipart POST per submission, single attempt, no retry. Busy-state
//! handling belongs to the caller (see `submission`).

use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use super::error::PredictError;
use super::types::{ClassificationResult, ImageUpload, ServiceErrorBody, ServiceHealth};
use crate::config::ServiceConfig;

pub struct PredictionClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl PredictionClient {
    /// Build a client for the given service configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, PredictError> {
        let mut builder = reqwest::Client::builder().user_agent("LeafDx/1.0");
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PredictError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Upload an image and return the service's classification.
    pub async fn submit(&self, image: &ImageUpload) -> Result<ClassificationResult, PredictError> {
        validate_upload(image)?;

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| {
                PredictError::InvalidInput(format!(
                    "Invalid content type '{}': {}",
                    image.content_type, e
                ))
            })?;
        let form = Form::new().part("file", part);

        let url = self.config.endpoint("predict");
        info!(
            "Uploading '{}' ({} bytes) to {}",
            image.file_name,
            image.bytes.len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PredictError::from_transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is the same as no error body.
            let body = response.bytes().await.unwrap_or_default();
            let detail = serde_json::from_slice::<ServiceErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|msg| !msg.trim().is_empty());
            warn!(
                "Prediction service returned {} ({})",
                status.as_u16(),
                detail.as_deref().unwrap_or("no error message")
            );
            return Err(PredictError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PredictError::from_transport(&url, e))?;

        let result: ClassificationResult = serde_json::from_slice(&body)
            .map_err(|e| PredictError::Parse(e.to_string()))?;

        if result.probabilities.is_empty() {
            return Err(PredictError::Parse(
                "response contained an empty probability distribution".to_string(),
            ));
        }

        info!(
            "Prediction received: {} ({}%), {} classes",
            result.predicted_label,
            result.confidence,
            result.probabilities.len()
        );
        Ok(result)
    }

    /// Probe `GET /api/health`. Never fails; an unreachable service is
    /// reported in the returned value.
    pub async fn health(&self) -> ServiceHealth {
        let url = self.config.endpoint("api/health");
        info!("Checking prediction service health at {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                let err = PredictError::from_transport(&url, e);
                warn!("Health check failed: {}", err);
                return ServiceHealth {
                    reachable: false,
                    status: None,
                    message: err.user_message(),
                };
            }
        };

        let http_status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        let field = |key: &str| body.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());

        ServiceHealth {
            reachable: true,
            status: field("status").or_else(|| Some(http_status.as_u16().to_string())),
            message: field("message")
                .unwrap_or_else(|| format!("Service responded with HTTP {}", http_status.as_u16())),
        }
    }
}

/// Reject uploads that must never leave the client.
pub fn validate_upload(image: &ImageUpload) -> Result<(), PredictError> {
    if image.bytes.is_empty() {
        return Err(PredictError::InvalidInput(
            "Please select an image file first".to_string(),
        ));
    }
    if !image.content_type.to_ascii_lowercase().starts_with("image/") {
        return Err(PredictError::InvalidInput(format!(
            "'{}' is not an image (content type {})",
            image.file_name, image.content_type
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: &str, bytes: Vec<u8>) -> ImageUpload {
        ImageUpload {
            file_name: "leaf.jpg".to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let err = validate_upload(&upload("image/jpeg", vec![])).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let err = validate_upload(&upload("application/pdf", vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
        assert!(err.to_string().contains("application/pdf"));
    }

    #[test]
    fn test_validate_accepts_any_image_subtype() {
        assert!(validate_upload(&upload("image/png", vec![0x89])).is_ok());
        assert!(validate_upload(&upload("IMAGE/WEBP", vec![0x52])).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_input_sends_no_request() {
        // Port 9 (discard) is never contacted because validation fails first.
        let config = ServiceConfig::resolve(Some("http://127.0.0.1:9"), None, None).unwrap();
        let client = PredictionClient::new(config).unwrap();
        let err = client.submit(&upload("image/jpeg", vec![])).await.unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
    }
}
