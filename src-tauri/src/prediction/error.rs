use serde::Serialize;
use thiserror::Error;

/// User-facing failure category shown in the upload alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Connectivity,
    Timeout,
    Network,
    Server,
    InvalidInput,
    /// Another upload is still in flight.
    Busy,
    /// The upload was abandoned before the service answered.
    Cancelled,
}

/// Failure of a single prediction request, distinguished by cause.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The request never reached the service (offline, DNS, refused).
    #[error("Unable to connect to the prediction service at {url}")]
    Connectivity { url: String },

    #[error("Request timeout: the prediction service did not respond in time")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `detail` is the body's `error` field when present.
    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    #[error("Failed to parse prediction response: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidInput(String),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(msg) => msg.clone(),
        None => format!("HTTP error! status: {}", status),
    }
}

impl PredictError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::Connectivity { .. } => ErrorCategory::Connectivity,
            PredictError::Timeout => ErrorCategory::Timeout,
            PredictError::Network(_) => ErrorCategory::Network,
            PredictError::Server { .. } | PredictError::Parse(_) => ErrorCategory::Server,
            PredictError::InvalidInput(_) => ErrorCategory::InvalidInput,
        }
    }

    /// Alert text for the upload form.
    ///
    /// A structured message from the service is shown verbatim; everything
    /// else is replaced with a friendly message for its category.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::Connectivity { .. } => {
                "Unable to connect to the server. Please make sure the prediction service is running and try again.".to_string()
            }
            PredictError::Timeout => {
                "Request timeout. The server is taking too long to respond. Please try again.".to_string()
            }
            PredictError::Network(_) => {
                "Network error occurred. Please check your internet connection and try again.".to_string()
            }
            PredictError::Server {
                detail: Some(msg), ..
            } => msg.clone(),
            PredictError::Server { detail: None, .. } | PredictError::Parse(_) => {
                "Server error occurred. Please try again later.".to_string()
            }
            PredictError::InvalidInput(msg) => msg.clone(),
        }
    }

    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PredictError::Timeout
        } else if err.is_connect() {
            PredictError::Connectivity {
                url: url.to_string(),
            }
        } else {
            PredictError::Network(err.to_string())
        }
    }
}

/// Serializable form of a failed upload for the front-end.
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    pub category: ErrorCategory,
    pub message: String,
}

impl From<&PredictError> for UploadFailure {
    fn from(err: &PredictError) -> Self {
        UploadFailure {
            category: err.category(),
            message: err.user_message(),
        }
    }
}

impl From<PredictError> for UploadFailure {
    fn from(err: PredictError) -> Self {
        UploadFailure::from(&err)
    }
}
