//! Prediction service configuration.
//!
//! Resolved on every use so a changed preference takes effect without a
//! restart. Precedence: `api_base_url` preference, then the `LEAFDX_API_URL`
//! environment variable, then the local default.

use std::time::Duration;

use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::warn;
use url::Url;

use crate::error::LeafDxError;

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const BASE_URL_KEY: &str = "api_base_url";
pub const TIMEOUT_KEY: &str = "request_timeout_secs";
pub const BASE_URL_ENV: &str = "LEAFDX_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5003";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: Url,
    /// Client-side request timeout. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL must parse"),
            request_timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Build a config from raw preference/environment values.
    pub fn resolve(
        base_url_pref: Option<&str>,
        base_url_env: Option<&str>,
        timeout_pref: Option<&str>,
    ) -> Result<Self, LeafDxError> {
        let raw = base_url_pref
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| base_url_env.map(str::trim).filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_BASE_URL);

        let base_url = parse_base_url(raw)?;

        let request_timeout = match timeout_pref.map(str::trim).filter(|s| !s.is_empty()) {
            Some(secs) => {
                let secs: u64 = secs
                    .parse()
                    .map_err(|_| LeafDxError::Config(format!("Invalid request timeout '{}'", secs)))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    /// Load from the preferences store and environment.
    pub fn load(app: &AppHandle) -> Result<Self, LeafDxError> {
        let store = app.store(PREFERENCES_FILE).map_err(|e| {
            warn!("Failed to open preferences store: {}", e);
            LeafDxError::Config(e.to_string())
        })?;
        let pref = |key: &str| store.get(key).and_then(|v| v.as_str().map(|s| s.to_string()));
        let env = std::env::var(BASE_URL_ENV).ok();

        Self::resolve(
            pref(BASE_URL_KEY).as_deref(),
            env.as_deref(),
            pref(TIMEOUT_KEY).as_deref(),
        )
    }

    /// Absolute URL of a service endpoint such as `predict` or `api/health`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Resolve a relative image path returned by the service.
    pub fn resolve_image_url(&self, path: &str) -> Option<String> {
        if path.trim().is_empty() {
            return None;
        }
        Some(self.endpoint(path))
    }
}

/// Validate a user-supplied base URL. Only http(s) is accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, LeafDxError> {
    let url = Url::parse(raw)
        .map_err(|e| LeafDxError::Config(format!("Invalid service URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LeafDxError::Config(format!(
            "Unsupported URL scheme '{}' (expected http or https)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ServiceConfig::resolve(None, None, None).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5003/");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_preference_beats_environment() {
        let config = ServiceConfig::resolve(
            Some("http://pref.example:8000"),
            Some("http://env.example:9000"),
            None,
        )
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("pref.example"));

        let config = ServiceConfig::resolve(Some("   "), Some("http://env.example:9000"), None).unwrap();
        assert_eq!(config.base_url.host_str(), Some("env.example"));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ServiceConfig::resolve(Some("http://host:5003/"), None, None).unwrap();
        assert_eq!(config.endpoint("predict"), "http://host:5003/predict");
        assert_eq!(config.endpoint("/api/health"), "http://host:5003/api/health");

        let config = ServiceConfig::resolve(Some("http://host/leaf"), None, None).unwrap();
        assert_eq!(config.endpoint("predict"), "http://host/leaf/predict");
    }

    #[test]
    fn test_resolve_image_url() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.resolve_image_url("/static/uploads/a.jpg").as_deref(),
            Some("http://localhost:5003/static/uploads/a.jpg")
        );
        assert!(config.resolve_image_url("").is_none());
    }

    #[test]
    fn test_timeout_parsing() {
        let config = ServiceConfig::resolve(None, None, Some("15")).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        let config = ServiceConfig::resolve(None, None, Some("0")).unwrap();
        assert!(config.request_timeout.is_none());

        assert!(ServiceConfig::resolve(None, None, Some("soon")).is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = ServiceConfig::resolve(Some("ftp://files.example"), None, None).unwrap_err();
        assert!(err.to_string().contains("Unsupported URL scheme"));
    }
}
