//! Wire types for the prediction service.
//!
//! Field names follow the service's JSON so a stored result can be written
//! back out exactly as it was received.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping of condition label to probability percentage (0-100).
///
/// Insertion order is significant: it drives display order and the
/// interpreter's tie-break, so this is a list of pairs rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    entries: Vec<(String, f64)>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns false (and leaves the distribution unchanged)
    /// if the label is already present.
    pub fn push(&mut self, label: impl Into<String>, probability: f64) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.entries.push((label, probability));
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut dist = Distribution::new();
        for (label, p) in iter {
            dist.push(label, p);
        }
        dist
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, p) in &self.entries {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of condition label to probability")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dist = Distribution::new();
                while let Some((label, p)) = access.next_entry::<String, f64>()? {
                    if dist.contains(&label) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate condition label '{}'",
                            label
                        )));
                    }
                    dist.entries.push((label, p));
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

/// Outcome of one successful upload, as returned by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Top label as reported by the service
    pub predicted_label: String,
    /// Service-reported confidence for `predicted_label`, 0-100
    pub confidence: f64,
    /// Full distribution in model output order
    #[serde(rename = "results")]
    pub probabilities: Distribution,
    /// Relative path of the stored upload on the service
    #[serde(
        rename = "img_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

/// Image payload handed to the prediction client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorBody {
    pub error: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub reachable: bool,
    pub status: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_response_preserves_order() {
        let json = r#"{
            "predicted_label": "Leaf spot",
            "confidence": 71.2,
            "results": {
                "Powdery mildew": 10.5,
                "Leaf spot": 71.2,
                "Aphids (Aphis sp.)": 3.1,
                "Healthy": 15.2
            },
            "img_url": "/static/uploads/abc.jpg"
        }"#;

        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        let labels: Vec<_> = result.probabilities.labels().collect();
        assert_eq!(
            labels,
            vec!["Powdery mildew", "Leaf spot", "Aphids (Aphis sp.)", "Healthy"]
        );
        assert_eq!(result.probabilities.get("Leaf spot"), Some(71.2));
        assert_eq!(result.image_url.as_deref(), Some("/static/uploads/abc.jpg"));
    }

    #[test]
    fn test_missing_img_url_is_none() {
        let json = r#"{"predicted_label": "Healthy", "confidence": 90, "results": {"Healthy": 90}}"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert!(result.image_url.is_none());

        let out = serde_json::to_string(&result).unwrap();
        assert!(!out.contains("img_url"));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let json = r#"{"Healthy": 10, "Healthy": 20}"#;
        let err = serde_json::from_str::<Distribution>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "got: {}", err);
    }

    #[test]
    fn test_push_ignores_duplicates() {
        let mut dist = Distribution::new();
        assert!(dist.push("Healthy", 40.0));
        assert!(!dist.push("Healthy", 60.0));
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.get("Healthy"), Some(40.0));
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let dist: Distribution = [("Zeta", 1.0), ("Alpha", 2.0)].into_iter().collect();
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"Zeta":1.0,"Alpha":2.0}"#);
    }
}
