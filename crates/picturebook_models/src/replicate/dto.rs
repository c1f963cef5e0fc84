//! Wire types for Replicate predictions.

use serde::Deserialize;
use serde_json::Value;

/// Lifecycle status of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PredictionStatus {
    /// Queued
    Starting,
    /// Running
    Processing,
    /// Output ready
    Succeeded,
    /// Model error
    Failed,
    /// Cancelled by the owner
    Canceled,
    /// Anything newer than this client knows about
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    /// Whether polling should stop.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

/// Links returned with a prediction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionUrls {
    /// Poll URL
    #[serde(default)]
    pub get: Option<String>,
}

/// A prediction as returned by create and poll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    /// Prediction id
    pub id: String,
    /// Current status
    pub status: PredictionStatus,
    /// Model output once succeeded: a URL, a list of URLs, or an object
    #[serde(default)]
    pub output: Option<Value>,
    /// Error detail once failed
    #[serde(default)]
    pub error: Option<Value>,
    /// Links
    #[serde(default)]
    pub urls: PredictionUrls,
}

/// Collect every distinct `http(s)` URL found in a prediction output.
///
/// Outputs may be a bare string, a list, or objects with `url`, `urls` or
/// `output` keys, nested arbitrarily.
///
/// # Examples
///
/// ```
/// use picturebook_models::extract_output_urls;
/// use serde_json::json;
///
/// let mut urls = Vec::new();
/// extract_output_urls(&json!(["https://a/1.png", {"url": "https://a/2.png"}]), &mut urls);
/// assert_eq!(urls, vec!["https://a/1.png", "https://a/2.png"]);
/// ```
pub fn extract_output_urls(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(url) => {
            let trimmed = url.trim();
            if trimmed.starts_with("http") && !out.iter().any(|existing| existing == trimmed) {
                out.push(trimmed.to_string());
            }
        }
        Value::Array(rows) => {
            for row in rows {
                extract_output_urls(row, out);
            }
        }
        Value::Object(obj) => {
            for key in ["url", "urls", "output"] {
                if let Some(inner) = obj.get(key) {
                    extract_output_urls(inner, out);
                }
            }
        }
        _ => {}
    }
}
