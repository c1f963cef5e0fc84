//! Freepik text-to-image.

use crate::{ProviderCall, ProviderClient, RequestAuth};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use picturebook_config::FreepikConfig;
use picturebook_error::{ProviderError, ProviderResult};
use picturebook_interface::{GeneratedImage, ImagePrompt, ImageProvider};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::instrument;

const PROVIDER: &str = "freepik";

#[derive(Debug, Deserialize)]
struct FreepikResponse {
    #[serde(default)]
    data: Vec<FreepikImage>,
}

#[derive(Debug, Deserialize)]
struct FreepikImage {
    #[serde(default)]
    base64: Option<String>,
}

/// Freepik size preset closest to the requested aspect ratio.
fn size_preset(width: u32, height: u32) -> &'static str {
    let ratio = width as f32 / height.max(1) as f32;
    match ratio {
        r if r >= 1.6 => "widescreen_16_9",
        r if r > 1.1 => "classic_4_3",
        r if r >= 0.9 => "square_1_1",
        r if r > 0.6 => "traditional_3_4",
        _ => "social_story_9_16",
    }
}

/// Illustrations through Freepik, returned inline as base64.
#[derive(Debug, Clone)]
pub struct FreepikImages {
    client: ProviderClient,
    api_key: Option<String>,
    config: FreepikConfig,
}

impl FreepikImages {
    /// Create a provider. A missing key makes every call fail as unavailable.
    pub fn new(client: ProviderClient, config: &FreepikConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ImageProvider for FreepikImages {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &ImagePrompt) -> ProviderResult<GeneratedImage> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::unavailable(PROVIDER, "FREEPIK_API_KEY not set"))?;

        let mut body = json!({
            "prompt": prompt.text(),
            "num_images": 1,
            "image": {"size": size_preset(*prompt.width(), *prompt.height())},
        });
        if let Some(style) = &self.config.style {
            body["styling"] = json!({"style": style});
        }

        let call = ProviderCall::new(
            PROVIDER,
            &self.config.endpoint,
            Duration::from_secs(self.config.timeout_secs),
        )
        .with_auth(RequestAuth::Header {
            name: "x-freepik-api-key",
            value: api_key.clone(),
        });
        let value = self.client.post_json(&call, &body).await?;

        let response: FreepikResponse = serde_json::from_value(value).map_err(|e| {
            ProviderError::malformed(PROVIDER, format!("unexpected response shape: {}", e))
        })?;
        let encoded = response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.base64)
            .ok_or_else(|| ProviderError::malformed(PROVIDER, "no data[0].base64 in response"))?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("invalid base64: {}", e)))?;

        Ok(GeneratedImage::new(bytes, None))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
