//! Hugging Face Inference API text-to-image.

use crate::{ProviderCall, ProviderClient, RequestAuth};
use async_trait::async_trait;
use picturebook_config::HuggingFaceConfig;
use picturebook_error::{ProviderError, ProviderResult};
use picturebook_interface::{GeneratedImage, ImagePrompt, ImageProvider};
use serde_json::json;
use std::time::Duration;
use tracing::instrument;

const PROVIDER: &str = "huggingface";

/// Illustrations through a Hugging Face hosted model; the response body is
/// the encoded image.
#[derive(Debug, Clone)]
pub struct HuggingFaceImages {
    client: ProviderClient,
    api_key: Option<String>,
    endpoint: String,
    timeout: Duration,
}

impl HuggingFaceImages {
    /// Create a provider. A missing token makes every call fail as unavailable.
    pub fn new(client: ProviderClient, config: &HuggingFaceConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl ImageProvider for HuggingFaceImages {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &ImagePrompt) -> ProviderResult<GeneratedImage> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ProviderError::unavailable(PROVIDER, "HUGGINGFACEHUB_API_TOKEN not set")
        })?;

        let body = json!({
            "inputs": prompt.text(),
            "parameters": {"width": prompt.width(), "height": prompt.height()},
        });
        let call = ProviderCall::new(PROVIDER, &self.endpoint, self.timeout)
            .with_auth(RequestAuth::Bearer(api_key.clone()));
        let (bytes, content_type) = self.client.post_for_bytes(&call, &body).await?.into_parts();

        // Model loading and quota errors can arrive as JSON with a 200.
        if content_type.as_deref().is_some_and(|ct| ct.contains("json")) {
            let excerpt = String::from_utf8_lossy(&bytes[..bytes.len().min(200)]).into_owned();
            return Err(ProviderError::malformed(
                PROVIDER,
                format!("expected image bytes, got JSON: {}", excerpt),
            ));
        }
        if bytes.is_empty() {
            return Err(ProviderError::malformed(PROVIDER, "empty image body"));
        }
        Ok(GeneratedImage::new(bytes, content_type))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
