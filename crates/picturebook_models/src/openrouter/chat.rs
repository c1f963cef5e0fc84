//! OpenRouter chat completions.

use super::{ChatMessage, ChatRequest, ChatResponse, PROVIDER, ResponseFormat};
use crate::{ProviderCall, ProviderClient, RequestAuth};
use async_trait::async_trait;
use picturebook_config::TextConfig;
use picturebook_error::{ProviderError, ProviderResult};
use picturebook_interface::{TextProvider, TextRequest};
use std::time::Duration;
use tracing::{debug, instrument};

/// Story text through OpenRouter chat completions.
#[derive(Debug, Clone)]
pub struct OpenRouterChat {
    client: ProviderClient,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl OpenRouterChat {
    /// Create a provider. A missing key makes every call fail as unavailable.
    pub fn new(client: ProviderClient, config: &TextConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl TextProvider for OpenRouterChat {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &TextRequest) -> ProviderResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::unavailable(PROVIDER, "OPENROUTER_API_KEY not set"))?;

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(request.system()),
                ChatMessage::user(request.user()),
            ],
            response_format: request.json_mode().then(ResponseFormat::json_object),
            temperature: *request.temperature(),
        };

        let call = ProviderCall::new(PROVIDER, &self.endpoint, self.timeout)
            .with_auth(RequestAuth::Bearer(api_key.clone()));
        let value = self.client.post_json(&call, &body).await?;

        let response: ChatResponse = serde_json::from_value(value).map_err(|e| {
            ProviderError::malformed(PROVIDER, format!("unexpected completion shape: {}", e))
        })?;
        let content = response
            .first_content()
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::malformed(PROVIDER, "completion has no content"))?;

        debug!(chars = content.len(), "Received completion");
        Ok(content.to_string())
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
