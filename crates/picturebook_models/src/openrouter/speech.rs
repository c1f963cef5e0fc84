//! OpenRouter text-to-speech.

use super::{PROVIDER, SpeechBody};
use crate::{ProviderCall, ProviderClient, RequestAuth};
use async_trait::async_trait;
use picturebook_config::SpeechConfig;
use picturebook_core::AudioFormat;
use picturebook_error::{ProviderError, ProviderResult};
use picturebook_interface::{SpeechAudio, SpeechProvider, SpeechRequest};
use std::time::Duration;
use tracing::instrument;

/// Narration through OpenRouter `/audio/speech`.
#[derive(Debug, Clone)]
pub struct OpenRouterSpeech {
    client: ProviderClient,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    voice: String,
    timeout: Duration,
}

impl OpenRouterSpeech {
    /// Create a provider. A missing key makes every call fail as unavailable.
    pub fn new(client: ProviderClient, config: &SpeechConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            voice: config.voice.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl SpeechProvider for OpenRouterSpeech {
    #[instrument(skip(self, request), fields(model = %self.model, voice = %self.voice))]
    async fn synthesize(&self, request: &SpeechRequest) -> ProviderResult<SpeechAudio> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::unavailable(PROVIDER, "OPENROUTER_API_KEY not set"))?;

        let body = SpeechBody {
            model: self.model.clone(),
            input: request.text().clone(),
            voice: self.voice.clone(),
        };
        let call = ProviderCall::new(PROVIDER, &self.endpoint, self.timeout)
            .with_auth(RequestAuth::Bearer(api_key.clone()));
        let (bytes, content_type) = self.client.post_for_bytes(&call, &body).await?.into_parts();

        if bytes.is_empty() {
            return Err(ProviderError::malformed(PROVIDER, "empty audio body"));
        }
        if content_type.as_deref().is_some_and(|ct| ct.contains("json")) {
            return Err(ProviderError::malformed(
                PROVIDER,
                "expected audio, got a JSON body",
            ));
        }

        let format = content_type
            .as_deref()
            .and_then(AudioFormat::from_content_type)
            .or_else(|| AudioFormat::from_magic_bytes(&bytes))
            .unwrap_or(AudioFormat::Wav);
        Ok(SpeechAudio::new(bytes, format))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
