//! Replicate image provider.

use super::{PROVIDER, Prediction, PredictionStatus, extract_output_urls};
use crate::{ProviderCall, ProviderClient, RequestAuth};
use async_trait::async_trait;
use picturebook_config::ReplicateConfig;
use picturebook_error::{ProviderError, ProviderResult};
use picturebook_interface::{GeneratedImage, ImagePrompt, ImageProvider};
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tracing::{debug, info, instrument};

/// Illustrations through a Replicate-hosted diffusion model.
#[derive(Debug, Clone)]
pub struct ReplicateImages {
    client: ProviderClient,
    api_key: Option<String>,
    config: ReplicateConfig,
}

impl ReplicateImages {
    /// Create a provider. A missing token makes every call fail as unavailable.
    pub fn new(client: ProviderClient, config: &ReplicateConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            config: config.clone(),
        }
    }

    fn parse(value: Value) -> ProviderResult<Prediction> {
        serde_json::from_value(value).map_err(|e| {
            ProviderError::malformed(PROVIDER, format!("unexpected prediction shape: {}", e))
        })
    }

    /// Poll until the prediction is terminal or the poll budget runs out.
    async fn wait_for(&self, call: &ProviderCall, mut prediction: Prediction) -> ProviderResult<Prediction> {
        let poll_url = prediction.urls.get.clone().unwrap_or_else(|| {
            format!(
                "{}/{}",
                self.config.predictions_url.trim_end_matches('/'),
                prediction.id
            )
        });
        let poll = call.with_url(poll_url);

        let schedule = FixedInterval::from_millis(self.config.poll_interval_ms)
            .take(self.config.max_polls);
        for delay in schedule {
            if prediction.status.is_terminal() {
                break;
            }
            debug!(id = %prediction.id, status = %prediction.status, "Prediction pending");
            tokio::time::sleep(delay).await;
            prediction = Self::parse(self.client.get_json(&poll).await?)?;
        }
        Ok(prediction)
    }
}

#[async_trait]
impl ImageProvider for ReplicateImages {
    #[instrument(skip(self, prompt), fields(width = *prompt.width(), height = *prompt.height()))]
    async fn generate(&self, prompt: &ImagePrompt) -> ProviderResult<GeneratedImage> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::unavailable(PROVIDER, "REPLICATE_API_TOKEN not set"))?;

        let call = ProviderCall::new(
            PROVIDER,
            &self.config.endpoint,
            Duration::from_secs(self.config.timeout_secs),
        )
        .with_auth(RequestAuth::Bearer(api_key.clone()));

        let body = json!({
            "input": {
                "prompt": prompt.text(),
                "width": prompt.width(),
                "height": prompt.height(),
                "num_inference_steps": self.config.num_inference_steps,
                "guidance_scale": self.config.guidance_scale,
            }
        });
        let created = Self::parse(self.client.post_json(&call, &body).await?)?;
        info!(id = %created.id, "Started prediction");

        let prediction = self.wait_for(&call, created).await?;
        match prediction.status {
            PredictionStatus::Succeeded => {}
            PredictionStatus::Failed | PredictionStatus::Canceled => {
                let detail = prediction
                    .error
                    .as_ref()
                    .map(Value::to_string)
                    .unwrap_or_else(|| "no detail".to_string());
                return Err(ProviderError::unavailable(
                    PROVIDER,
                    format!("prediction {} {}: {}", prediction.id, prediction.status, detail),
                ));
            }
            status => {
                return Err(ProviderError::unavailable(
                    PROVIDER,
                    format!(
                        "prediction {} still {} after {} polls",
                        prediction.id, status, self.config.max_polls
                    ),
                ));
            }
        }

        let mut urls = Vec::new();
        if let Some(output) = &prediction.output {
            extract_output_urls(output, &mut urls);
        }
        let url = urls
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed(PROVIDER, "succeeded without an output URL"))?;

        // Output URLs are pre-signed; no credentials on the download.
        let download = ProviderCall::new(PROVIDER, url, Duration::from_secs(self.config.timeout_secs));
        let (bytes, content_type) = self.client.get_bytes(&download).await?.into_parts();
        Ok(GeneratedImage::new(bytes, content_type))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
