//! Story text generation: prompt, call, parse, validate.

use crate::{parse_story_json, story_request, validate_story};
use picturebook_config::TextConfig;
use picturebook_core::{StoryDocument, StoryRequest};
use picturebook_error::{ProviderError, RetryableError, StoryError, StoryErrorKind};
use picturebook_interface::{TextProvider, TextRequest};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, instrument, warn};

/// Produces a validated [`StoryDocument`] from a [`StoryRequest`].
///
/// Transient provider failures (transport errors, 408/429/5xx) are retried
/// with jittered exponential backoff, sized by the kind of the first
/// failure. A response that parses but fails validation is returned as an
/// error straight away.
pub struct StoryTextGenerator {
    provider: Box<dyn TextProvider>,
    temperature: Option<f32>,
    max_retries: usize,
    retry_backoff_ms: u64,
}

impl StoryTextGenerator {
    /// Create a generator over `provider` using the `[text]` settings.
    pub fn new(provider: Box<dyn TextProvider>, config: &TextConfig) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// Name of the underlying text provider.
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Generate and validate a story.
    ///
    /// # Errors
    ///
    /// - [`StoryErrorKind::EmptyPrompt`] before any provider call
    /// - [`StoryErrorKind::Provider`] once retries are exhausted
    /// - parse and validation errors from [`parse_story_json`] and
    ///   [`validate_story`]
    #[instrument(
        skip(self, request),
        fields(
            provider = %self.provider.provider_name(),
            model = %self.provider.model_name(),
            length = %request.length(),
        )
    )]
    pub async fn generate(&self, request: &StoryRequest) -> Result<StoryDocument, StoryError> {
        if request.is_blank() {
            warn!("Rejecting empty story prompt");
            return Err(StoryError::new(StoryErrorKind::EmptyPrompt));
        }

        let spec = request.length().spec();
        let text_request = story_request(request.prompt(), &spec, self.temperature)
            .map_err(|e| StoryError::new(StoryErrorKind::Prompt(e.to_string())))?;

        let content = self.complete_with_retry(&text_request).await?;
        debug!(chars = content.len(), "Received story text");

        let value = parse_story_json(&content)?;
        let story = validate_story(&value, spec.page_count)?;

        info!(
            title = %story.title(),
            pages = story.page_count(),
            "Story text validated"
        );
        Ok(story)
    }

    /// Call the provider, retrying transient failures.
    ///
    /// The first failure picks the schedule: its [`RetryableError`] params
    /// cap the retry count and the delay window, and `text.max_retries`
    /// bounds the count from above.
    async fn complete_with_retry(&self, request: &TextRequest) -> Result<String, ProviderError> {
        let first = match self.provider.complete(request).await {
            Ok(content) => return Ok(content),
            Err(e) => e,
        };
        if !first.is_retryable() {
            warn!(error = %first, class = first.kind.class(), "Text provider failed permanently");
            return Err(first);
        }

        let (error_retries, max_delay_secs) = first.retry_strategy_params();
        let retries = error_retries.min(self.max_retries);
        info!(
            error = %first,
            class = first.kind.class(),
            initial_backoff_ms = self.retry_backoff_ms,
            max_retries = retries,
            max_delay_secs,
            "Text provider failed, will retry with error-specific strategy"
        );

        let delays = ExponentialBackoff::from_millis(self.retry_backoff_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(retries);

        let mut last = first;
        for delay in delays {
            tokio::time::sleep(delay).await;
            match self.provider.complete(request).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, class = e.kind.class(), "Text provider failed, will retry");
                    last = e;
                }
                Err(e) => {
                    warn!(error = %e, class = e.kind.class(), "Text provider failed permanently");
                    return Err(e);
                }
            }
        }

        warn!(error = %last, retries, "Text provider retries exhausted");
        Err(last)
    }
}
