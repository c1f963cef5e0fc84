//! Trait definitions for generative providers.

use crate::{GeneratedImage, ImagePrompt, SpeechAudio, SpeechRequest, TextRequest};
use async_trait::async_trait;
use picturebook_error::ProviderResult;

/// A language model that answers a system + user prompt with text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Run one completion and return the assistant's message content.
    async fn complete(&self, request: &TextRequest) -> ProviderResult<String>;

    /// Provider name (e.g., "openrouter").
    fn provider_name(&self) -> &str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

/// A text-to-image service.
///
/// Implementations return the encoded image as delivered. Callers verify
/// that the bytes decode before trusting them.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one illustration.
    async fn generate(&self, prompt: &ImagePrompt) -> ProviderResult<GeneratedImage>;

    /// Provider name used in logs and metrics.
    fn provider_name(&self) -> &str;
}

/// A text-to-speech service.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize narration for one passage.
    async fn synthesize(&self, request: &SpeechRequest) -> ProviderResult<SpeechAudio>;

    /// Provider name used in logs and metrics.
    fn provider_name(&self) -> &str;
}
