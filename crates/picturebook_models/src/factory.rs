//! Provider chains built from configuration.

use crate::{
    EspeakSpeech, FreepikImages, HuggingFaceImages, OpenRouterChat, OpenRouterSpeech,
    ProviderClient, ReplicateImages,
};
use picturebook_config::{ImageProviderKind, PicturebookConfig};
use picturebook_interface::{ImageProvider, SpeechProvider};
use tracing::debug;

/// The story text provider.
pub fn text_provider(config: &PicturebookConfig, client: &ProviderClient) -> OpenRouterChat {
    OpenRouterChat::new(
        client.clone(),
        &config.text,
        config.credentials.openrouter.clone(),
    )
}

/// Remote image providers in `images.order`.
///
/// Providers without credentials are still included; they fail fast as
/// unavailable so the chain logs why it moved on.
pub fn image_providers(
    config: &PicturebookConfig,
    client: &ProviderClient,
) -> Vec<Box<dyn ImageProvider>> {
    let creds = &config.credentials;
    config
        .images
        .order
        .iter()
        .map(|kind| -> Box<dyn ImageProvider> {
            debug!(provider = %kind, "Adding image provider");
            match kind {
                ImageProviderKind::Replicate => Box::new(ReplicateImages::new(
                    client.clone(),
                    &config.images.replicate,
                    creds.replicate.clone(),
                )),
                ImageProviderKind::Freepik => Box::new(FreepikImages::new(
                    client.clone(),
                    &config.images.freepik,
                    creds.freepik.clone(),
                )),
                ImageProviderKind::Huggingface => Box::new(HuggingFaceImages::new(
                    client.clone(),
                    &config.images.huggingface,
                    creds.huggingface.clone(),
                )),
            }
        })
        .collect()
}

/// Speech providers: OpenRouter, then `espeak-ng` when enabled.
pub fn speech_providers(
    config: &PicturebookConfig,
    client: &ProviderClient,
) -> Vec<Box<dyn SpeechProvider>> {
    let mut providers: Vec<Box<dyn SpeechProvider>> = vec![Box::new(OpenRouterSpeech::new(
        client.clone(),
        &config.speech,
        config.credentials.openrouter.clone(),
    ))];
    if config.speech.fallback.enabled {
        providers.push(Box::new(EspeakSpeech::new(&config.speech.fallback)));
    }
    providers
}
