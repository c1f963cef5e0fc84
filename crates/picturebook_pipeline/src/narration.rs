//! Per-page narration with an ordered speech provider chain.

use picturebook_core::{ArtifactNames, AudioFormat, Page};
use picturebook_interface::{SpeechProvider, SpeechRequest};
use picturebook_models::ProviderMetrics;
use picturebook_storage::ArtifactStore;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Result of narrating one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationOutcome {
    /// Written file, if any provider succeeded and the write worked
    pub path: Option<PathBuf>,
    /// Provider that produced the audio
    pub provider: Option<String>,
    /// Container of the written audio
    pub format: Option<AudioFormat>,
}

impl NarrationOutcome {
    fn missing() -> Self {
        Self {
            path: None,
            provider: None,
            format: None,
        }
    }
}

/// Narrates story pages, falling back through speech providers in order.
///
/// Narration is optional: when every provider fails the page simply has
/// no audio.
pub struct NarrationGenerator {
    providers: Vec<Box<dyn SpeechProvider>>,
}

impl NarrationGenerator {
    /// Create a generator over `providers`, tried in the given order.
    pub fn new(providers: Vec<Box<dyn SpeechProvider>>) -> Self {
        Self { providers }
    }

    /// Provider names in chain order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// Narrate `page` and write `page_{n}_{id}.{wav|mp3}`.
    #[instrument(skip_all, fields(story_id = %names.story_id(), page = *page.page()))]
    pub async fn narrate(
        &self,
        page: &Page,
        names: &ArtifactNames,
        store: &ArtifactStore,
    ) -> NarrationOutcome {
        let request = SpeechRequest::new(page.text().clone());
        let metrics = ProviderMetrics::get();

        for provider in &self.providers {
            let name = provider.provider_name();
            let audio = match provider.synthesize(&request).await {
                Ok(audio) => audio,
                Err(e) => {
                    warn!(provider = name, class = e.kind.class(), error = %e, "Speech provider failed");
                    metrics.record_fallback("narration", name);
                    continue;
                }
            };

            let format = *audio.format();
            return match store
                .write_audio(names, *page.page(), format, audio.bytes())
                .await
            {
                Ok(path) => {
                    info!(provider = name, format = %format, path = %path.display(), "Page narrated");
                    NarrationOutcome {
                        path: Some(path),
                        provider: Some(name.to_string()),
                        format: Some(format),
                    }
                }
                Err(e) => {
                    error!(provider = name, error = %e, "Could not write narration");
                    NarrationOutcome::missing()
                }
            };
        }

        warn!("No narration for page");
        NarrationOutcome::missing()
    }
}
