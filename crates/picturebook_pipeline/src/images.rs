//! Per-page illustration with an ordered provider chain.

use picturebook_config::ImagesConfig;
use picturebook_core::{ArtifactNames, Page, StoryDocument};
use picturebook_interface::{ImagePrompt, ImageProvider};
use picturebook_error::{ProviderError, ProviderErrorKind};
use picturebook_models::{PlaceholderRenderer, ProviderMetrics, normalize_to_png};
use picturebook_narrative::describe_scene;
use picturebook_storage::ArtifactStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

/// Characters of page text used as the scene when no descriptor matches.
const SCENE_FALLBACK_CHARS: usize = 100;

/// Where a page illustration came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// A remote provider, by name
    #[display("{}", _0)]
    Provider(String),
    /// The locally drawn placeholder
    #[display("placeholder")]
    Placeholder,
}

/// Result of illustrating one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    /// Written file, or `None` if even the placeholder could not be stored
    pub path: Option<PathBuf>,
    /// Which source produced the bytes
    pub source: ImageSource,
}

/// Illustrates story pages by trying providers in order.
///
/// The first provider returning a decodable image wins. Every failure is
/// logged and counted, then the next provider is tried. When the chain is
/// exhausted a placeholder is drawn locally, so a page only lacks an
/// illustration if writing the file fails.
pub struct ImageOrchestrator {
    providers: Vec<Box<dyn ImageProvider>>,
    placeholder: PlaceholderRenderer,
    width: u32,
    height: u32,
    style: String,
}

impl ImageOrchestrator {
    /// Create an orchestrator over `providers`, tried in the given order.
    pub fn new(providers: Vec<Box<dyn ImageProvider>>, config: &ImagesConfig) -> Self {
        Self {
            providers,
            placeholder: PlaceholderRenderer::new(config.placeholder),
            width: config.width,
            height: config.height,
            style: config.style.clone(),
        }
    }

    /// Provider names in chain order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// Build the illustration prompt for one page.
    ///
    /// The scene is the page's scene description, or the first hundred
    /// characters of its text when no description can be derived.
    pub fn prompt_for(&self, character: &str, setting: &str, page_text: &str) -> ImagePrompt {
        let scene = describe_scene(page_text)
            .unwrap_or_else(|| page_text.chars().take(SCENE_FALLBACK_CHARS).collect());
        let text = format!(
            "Children's book illustration. Main character: {}. Setting: {}. Scene: {}. {}",
            character.trim(),
            setting.trim(),
            scene.trim(),
            self.style
        );
        ImagePrompt::new(text.trim_end(), self.width, self.height)
    }

    /// Illustrate `page` of `story` and write `page_{n}_{id}.png`.
    #[instrument(skip_all, fields(story_id = %names.story_id(), page = *page.page()))]
    pub async fn illustrate(
        &self,
        story: &StoryDocument,
        page: &Page,
        names: &ArtifactNames,
        store: &ArtifactStore,
    ) -> ImageOutcome {
        let page_number = *page.page();
        let prompt = self.prompt_for(story.character_description(), story.setting(), page.text());
        debug!(prompt = %prompt.text(), "Built illustration prompt");

        let (bytes, source) = match self.from_providers(&prompt).await {
            Some((bytes, name)) => (bytes, ImageSource::Provider(name)),
            None => match self.placeholder.render(page_number) {
                Ok(bytes) => {
                    warn!("All image providers failed, using placeholder");
                    (bytes, ImageSource::Placeholder)
                }
                Err(e) => {
                    error!(error = %e, "Placeholder rendering failed");
                    return ImageOutcome {
                        path: None,
                        source: ImageSource::Placeholder,
                    };
                }
            },
        };

        let path = match store.write_image(names, page_number, &bytes).await {
            Ok(path) => {
                info!(source = %source, path = %path.display(), "Page illustrated");
                Some(path)
            }
            Err(e) => {
                error!(source = %source, error = %e, "Could not write illustration");
                None
            }
        };
        ImageOutcome { path, source }
    }

    async fn from_providers(&self, prompt: &ImagePrompt) -> Option<(Vec<u8>, String)> {
        let metrics = ProviderMetrics::get();
        for provider in &self.providers {
            let name = provider.provider_name();
            let result = match provider.generate(prompt).await {
                Ok(image) => normalize_to_png(image.bytes()).map_err(|e| {
                    ProviderError::new(name, ProviderErrorKind::Malformed(format!("not an image: {}", e)))
                }),
                Err(e) => Err(e),
            };

            match result {
                Ok(png) => {
                    debug!(provider = name, width = png.width, height = png.height, "Image accepted");
                    return Some((png.bytes, name.to_string()));
                }
                Err(e) => {
                    warn!(provider = name, class = e.kind.class(), error = %e, "Image provider failed");
                    if matches!(e.kind, ProviderErrorKind::Malformed(_)) {
                        metrics.record_failure(name, e.kind.class());
                    }
                    metrics.record_fallback("images", name);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picturebook_config::PicturebookConfig;

    fn orchestrator(style: &str) -> ImageOrchestrator {
        let mut config = PicturebookConfig::bundled().unwrap().images;
        config.style = style.to_string();
        config.width = 1024;
        config.height = 768;
        ImageOrchestrator::new(Vec::new(), &config)
    }

    #[test]
    fn test_prompt_uses_scene_description() {
        let prompt = orchestrator("Watercolor style.").prompt_for(
            "a brave hedgehog",
            "an autumn forest",
            "The happy hedgehog was running past the old oak tree.",
        );
        assert_eq!(
            prompt.text(),
            "Children's book illustration. Main character: a brave hedgehog. \
             Setting: an autumn forest. \
             Scene: happy, running, tree, hedgehog, past, emotional moment. \
             Watercolor style."
        );
        assert_eq!((*prompt.width(), *prompt.height()), (1024, 768));
    }

    #[test]
    fn test_prompt_falls_back_to_page_text() {
        let page_text = "é".repeat(150);
        let prompt = orchestrator("").prompt_for("c", "s", &page_text);
        let scene = format!("Scene: {}.", "é".repeat(100));
        assert!(prompt.text().ends_with(&scene), "{}", prompt.text());
    }
}
