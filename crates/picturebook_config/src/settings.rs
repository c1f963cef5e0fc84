//! Configuration structures.

use crate::Credentials;
use config::{Config, Environment, File, FileFormat};
use picturebook_core::StoryLength;
use picturebook_error::{ConfigError, PicturebookError, PicturebookResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../picturebook.toml");

/// Remote image providers, in the names used by `images.order`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageProviderKind {
    /// Replicate predictions API (async job)
    Replicate,
    /// Freepik text-to-image (inline base64)
    Freepik,
    /// Hugging Face Inference API (raw bytes)
    Huggingface,
}

/// Language model used for story text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextConfig {
    /// Chat completions URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Retries after a transient provider failure
    #[serde(default)]
    pub max_retries: usize,
    /// First retry delay, doubled on each attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

/// Replicate settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReplicateConfig {
    /// Prediction creation URL
    pub endpoint: String,
    /// Base URL for polling a prediction by id
    pub predictions_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Delay between status polls
    pub poll_interval_ms: u64,
    /// Polls before the job is abandoned
    pub max_polls: usize,
    /// Diffusion steps
    pub num_inference_steps: u32,
    /// Prompt adherence
    pub guidance_scale: f32,
}

/// Freepik settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FreepikConfig {
    /// Text-to-image URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Freepik style preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Hugging Face Inference settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HuggingFaceConfig {
    /// Model inference URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

/// Size of the locally rendered fallback illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaceholderConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Illustration settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// Providers tried in order before the placeholder
    pub order: Vec<ImageProviderKind>,
    /// Requested width in pixels
    pub width: u32,
    /// Requested height in pixels
    pub height: u32,
    /// Style suffix appended to every image prompt
    pub style: String,
    /// Replicate settings
    pub replicate: ReplicateConfig,
    /// Freepik settings
    pub freepik: FreepikConfig,
    /// Hugging Face settings
    pub huggingface: HuggingFaceConfig,
    /// Placeholder settings
    pub placeholder: PlaceholderConfig,
}

/// Offline `espeak-ng` narration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspeakConfig {
    /// Whether to fall back to the local engine at all
    pub enabled: bool,
    /// Executable name or path
    pub binary: String,
    /// espeak voice name
    pub voice: String,
    /// Speaking rate
    pub words_per_minute: u32,
    /// Longest a synthesis run may take
    pub timeout_secs: u64,
}

/// Narration settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpeechConfig {
    /// Speech synthesis URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Voice name
    pub voice: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Local fallback engine
    pub fallback: EspeakConfig,
}

/// PDF assembly settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssemblyConfig {
    /// Whether to render the PDF at all
    pub enabled: bool,
}

/// Complete Picturebook configuration.
///
/// # Example
///
/// ```toml
/// default_length = "short"
/// output_dir = "/var/lib/picturebook"
///
/// [images]
/// order = ["freepik", "replicate"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PicturebookConfig {
    /// Length used when none is requested
    pub default_length: StoryLength,
    /// Directory every artifact is written to
    pub output_dir: PathBuf,
    /// Story text settings
    pub text: TextConfig,
    /// Illustration settings
    pub images: ImagesConfig,
    /// Narration settings
    pub speech: SpeechConfig,
    /// PDF settings
    pub assembly: AssemblyConfig,
    /// API keys, read from the environment
    #[serde(skip)]
    pub credentials: Credentials,
}

impl PicturebookConfig {
    /// Load configuration with precedence: environment > current dir > home
    /// dir > bundled defaults. Credentials are read from the environment.
    #[instrument]
    pub fn load() -> PicturebookResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/picturebook/picturebook.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("picturebook").required(false))
            .add_source(
                Environment::with_prefix("PICTUREBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("images.order"),
            );

        let config = Self::finish(builder)?;
        Ok(config.with_credentials(Credentials::from_env()))
    }

    /// Bundled defaults only, with no credentials.
    pub fn bundled() -> PicturebookResult<Self> {
        Self::finish(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
        )
    }

    /// Bundled defaults overridden by a single file, with no credentials.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> PicturebookResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> PicturebookResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                PicturebookError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PicturebookError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> PicturebookResult<()> {
        if self.images.replicate.max_polls == 0 {
            return Err(ConfigError::new("images.replicate.max_polls must be at least 1").into());
        }
        let placeholder = self.images.placeholder;
        if placeholder.width < 64 || placeholder.height < 64 {
            return Err(ConfigError::new(format!(
                "images.placeholder must be at least 64x64, got {}x{}",
                placeholder.width, placeholder.height
            ))
            .into());
        }
        Ok(())
    }

    /// Replace the credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Replace the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// The output directory as an absolute path.
    pub fn resolved_output_dir(&self) -> PicturebookResult<PathBuf> {
        std::path::absolute(&self.output_dir).map_err(|e| {
            ConfigError::new(format!(
                "Cannot resolve output directory {}: {}",
                self.output_dir.display(),
                e
            ))
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults() -> anyhow::Result<()> {
        let config = PicturebookConfig::bundled()?;
        assert_eq!(config.default_length, StoryLength::Normal);
        assert_eq!(
            config.images.order,
            vec![
                ImageProviderKind::Replicate,
                ImageProviderKind::Freepik,
                ImageProviderKind::Huggingface
            ]
        );
        assert_eq!(config.images.replicate.poll_interval_ms, 3000);
        assert_eq!(config.speech.voice, "af_bella");
        assert!(config.assembly.enabled);
        assert_eq!(config.credentials, Credentials::default());
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("override.toml");
        std::fs::write(
            &path,
            "default_length = \"short\"\n[images]\norder = [\"freepik\"]\n[speech.fallback]\nenabled = false\n",
        )?;

        let config = PicturebookConfig::from_file(&path)?;
        assert_eq!(config.default_length, StoryLength::Short);
        assert_eq!(config.images.order, vec![ImageProviderKind::Freepik]);
        assert!(!config.speech.fallback.enabled);
        // Untouched keys keep their bundled values
        assert_eq!(config.images.width, 1024);
        Ok(())
    }

    #[test]
    fn test_unknown_provider_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[images]\norder = [\"dalle\"]\n")?;
        assert!(PicturebookConfig::from_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_zero_polls_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("polls.toml");
        std::fs::write(&path, "[images.replicate]\nmax_polls = 0\n")?;
        let err = PicturebookConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("max_polls"));
        Ok(())
    }

    #[test]
    fn test_output_dir_resolves_absolute() -> anyhow::Result<()> {
        let config = PicturebookConfig::bundled()?.with_output_dir("out");
        assert!(config.resolved_output_dir()?.is_absolute());
        Ok(())
    }
}
