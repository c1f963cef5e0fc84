//! Request and response types shared by providers.

use picturebook_core::AudioFormat;
use serde::{Deserialize, Serialize};

/// A single chat-style completion request.
///
/// # Examples
///
/// ```
/// use picturebook_interface::TextRequestBuilder;
///
/// let request = TextRequestBuilder::default()
///     .system("You write picture books.")
///     .user("Create a 3-page children's storybook about: otters")
///     .build()
///     .unwrap();
/// assert!(*request.json_mode());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct TextRequest {
    /// System instruction
    system: String,
    /// User message
    user: String,
    /// Ask the provider for a JSON object response
    #[builder(default = "true")]
    json_mode: bool,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
}

/// Everything an image provider needs for one illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ImagePrompt {
    /// Full text prompt
    text: String,
    /// Requested width in pixels
    width: u32,
    /// Requested height in pixels
    height: u32,
}

impl ImagePrompt {
    /// Create a prompt.
    pub fn new(text: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            width,
            height,
        }
    }
}

/// Encoded image bytes returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GeneratedImage {
    /// Encoded image (PNG, JPEG, ...)
    bytes: Vec<u8>,
    /// `Content-Type` reported by the provider, if any
    content_type: Option<String>,
}

impl GeneratedImage {
    /// Wrap image bytes.
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// Take the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Narration request for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SpeechRequest {
    /// Text to read aloud
    text: String,
}

impl SpeechRequest {
    /// Create a request.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Encoded audio returned by a speech provider.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SpeechAudio {
    /// Encoded audio
    bytes: Vec<u8>,
    /// Container format, used for the file extension
    format: AudioFormat,
}

impl SpeechAudio {
    /// Wrap audio bytes.
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }
}
