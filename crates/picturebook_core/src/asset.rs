//! Per-page media assets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Audio container produced by a speech provider.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    /// RIFF WAVE
    Wav,
    /// MPEG layer 3
    Mp3,
}

impl AudioFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// MIME type.
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    /// Guess the format from a `Content-Type` header value.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let lower = content_type.to_ascii_lowercase();
        if lower.contains("wav") || lower.contains("wave") {
            Some(AudioFormat::Wav)
        } else if lower.contains("mpeg") || lower.contains("mp3") {
            Some(AudioFormat::Mp3)
        } else {
            None
        }
    }

    /// Guess the format from the leading bytes of a file.
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => {
                Some(AudioFormat::Wav)
            }
            [b'I', b'D', b'3', ..] => Some(AudioFormat::Mp3),
            [0xFF, second, ..] if second & 0xE0 == 0xE0 => Some(AudioFormat::Mp3),
            _ => None,
        }
    }
}

/// Media produced for one page. Either slot may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PageAsset {
    /// Illustration file, if one was written
    image_path: Option<PathBuf>,
    /// Narration file, if one was written
    audio_path: Option<PathBuf>,
}

impl PageAsset {
    /// Create an asset record.
    pub fn new(image_path: Option<PathBuf>, audio_path: Option<PathBuf>) -> Self {
        Self {
            image_path,
            audio_path,
        }
    }

    /// Whether an illustration exists.
    pub fn has_image(&self) -> bool {
        self.image_path.is_some()
    }

    /// Whether narration exists.
    pub fn has_audio(&self) -> bool {
        self.audio_path.is_some()
    }
}
