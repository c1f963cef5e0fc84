//! Mock providers and fixtures for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use picturebook_config::PicturebookConfig;
use picturebook_core::AudioFormat;
use picturebook_error::{ProviderError, ProviderErrorKind, ProviderResult};
use picturebook_interface::{
    GeneratedImage, ImagePrompt, ImageProvider, SpeechAudio, SpeechProvider, SpeechRequest,
    TextProvider, TextRequest,
};
use picturebook_narrative::StoryTextGenerator;
use picturebook_pipeline::{ImageOrchestrator, NarrationGenerator, Pipeline};
use picturebook_storage::ArtifactStore;
use serde_json::json;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Always return the given value
    Success(T),
    /// Always fail with the given error
    Error(ProviderErrorKind),
}

/// Shared call bookkeeping for the mocks.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    count: Arc<Mutex<usize>>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    fn record(&self, input: &str) {
        *self.count.lock().unwrap() += 1;
        self.inputs.lock().unwrap().push(input.to_string());
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        *self.count.lock().unwrap()
    }

    /// Inputs seen so far, in order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

fn respond<T: Clone>(name: &str, behavior: &MockBehavior<T>) -> ProviderResult<T> {
    match behavior {
        MockBehavior::Success(value) => Ok(value.clone()),
        MockBehavior::Error(kind) => Err(ProviderError::new(name, kind.clone())),
    }
}

/// Mock story text provider.
#[derive(Clone)]
pub struct MockTextProvider {
    behavior: MockBehavior<String>,
    log: CallLog,
}

impl MockTextProvider {
    /// Always answer with `content`.
    pub fn new_success(content: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Success(content.into()),
            log: CallLog::default(),
        }
    }

    /// Always fail with `kind`.
    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self {
            behavior: MockBehavior::Error(kind),
            log: CallLog::default(),
        }
    }

    /// Call bookkeeping.
    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn complete(&self, request: &TextRequest) -> ProviderResult<String> {
        self.log.record(request.user());
        respond("mock-text", &self.behavior)
    }

    fn provider_name(&self) -> &str {
        "mock-text"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock image provider.
#[derive(Clone)]
pub struct MockImageProvider {
    name: String,
    behavior: MockBehavior<GeneratedImage>,
    log: CallLog,
}

impl MockImageProvider {
    /// Always return `bytes`.
    pub fn new_success(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            behavior: MockBehavior::Success(GeneratedImage::new(bytes, None)),
            log: CallLog::default(),
        }
    }

    /// Always fail with `kind`.
    pub fn new_error(name: &str, kind: ProviderErrorKind) -> Self {
        Self {
            name: name.to_string(),
            behavior: MockBehavior::Error(kind),
            log: CallLog::default(),
        }
    }

    /// Call bookkeeping; inputs are prompt texts.
    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(&self, prompt: &ImagePrompt) -> ProviderResult<GeneratedImage> {
        self.log.record(prompt.text());
        respond(&self.name, &self.behavior)
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

/// Mock speech provider.
#[derive(Clone)]
pub struct MockSpeechProvider {
    name: String,
    behavior: MockBehavior<SpeechAudio>,
    log: CallLog,
}

impl MockSpeechProvider {
    /// Always return `bytes` in `format`.
    pub fn new_success(name: &str, bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            name: name.to_string(),
            behavior: MockBehavior::Success(SpeechAudio::new(bytes, format)),
            log: CallLog::default(),
        }
    }

    /// Always fail with `kind`.
    pub fn new_error(name: &str, kind: ProviderErrorKind) -> Self {
        Self {
            name: name.to_string(),
            behavior: MockBehavior::Error(kind),
            log: CallLog::default(),
        }
    }

    /// Call bookkeeping; inputs are page texts.
    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> ProviderResult<SpeechAudio> {
        self.log.record(request.text());
        respond(&self.name, &self.behavior)
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

/// Bundled configuration with a fast retry schedule and a small placeholder.
pub fn test_config(output_dir: &Path) -> PicturebookConfig {
    let mut config = PicturebookConfig::bundled().unwrap();
    config.output_dir = output_dir.to_path_buf();
    config.text.max_retries = 1;
    config.text.retry_backoff_ms = 1;
    config.images.placeholder.width = 64;
    config.images.placeholder.height = 48;
    config
}

/// Encode a small solid PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

/// Encode a small solid JPEG.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
        .write_to(&mut Cursor::new(&mut out), format)
        .unwrap();
    out
}

/// A minimal RIFF/WAVE header followed by silence.
pub fn wav_bytes() -> Vec<u8> {
    let mut bytes = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
    bytes.extend_from_slice(&[0; 32]);
    bytes
}

/// A valid story with `pages` pages, serialized.
pub fn story_json(pages: usize) -> String {
    let pages: Vec<_> = (1..=pages)
        .map(|n| json!({"page": n, "text": format!("Pip the penguin slid down hill number {n}.")}))
        .collect();
    json!({
        "title": "Pip Learns to Slide",
        "character_description": "a round little penguin with a red hat",
        "setting": "a snowy hillside",
        "moral": "practice makes progress",
        "pages": pages,
    })
    .to_string()
}

/// Build a pipeline from mock stages writing to `config.output_dir`.
pub fn pipeline(
    config: &PicturebookConfig,
    text: MockTextProvider,
    images: Vec<Box<dyn ImageProvider>>,
    speech: Vec<Box<dyn SpeechProvider>>,
) -> anyhow::Result<Pipeline> {
    let store = ArtifactStore::new(&config.output_dir)?;
    Ok(Pipeline::new(
        StoryTextGenerator::new(Box::new(text), &config.text),
        ImageOrchestrator::new(images, &config.images),
        NarrationGenerator::new(speech),
        store,
    )
    .with_assembly(config.assembly.enabled))
}
