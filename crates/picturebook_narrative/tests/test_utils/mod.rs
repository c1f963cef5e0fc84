//! Mock text provider for story generation tests.

#![allow(dead_code)]

use async_trait::async_trait;
use picturebook_config::TextConfig;
use picturebook_error::{ProviderError, ProviderErrorKind, ProviderResult};
use picturebook_interface::{TextProvider, TextRequest};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return the given content
    Success(String),
    /// Always fail with the given error
    Error(ProviderErrorKind),
    /// Return each entry in turn, repeating the last one
    Sequence(Vec<Result<String, ProviderErrorKind>>),
}

/// Mock text provider with a shared call counter.
///
/// Clones share the counter and the recorded requests, so a test can keep
/// one handle after boxing another into the generator.
#[derive(Clone)]
pub struct MockTextProvider {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<TextRequest>>>,
}

impl MockTextProvider {
    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeed with `content`.
    pub fn new_success(content: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Success(content.into()))
    }

    /// Always fail with `kind`.
    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self::with_behavior(MockBehavior::Error(kind))
    }

    /// Answer from a fixed sequence.
    pub fn new_sequence(responses: Vec<Result<String, ProviderErrorKind>>) -> Self {
        Self::with_behavior(MockBehavior::Sequence(responses))
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> ProviderResult<String> {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;

        let outcome = match &self.behavior {
            MockBehavior::Success(content) => Ok(content.clone()),
            MockBehavior::Error(kind) => Err(kind.clone()),
            MockBehavior::Sequence(responses) => responses
                .get(current)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or_else(|| Err(ProviderErrorKind::Unavailable("empty sequence".into()))),
        };
        outcome.map_err(|kind| ProviderError::new("mock", kind))
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn complete(&self, request: &TextRequest) -> ProviderResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.next_response()
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Text settings with a fast retry schedule.
pub fn text_config(max_retries: usize) -> TextConfig {
    TextConfig {
        endpoint: "http://127.0.0.1:9/unused".to_string(),
        model: "mock-model".to_string(),
        timeout_secs: 1,
        temperature: Some(0.7),
        max_retries,
        retry_backoff_ms: 1,
    }
}

/// A valid story with `pages` pages, serialized.
pub fn story_json(pages: usize) -> String {
    let pages: Vec<_> = (1..=pages)
        .map(|n| json!({"page": n, "text": format!("Milo the mouse took step number {n}.")}))
        .collect();
    json!({
        "title": "Milo Finds the Moon",
        "character_description": "a small brown mouse with a blue scarf",
        "setting": "a quiet farm at night",
        "moral": "curiosity leads to wonder",
        "pages": pages,
    })
    .to_string()
}
