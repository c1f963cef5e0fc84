//! OpenRouter text and speech providers.
//!
//! OpenRouter exposes an OpenAI-compatible chat completions endpoint, used
//! for story text, and an `/audio/speech` endpoint used for narration. Both
//! authenticate with the same bearer key.

mod chat;
mod dto;
mod speech;

pub use chat::OpenRouterChat;
pub use dto::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, SpeechBody};
pub use speech::OpenRouterSpeech;

/// Provider name for logs and metrics.
pub(crate) const PROVIDER: &str = "openrouter";
