//! Generative provider integrations for Picturebook.
//!
//! Every remote call goes through one shared [`ProviderClient`]. Concrete
//! providers implement the capability traits from `picturebook_interface`:
//!
//! - **Text**: [`OpenRouterChat`] (OpenAI-compatible chat completions)
//! - **Images**: [`ReplicateImages`] (async prediction job),
//!   [`FreepikImages`] (inline base64), [`HuggingFaceImages`] (raw bytes)
//! - **Speech**: [`OpenRouterSpeech`], then the offline [`EspeakSpeech`]
//!
//! [`PlaceholderRenderer`] draws the illustration used when every image
//! provider fails.
//!
//! # Example
//!
//! ```no_run
//! use picturebook_config::PicturebookConfig;
//! use picturebook_interface::{ImagePrompt, ImageProvider};
//! use picturebook_models::{ProviderClient, image_providers};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PicturebookConfig::load()?;
//! let client = ProviderClient::new();
//! let prompt = ImagePrompt::new("A fox in a scarf", 1024, 768);
//! for provider in image_providers(&config, &client) {
//!     if let Ok(image) = provider.generate(&prompt).await {
//!         println!("{} returned {} bytes", provider.provider_name(), image.bytes().len());
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod espeak;
mod factory;
mod freepik;
mod huggingface;
mod imaging;
mod metrics;
mod openrouter;
mod replicate;

pub use client::{ProviderCall, ProviderClient, RequestAuth, ResponseBytes};
pub use espeak::EspeakSpeech;
pub use factory::{image_providers, speech_providers, text_provider};
pub use freepik::FreepikImages;
pub use huggingface::HuggingFaceImages;
pub use imaging::{PlaceholderRenderer, PngImage, normalize_to_png};
pub use metrics::ProviderMetrics;
pub use openrouter::{
    ChatMessage, ChatRequest, ChatResponse, OpenRouterChat, OpenRouterSpeech, ResponseFormat,
    SpeechBody,
};
pub use replicate::{
    Prediction, PredictionStatus, PredictionUrls, ReplicateImages, extract_output_urls,
};
