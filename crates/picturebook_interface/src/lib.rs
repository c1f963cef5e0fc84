//! Provider capability traits for Picturebook.
//!
//! Each generative service category has one trait. Orchestrators hold
//! ordered lists of trait objects and try them in turn, so every
//! implementation reports failures as a [`picturebook_error::ProviderError`]
//! rather than panicking or returning partial data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ImageProvider, SpeechProvider, TextProvider};
pub use types::{
    GeneratedImage, ImagePrompt, SpeechAudio, SpeechRequest, TextRequest, TextRequestBuilder,
    TextRequestBuilderError,
};
