//! Storybook orchestration for Picturebook.
//!
//! [`Pipeline`] drives a run from prompt to bundle. It owns three stages:
//!
//! - [`picturebook_narrative::StoryTextGenerator`] for the story text
//! - [`ImageOrchestrator`] for per-page illustrations, ending in a local
//!   placeholder when every provider fails
//! - [`NarrationGenerator`] for per-page audio, which may be skipped
//!
//! followed by PDF assembly and the JSON bundle.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod images;
mod narration;
mod pipeline;

pub use images::{ImageOrchestrator, ImageOutcome, ImageSource};
pub use narration::{NarrationGenerator, NarrationOutcome};
pub use pipeline::{PageOutcome, Pipeline};
