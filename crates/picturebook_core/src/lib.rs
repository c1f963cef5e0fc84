//! Core data types for the Picturebook storybook generator.
//!
//! This crate provides the data model shared across the pipeline: the
//! request, the length presets, the validated story document, per-page
//! assets and the run manifest, plus the deterministic artifact names that
//! downstream readers rely on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifacts;
mod asset;
mod length;
mod manifest;
mod request;
mod story;
mod story_id;

pub use artifacts::ArtifactNames;
pub use asset::{AudioFormat, PageAsset};
pub use length::{LengthSpec, StoryLength};
pub use manifest::{PipelineState, RunManifest, RunStats};
pub use request::StoryRequest;
pub use story::{Page, StoryDocument};
pub use story_id::{InvalidStoryId, StoryId};
