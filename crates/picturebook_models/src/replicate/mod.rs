//! Replicate predictions API.
//!
//! Image generation on Replicate is an async job: create a prediction, poll
//! it until it reaches a terminal status, then download the output URL.

mod client;
mod dto;

pub use client::ReplicateImages;
pub use dto::{Prediction, PredictionStatus, PredictionUrls, extract_output_urls};

/// Provider name for logs and metrics.
pub(crate) const PROVIDER: &str = "replicate";
