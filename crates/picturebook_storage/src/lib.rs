//! Artifact persistence for Picturebook.
//!
//! [`ArtifactStore`] owns the output directory. It writes page images, page
//! narration, the assembled PDF and the JSON story bundle, and reads bundles
//! back by story id.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;

pub use store::ArtifactStore;
