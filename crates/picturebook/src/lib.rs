//! Picturebook - illustrated, narrated children's storybooks from a prompt.
//!
//! A run asks a language model for a structured story, illustrates each page
//! through an ordered chain of image providers, narrates each page through a
//! chain of speech providers, and assembles a PDF plus a JSON bundle.
//! Every stage after the story text degrades gracefully: a page may end up
//! with a placeholder illustration or no narration, but the run completes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use picturebook::{Pipeline, PicturebookConfig, StoryLength};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PicturebookConfig::load()?;
//!     let manifest = Pipeline::from_config(&config)?
//!         .generate("a lighthouse keeper's cat", StoryLength::Normal)
//!         .await?;
//!     println!("Wrote {:?}", manifest.pdf_path);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout
//! - `api` - enable tests that call live providers
//!
//! # Architecture
//!
//! - `picturebook_error` - Error types
//! - `picturebook_core` - Story, manifest and artifact naming types
//! - `picturebook_config` - Layered configuration and credentials
//! - `picturebook_interface` - Provider traits
//! - `picturebook_models` - HTTP client and concrete providers
//! - `picturebook_narrative` - Story text generation and scene descriptions
//! - `picturebook_storage` - Artifact store and bundles
//! - `picturebook_assembler` - PDF assembly
//! - `picturebook_pipeline` - Image, narration and run orchestration
//!
//! This crate (`picturebook`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod observability;
pub mod report;

pub use picturebook_assembler::*;
pub use picturebook_config::*;
pub use picturebook_core::*;
pub use picturebook_error::*;
pub use picturebook_interface::*;
pub use picturebook_models::*;
pub use picturebook_narrative::*;
pub use picturebook_pipeline::*;
pub use picturebook_storage::*;
