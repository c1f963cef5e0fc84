//! Error types for the Picturebook storybook generator.
//!
//! This crate provides the error taxonomy shared by every Picturebook crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Provider failures ([`ProviderError`]) are expected, routine outcomes that
//! callers turn into "try the next provider". Only [`StoryError`] is fatal to
//! a pipeline run.
//!
//! # Examples
//!
//! ```
//! use picturebook_error::{PicturebookResult, ConfigError};
//!
//! fn load() -> PicturebookResult<String> {
//!     Err(ConfigError::new("output_dir is empty"))?
//! }
//!
//! match load() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod config;
mod error;
mod json;
mod provider;
mod storage;
mod story;

pub use assembly::{AssemblyError, AssemblyErrorKind};
pub use config::ConfigError;
pub use error::{PicturebookError, PicturebookErrorKind, PicturebookResult};
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
