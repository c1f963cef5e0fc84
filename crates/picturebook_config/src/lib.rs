//! Configuration for Picturebook.
//!
//! Settings are layered with the `config` crate:
//! - Bundled defaults (include_str! from picturebook.toml)
//! - `~/.config/picturebook/picturebook.toml`
//! - `./picturebook.toml`
//! - `PICTUREBOOK__*` environment variables
//!
//! API keys never live in configuration files. They are read from the
//! environment once, when [`PicturebookConfig::load`] runs, and carried in
//! [`Credentials`] from then on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod settings;

pub use credentials::{CredentialStatus, Credentials};
pub use settings::{
    AssemblyConfig, EspeakConfig, FreepikConfig, HuggingFaceConfig, ImageProviderKind,
    ImagesConfig, PicturebookConfig, PlaceholderConfig, ReplicateConfig, SpeechConfig,
    TextConfig,
};
