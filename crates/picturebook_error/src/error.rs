//! Top-level error wrapper types.

use crate::{AssemblyError, ConfigError, JsonError, ProviderError, StorageError, StoryError};

/// The union of every Picturebook error.
///
/// # Examples
///
/// ```
/// use picturebook_error::{PicturebookError, ConfigError};
///
/// let err: PicturebookError = ConfigError::new("missing output_dir").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PicturebookErrorKind {
    /// External provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Story text generation or validation failure
    #[from(StoryError)]
    Story(StoryError),
    /// Document assembly failure
    #[from(AssemblyError)]
    Assembly(AssemblyError),
    /// Artifact storage failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Picturebook error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Picturebook Error: {}", _0)]
pub struct PicturebookError(Box<PicturebookErrorKind>);

impl PicturebookError {
    /// Create a new error from a kind.
    pub fn new(kind: PicturebookErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PicturebookErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PicturebookErrorKind
impl<T> From<T> for PicturebookError
where
    T: Into<PicturebookErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Picturebook operations.
pub type PicturebookResult<T> = std::result::Result<T, PicturebookError>;
