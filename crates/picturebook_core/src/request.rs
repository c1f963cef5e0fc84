//! Pipeline input.

use crate::StoryLength;
use serde::{Deserialize, Serialize};

/// Immutable input to a pipeline run.
///
/// # Examples
///
/// ```
/// use picturebook_core::{StoryRequest, StoryLength};
///
/// let request = StoryRequest::new("a fox who learns to share", StoryLength::Short);
/// assert_eq!(request.page_count(), 3);
/// assert!(!request.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryRequest {
    /// What the story should be about
    prompt: String,
    /// Length preset
    length: StoryLength,
}

impl StoryRequest {
    /// Create a request. The prompt is trimmed.
    pub fn new(prompt: impl Into<String>, length: StoryLength) -> Self {
        Self {
            prompt: prompt.into().trim().to_string(),
            length,
        }
    }

    /// Whether the prompt carries no content.
    pub fn is_blank(&self) -> bool {
        self.prompt.is_empty()
    }

    /// Number of pages the finished story must have.
    pub fn page_count(&self) -> usize {
        self.length.spec().page_count
    }
}
