//! Deterministic artifact file names.
//!
//! Every file a run produces is named from the story id and, for per-page
//! media, the 1-based page number. Bundle readers locate files by these
//! names, so they are the only place the patterns are spelled out.

use crate::{AudioFormat, StoryId};

/// File names for one story's artifacts.
///
/// # Examples
///
/// ```
/// use picturebook_core::{ArtifactNames, AudioFormat};
///
/// let names = ArtifactNames::new("ab12cd34".parse().unwrap());
/// assert_eq!(names.image_file(2), "page_2_ab12cd34.png");
/// assert_eq!(names.audio_file(2, AudioFormat::Mp3), "page_2_ab12cd34.mp3");
/// assert_eq!(names.pdf_file(), "storybook_ab12cd34.pdf");
/// assert_eq!(names.bundle_file(), "story_data_ab12cd34.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    story_id: StoryId,
}

impl ArtifactNames {
    /// Names for the given story.
    pub fn new(story_id: StoryId) -> Self {
        Self { story_id }
    }

    /// The story these names belong to.
    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    /// `page_{n}_{id}.png`
    pub fn image_file(&self, page: usize) -> String {
        format!("page_{}_{}.png", page, self.story_id)
    }

    /// `page_{n}_{id}.{wav|mp3}`
    pub fn audio_file(&self, page: usize, format: AudioFormat) -> String {
        format!("page_{}_{}.{}", page, self.story_id, format.extension())
    }

    /// `storybook_{id}.pdf`
    pub fn pdf_file(&self) -> String {
        format!("storybook_{}.pdf", self.story_id)
    }

    /// `story_data_{id}.json`
    pub fn bundle_file(&self) -> String {
        format!("story_data_{}.json", self.story_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_deterministic() {
        let id: StoryId = "0f0f0f0f".parse().unwrap();
        let a = ArtifactNames::new(id.clone());
        let b = ArtifactNames::new(id);
        assert_eq!(a.image_file(1), b.image_file(1));
        assert_eq!(a.audio_file(3, AudioFormat::Wav), "page_3_0f0f0f0f.wav");
        assert_ne!(a.image_file(1), a.image_file(2));
    }
}
