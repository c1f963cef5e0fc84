//! Validated story text.

use serde::{Deserialize, Serialize};

/// One page of story prose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Page {
    /// 1-based page number
    page: usize,
    /// Page prose, never empty
    text: String,
}

impl Page {
    /// Create a page.
    pub fn new(page: usize, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// A complete, validated story.
///
/// Pages are numbered `1..=n` contiguously in order. Instances are produced
/// by the story text generator after validation and are not modified
/// afterwards.
///
/// # Examples
///
/// ```
/// use picturebook_core::{Page, StoryDocument};
///
/// let story = StoryDocument::new(
///     "The Brave Fox",
///     "a small red fox with a green scarf",
///     "a misty pine forest",
///     "Courage grows when you share it",
///     vec![Page::new(1, "Fox woke early."), Page::new(2, "Fox met Owl.")],
/// );
/// assert_eq!(story.page_count(), 2);
/// assert!(story.is_contiguous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryDocument {
    /// Story title
    title: String,
    /// Main character(s), reused in every image prompt
    character_description: String,
    /// Where the story happens, reused in every image prompt
    setting: String,
    /// Lesson of the story
    moral: String,
    /// Pages in reading order
    pages: Vec<Page>,
}

impl StoryDocument {
    /// Create a story document.
    pub fn new(
        title: impl Into<String>,
        character_description: impl Into<String>,
        setting: impl Into<String>,
        moral: impl Into<String>,
        pages: Vec<Page>,
    ) -> Self {
        Self {
            title: title.into(),
            character_description: character_description.into(),
            setting: setting.into(),
            moral: moral.into(),
            pages,
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether `pages[i].page == i + 1` holds for every page.
    pub fn is_contiguous(&self) -> bool {
        self.pages
            .iter()
            .enumerate()
            .all(|(i, page)| page.page == i + 1)
    }
}
