//! Ordered content blocks for a storybook.

use picturebook_core::{Page, StoryDocument};
use picturebook_error::{AssemblyError, AssemblyErrorKind};
use std::path::PathBuf;

/// Text shown where a page has no illustration.
pub const MISSING_IMAGE_MARKER: &str = "[Illustration unavailable]";

/// One unit of storybook content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Story title
    Title(String),
    /// The lesson line, already prefixed with "The lesson: "
    Moral(String),
    /// Start of story page `n`
    PageHeading(usize),
    /// Illustration file for the current page
    Image(PathBuf),
    /// Stand-in for a page without an illustration
    MissingImage,
    /// Page prose
    Text(String),
}

/// Layout-independent description of a storybook.
///
/// The plan is a title block, an optional moral, then for each story page
/// in ascending page order: a heading, an image or the missing-image marker,
/// and the page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPlan {
    title: String,
    blocks: Vec<Block>,
}

impl DocumentPlan {
    /// Build the plan for `story`.
    ///
    /// `images[i]` is the illustration for `story.pages()[i]`; short or
    /// `None` entries produce the missing-image marker.
    ///
    /// # Errors
    ///
    /// [`AssemblyErrorKind::Ordering`] if two pages share a page number.
    ///
    /// # Examples
    ///
    /// ```
    /// use picturebook_assembler::{Block, DocumentPlan};
    /// use picturebook_core::{Page, StoryDocument};
    ///
    /// let story = StoryDocument::new(
    ///     "Bea's Garden",
    ///     "a bumblebee",
    ///     "a garden",
    ///     "patience pays off",
    ///     vec![Page::new(1, "Bea buzzed.")],
    /// );
    /// let plan = DocumentPlan::build(&story, &[None]).unwrap();
    /// assert_eq!(plan.blocks()[1], Block::Moral("The lesson: patience pays off".into()));
    /// assert_eq!(plan.blocks()[3], Block::MissingImage);
    /// ```
    pub fn build(story: &StoryDocument, images: &[Option<PathBuf>]) -> Result<Self, AssemblyError> {
        let mut pages: Vec<(&Page, Option<&PathBuf>)> = story
            .pages()
            .iter()
            .enumerate()
            .map(|(i, page)| (page, images.get(i).and_then(Option::as_ref)))
            .collect();
        pages.sort_by_key(|(page, _)| *page.page());

        if let Some(pair) = pages.windows(2).find(|w| w[0].0.page() == w[1].0.page()) {
            return Err(AssemblyError::new(AssemblyErrorKind::Ordering(format!(
                "page {} appears more than once",
                pair[0].0.page()
            ))));
        }

        let mut blocks = vec![Block::Title(story.title().clone())];
        let moral = story.moral().trim();
        if !moral.is_empty() {
            blocks.push(Block::Moral(format!("The lesson: {}", moral)));
        }

        for (page, image) in pages {
            blocks.push(Block::PageHeading(*page.page()));
            blocks.push(match image {
                Some(path) => Block::Image(path.clone()),
                None => Block::MissingImage,
            });
            blocks.push(Block::Text(page.text().clone()));
        }

        Ok(Self {
            title: story.title().clone(),
            blocks,
        })
    }

    /// Document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Blocks in reading order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of story pages in the plan.
    pub fn page_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageHeading(_)))
            .count()
    }
}
