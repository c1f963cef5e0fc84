//! Story length presets.

use serde::{Deserialize, Serialize};

/// How long a story should be.
///
/// # Examples
///
/// ```
/// use picturebook_core::StoryLength;
///
/// assert_eq!(StoryLength::parse_or_default("LONG"), StoryLength::Long);
/// assert_eq!(StoryLength::parse_or_default("epic"), StoryLength::Normal);
/// assert_eq!(format!("{}", StoryLength::Extended), "extended");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoryLength {
    /// Three short pages
    Short,
    /// Five pages, the classic picture book
    #[default]
    Normal,
    /// Eight pages
    Long,
    /// Twelve pages
    Extended,
}

impl StoryLength {
    /// Parse a length name, falling back to [`StoryLength::Normal`] for
    /// anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// The page layout preset for this length.
    pub fn spec(self) -> LengthSpec {
        match self {
            StoryLength::Short => LengthSpec {
                page_count: 3,
                sentences_per_page: "1-2",
                tone_hint: "a quick bedtime story",
            },
            StoryLength::Normal => LengthSpec {
                page_count: 5,
                sentences_per_page: "2-3",
                tone_hint: "a classic picture book",
            },
            StoryLength::Long => LengthSpec {
                page_count: 8,
                sentences_per_page: "3-4",
                tone_hint: "a longer adventure with a clear beginning, middle and end",
            },
            StoryLength::Extended => LengthSpec {
                page_count: 12,
                sentences_per_page: "3-5",
                tone_hint: "an extended adventure with several chapters of action",
            },
        }
    }
}

/// Page layout preset for a [`StoryLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthSpec {
    /// Exact number of pages the story must have
    pub page_count: usize,
    /// Sentence range per page, as given to the language model
    pub sentences_per_page: &'static str,
    /// Short description of the story's shape
    pub tone_hint: &'static str,
}
