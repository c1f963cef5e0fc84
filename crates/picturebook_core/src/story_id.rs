//! Story identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of every story identifier.
const STORY_ID_LEN: usize = 8;

/// Eight lowercase hex digits addressing every artifact of one pipeline run.
///
/// Parsing accepts either case and stores the lowercase form.
///
/// # Examples
///
/// ```
/// use picturebook_core::StoryId;
///
/// let id = StoryId::generate();
/// assert_eq!(id.as_str().len(), 8);
///
/// let parsed: StoryId = "ab12cd34".parse().unwrap();
/// assert_eq!(parsed.as_str(), "ab12cd34");
/// assert!("../etc".parse::<StoryId>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct StoryId(String);

impl StoryId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(simple[..STORY_ID_LEN].to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A string that is not a valid [`StoryId`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "Invalid story id '{}': expected {} hex digits",
    value,
    STORY_ID_LEN
)]
pub struct InvalidStoryId {
    /// The rejected input
    pub value: String,
}

impl std::str::FromStr for StoryId {
    type Err = InvalidStoryId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == STORY_ID_LEN && s.chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(InvalidStoryId {
                value: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for StoryId {
    type Error = InvalidStoryId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StoryId> for String {
    fn from(id: StoryId) -> Self {
        id.0
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = StoryId::generate();
        let b = StoryId::generate();
        assert!(a.as_str().parse::<StoryId>().is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_path_like_ids() {
        assert!("page_1/x".parse::<StoryId>().is_err());
        assert!("abc".parse::<StoryId>().is_err());
        assert!("abcdefghi".parse::<StoryId>().is_err());
    }

    #[test]
    fn test_only_hex_digits_are_accepted() {
        assert!("page1xyz".parse::<StoryId>().is_err());
        assert!("ghijklmn".parse::<StoryId>().is_err());

        let upper: StoryId = "AB12CD34".parse().unwrap();
        assert_eq!(upper.as_str(), "ab12cd34");
    }

    #[test]
    fn test_serde_validates() {
        let id: StoryId = serde_json::from_str("\"0a1b2c3d\"").unwrap();
        assert_eq!(id.to_string(), "0a1b2c3d");
        assert!(serde_json::from_str::<StoryId>("\"nope\"").is_err());
    }
}
