//! Story text generation errors.

use crate::ProviderError;

/// Specific error conditions for story text generation.
///
/// Every variant is fatal to a pipeline run: without validated story text
/// there is no page loop to run.
#[derive(Debug, Clone, derive_more::Display)]
pub enum StoryErrorKind {
    /// The prompt was empty or whitespace
    #[display("Story prompt is empty")]
    EmptyPrompt,
    /// The completion request could not be assembled
    #[display("Could not build story prompt: {}", _0)]
    Prompt(String),
    /// The text provider call itself failed
    #[display("Text provider failed: {}", _0)]
    Provider(ProviderError),
    /// No JSON object could be recovered from the response
    #[display("Could not parse story JSON: {}", _0)]
    Unparsable(String),
    /// Required top-level fields were absent
    #[display("Story is missing required fields: {}", _0.join(", "))]
    MissingFields(Vec<String>),
    /// `pages` did not hold the expected number of entries
    #[display("Expected {} pages, got {}", expected, actual)]
    PageCount {
        /// Page count required by the length preset
        expected: usize,
        /// Page count the model produced
        actual: usize,
    },
    /// A page entry was not usable
    #[display("Page {} is invalid: {}", index, reason)]
    InvalidPage {
        /// 1-based position in the `pages` sequence
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

impl StoryErrorKind {
    /// Field names reported missing, if this is a missing-field error.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            StoryErrorKind::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

/// Error type for story text generation and validation.
///
/// # Examples
///
/// ```
/// use picturebook_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::MissingFields(vec![
///     "setting".to_string(),
///     "moral".to_string(),
/// ]));
/// assert!(format!("{}", err).contains("setting, moral"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The kind of error that occurred
    pub kind: StoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<ProviderError> for StoryError {
    #[track_caller]
    fn from(err: ProviderError) -> Self {
        Self::new(StoryErrorKind::Provider(err))
    }
}
