//! Recovering a JSON object from model output.
//!
//! Models asked for a JSON object usually return one, but some wrap it in
//! prose or a markdown fence. Parsing is split into two stages so each can
//! be exercised on its own:
//!
//! 1. [`parse_direct`]: the whole content is the JSON document.
//! 2. [`extract_greedy_object`]: take the first `{` through the last `}`
//!    (across newlines) and parse that.
//!
//! [`parse_story_json`] runs them in order.

use picturebook_error::{StoryError, StoryErrorKind};
use serde_json::Value;

/// Parse the whole content as JSON.
///
/// # Examples
///
/// ```
/// use picturebook_narrative::parse_direct;
///
/// assert!(parse_direct("{\"title\": \"Owl\"}").is_ok());
/// assert!(parse_direct("Sure! {\"title\": \"Owl\"}").is_err());
/// ```
pub fn parse_direct(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(content.trim())
}

/// Slice from the first `{` to the last `}`.
///
/// Greedy on purpose: nested objects and prose between two top-level objects
/// are all kept, and the parse decides whether the slice is usable.
///
/// # Examples
///
/// ```
/// use picturebook_narrative::extract_greedy_object;
///
/// let content = "Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```";
/// assert_eq!(extract_greedy_object(content), Some("{\"a\": {\"b\": 1}}"));
/// assert_eq!(extract_greedy_object("no braces"), None);
/// ```
pub fn extract_greedy_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Two-stage parse of model output into a JSON value.
///
/// # Errors
///
/// [`StoryErrorKind::Unparsable`] when neither stage yields valid JSON.
pub fn parse_story_json(content: &str) -> Result<Value, StoryError> {
    let direct_err = match parse_direct(content) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    tracing::debug!(error = %direct_err, "Direct parse failed, extracting object");

    let Some(candidate) = extract_greedy_object(content) else {
        return Err(StoryError::new(StoryErrorKind::Unparsable(format!(
            "no JSON object in response ({} chars): {}",
            content.len(),
            direct_err
        ))));
    };

    serde_json::from_str(candidate).map_err(|e| {
        StoryError::new(StoryErrorKind::Unparsable(format!(
            "extracted object is not valid JSON: {}",
            e
        )))
    })
}
