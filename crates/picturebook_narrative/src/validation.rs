//! Shape checks that turn parsed JSON into a [`StoryDocument`].

use picturebook_core::{Page, StoryDocument};
use picturebook_error::{StoryError, StoryErrorKind};
use serde_json::{Map, Value};

/// Top-level fields every story must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "title",
    "character_description",
    "setting",
    "pages",
    "moral",
];

/// Validate a parsed story object against the expected page count.
///
/// Every missing field is reported at once. A string field counts as missing
/// when it is absent, null, not a string, or blank; `pages` counts as missing
/// when absent or null. Page numbers in the input are ignored and rewritten
/// to `1..=n` in order of appearance.
///
/// # Errors
///
/// - [`StoryErrorKind::Unparsable`] if the value is not an object or `pages`
///   is not a list
/// - [`StoryErrorKind::MissingFields`] listing every missing field
/// - [`StoryErrorKind::PageCount`] if the page list has the wrong length
/// - [`StoryErrorKind::InvalidPage`] for a page without usable text
///
/// # Examples
///
/// ```
/// use picturebook_narrative::validate_story;
/// use serde_json::json;
///
/// let value = json!({
///     "title": "Owl at Noon",
///     "character_description": "a small grey owl",
///     "setting": "a sunny barn",
///     "moral": "rest when you need to",
///     "pages": [{"page": 1, "text": "Owl yawned."}],
/// });
/// let story = validate_story(&value, 1).unwrap();
/// assert_eq!(story.title(), "Owl at Noon");
/// ```
pub fn validate_story(value: &Value, expected_pages: usize) -> Result<StoryDocument, StoryError> {
    let Some(object) = value.as_object() else {
        return Err(StoryError::new(StoryErrorKind::Unparsable(format!(
            "expected a JSON object, got {}",
            json_type(value)
        ))));
    };

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| is_missing(object, field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Story is missing required fields");
        return Err(StoryError::new(StoryErrorKind::MissingFields(missing)));
    }

    let Some(entries) = object.get("pages").and_then(Value::as_array) else {
        return Err(StoryError::new(StoryErrorKind::Unparsable(
            "`pages` must be a list".to_string(),
        )));
    };
    if entries.len() != expected_pages {
        return Err(StoryError::new(StoryErrorKind::PageCount {
            expected: expected_pages,
            actual: entries.len(),
        }));
    }

    let pages = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| page_from_entry(i + 1, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StoryDocument::new(
        string_field(object, "title"),
        string_field(object, "character_description"),
        string_field(object, "setting"),
        string_field(object, "moral"),
        pages,
    ))
}

fn is_missing(object: &Map<String, Value>, field: &str) -> bool {
    match object.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) if field == "pages" => false,
        Some(_) => true,
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> String {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn page_from_entry(index: usize, entry: &Value) -> Result<Page, StoryError> {
    let invalid = |reason: &str| {
        StoryError::new(StoryErrorKind::InvalidPage {
            index,
            reason: reason.to_string(),
        })
    };

    let text = match entry {
        Value::Object(page) => match page.get("text") {
            Some(Value::String(text)) => text.trim(),
            Some(_) => return Err(invalid("`text` is not a string")),
            None => return Err(invalid("missing `text`")),
        },
        _ => return Err(invalid("expected an object")),
    };

    if text.is_empty() {
        return Err(invalid("`text` is empty"));
    }
    Ok(Page::new(index, text))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story(pages: usize) -> Value {
        let pages: Vec<Value> = (0..pages)
            .map(|i| json!({"page": 10 + i, "text": format!("Page text {}.", i)}))
            .collect();
        json!({
            "title": "The Brave Little Boat",
            "character_description": "a red tugboat with a round face",
            "setting": "a busy harbour",
            "moral": "small helpers matter",
            "pages": pages,
        })
    }

    #[test]
    fn test_valid_story_renumbers_pages() {
        let doc = validate_story(&story(3), 3).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert!(doc.is_contiguous());
        assert_eq!(doc.pages()[2].text(), "Page text 2.");
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let value = json!({"title": "Only a title", "setting": "   "});
        let err = validate_story(&value, 3).unwrap_err();
        assert_eq!(
            err.kind.missing_fields(),
            ["character_description", "setting", "pages", "moral"]
        );
        let message = err.kind.to_string();
        assert!(message.contains("character_description, setting, pages, moral"));
    }

    #[test]
    fn test_missing_moral_alone() {
        let mut value = story(5);
        value.as_object_mut().unwrap().remove("moral");
        let err = validate_story(&value, 5).unwrap_err();
        assert_eq!(err.kind.missing_fields(), ["moral"]);
    }

    #[test]
    fn test_page_count_mismatch() {
        let err = validate_story(&story(4), 5).unwrap_err();
        assert!(matches!(
            err.kind,
            StoryErrorKind::PageCount {
                expected: 5,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_empty_page_text_is_invalid() {
        let mut value = story(2);
        value["pages"][1]["text"] = json!("  ");
        let err = validate_story(&value, 2).unwrap_err();
        assert!(matches!(err.kind, StoryErrorKind::InvalidPage { index: 2, .. }));
    }

    #[test]
    fn test_pages_not_a_list() {
        let mut value = story(1);
        value["pages"] = json!("one page");
        let err = validate_story(&value, 1).unwrap_err();
        assert!(matches!(err.kind, StoryErrorKind::Unparsable(_)));
    }

    #[test]
    fn test_non_object_root() {
        let err = validate_story(&json!([1, 2, 3]), 3).unwrap_err();
        assert!(err.kind.to_string().contains("a list"));
    }
}
