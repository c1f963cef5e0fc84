//! Prompt text for story generation.

use picturebook_core::LengthSpec;
use picturebook_interface::{TextRequest, TextRequestBuilder, TextRequestBuilderError};

/// System instruction describing the exact JSON shape for `spec`.
///
/// # Examples
///
/// ```
/// use picturebook_core::StoryLength;
/// use picturebook_narrative::system_instruction;
///
/// let text = system_instruction(&StoryLength::Short.spec());
/// assert!(text.contains("exactly 3 pages"));
/// assert!(text.contains("{\"page\": 3, \"text\": \"Page 3 text content\"}"));
/// ```
pub fn system_instruction(spec: &LengthSpec) -> String {
    let page_lines = (1..=spec.page_count)
        .map(|n| format!("        {{\"page\": {n}, \"text\": \"Page {n} text content\"}}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"You are a creative children's storybook writer. Create exactly {pages} pages of a children's story, written as {tone}.

Format your response as JSON with this structure:
{{
    "title": "Story Title",
    "character_description": "Brief description of main character(s) for consistent image generation",
    "setting": "Brief description of where the story takes place, for consistent backgrounds",
    "moral": "The lesson of the story in one short sentence",
    "pages": [
{page_lines}
    ]
}}

Keep each page to {sentences} sentences. Make sure the story is appropriate for children aged 3-8."#,
        pages = spec.page_count,
        tone = spec.tone_hint,
        sentences = spec.sentences_per_page,
    )
}

/// The user turn for a story about `prompt`.
pub fn user_message(prompt: &str, page_count: usize) -> String {
    format!("Create a {page_count}-page children's storybook about: {prompt}")
}

/// Assemble the full completion request.
pub fn story_request(
    prompt: &str,
    spec: &LengthSpec,
    temperature: Option<f32>,
) -> Result<TextRequest, TextRequestBuilderError> {
    TextRequestBuilder::default()
        .system(system_instruction(spec))
        .user(user_message(prompt, spec.page_count))
        .json_mode(true)
        .temperature(temperature)
        .build()
}
