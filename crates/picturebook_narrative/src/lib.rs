//! Story text generation for Picturebook.
//!
//! [`StoryTextGenerator`] asks a [`TextProvider`](picturebook_interface::TextProvider)
//! for a story in a fixed JSON shape, recovers the JSON in two stages
//! ([`parse_direct`], then [`extract_greedy_object`]) and validates it into a
//! [`StoryDocument`](picturebook_core::StoryDocument).
//!
//! [`describe_scene`] condenses page prose into an illustration-friendly
//! scene description.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod generator;
mod prompt;
mod scene;
mod validation;

pub use extraction::{extract_greedy_object, parse_direct, parse_story_json};
pub use generator::StoryTextGenerator;
pub use prompt::{story_request, system_instruction, user_message};
pub use scene::describe_scene;
pub use validation::{REQUIRED_FIELDS, validate_story};
