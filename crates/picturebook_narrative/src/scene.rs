//! Keyword-based scene descriptions for image prompts.
//!
//! Page prose makes a noisy image prompt. [`describe_scene`] reduces it to
//! the words an illustrator needs: a feeling, an action, a couple of objects,
//! a few other salient words, and a tag naming the kind of scene.

use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z']+").expect("Valid word regex"));

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "an", "and", "any", "are", "as", "at", "be", "been",
    "before", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has",
    "have", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "it's", "just", "me", "my", "no", "not", "now", "of", "on", "once", "one", "or", "our", "out",
    "over", "said", "she", "so", "some", "that", "the", "their", "them", "then", "there", "they",
    "this", "to", "too", "up", "upon", "us", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "will", "with", "would", "you", "your",
];

const EMOTIONS: &[&str] = &[
    "happy", "sad", "scared", "afraid", "angry", "excited", "determined", "lonely", "proud",
    "curious", "surprised", "worried", "joyful", "nervous", "shy", "calm", "cheerful", "grumpy",
    "sleepy", "delighted", "frightened", "glad", "hopeful",
];

const ACTIONS: &[&str] = &[
    "run", "ran", "runs", "jump", "jumped", "jumps", "fly", "flew", "flies", "swim", "swam",
    "climb", "climbed", "chase", "chased", "race", "raced", "dance", "danced", "play", "played",
    "look", "looked", "find", "found", "hug", "hugged", "sing", "sang", "build", "built", "read",
    "hide", "hid", "explore", "explored", "help", "helped", "share", "shared", "laugh", "laughed",
    "sleep", "slept", "wave", "waved", "dig", "dug",
];

const OBJECTS: &[&str] = &[
    "tree", "trees", "flower", "flowers", "house", "castle", "boat", "ball", "book", "star",
    "stars", "moon", "sun", "cloud", "clouds", "river", "lake", "mountain", "hill", "bridge",
    "door", "window", "garden", "forest", "cake", "kite", "hat", "basket", "lantern", "map",
    "treasure", "bed", "rainbow", "sea", "cave", "nest", "bike", "train", "wand", "blanket",
];

/// Scene tags checked in order; the first with a matching keyword wins.
/// `None` keywords means "any emotion word was found".
const SCENE_TAGS: &[(&str, Option<&[&str]>)] = &[
    ("emotional moment", None),
    (
        "dynamic action scene",
        Some(&[
            "run", "ran", "runs", "running", "jump", "jumped", "jumps", "jumping", "fly", "flew",
            "flies", "flying", "chase", "chased", "chasing", "race", "raced", "racing", "swim",
            "swam", "swimming", "climb", "climbed", "climbing",
        ]),
    ),
    (
        "nature scene",
        Some(&[
            "forest", "tree", "trees", "river", "garden", "meadow", "flower", "flowers", "lake",
            "mountain", "hill", "field", "woods", "sea", "beach", "pond",
        ]),
    ),
    (
        "magical scene",
        Some(&[
            "magic", "magical", "spell", "wizard", "fairy", "wand", "dragon", "unicorn",
            "enchanted", "potion", "sparkle", "sparkling",
        ]),
    ),
    (
        "cozy home scene",
        Some(&[
            "home", "house", "bed", "bedroom", "kitchen", "blanket", "fireplace", "cottage",
            "sofa", "pillow",
        ]),
    ),
];

const DEFAULT_TAG: &str = "storybook scene";

/// Reduce page text to a short scene description.
///
/// Returns `None` when the text has no salient words at all, in which case
/// callers fall back to the raw page text.
///
/// # Examples
///
/// ```
/// use picturebook_narrative::describe_scene;
///
/// let scene = describe_scene("The happy fox jumped over the river.").unwrap();
/// assert_eq!(scene, "happy, jumped, river, emotional moment");
///
/// assert_eq!(describe_scene("It was the end."), None);
/// ```
pub fn describe_scene(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = WORD
        .find_iter(&lowered)
        .map(|m| m.as_str().trim_matches('\''))
        .filter(|t| !t.is_empty() && !STOP_WORDS.contains(t))
        .collect();

    let emotion = tokens.iter().copied().find(|t| EMOTIONS.contains(t));
    let action = tokens.iter().copied().find(|t| is_action(t));
    let objects: Vec<&str> = dedup(tokens.iter().copied().filter(|t| OBJECTS.contains(t)))
        .into_iter()
        .take(2)
        .collect();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(emotion);
    parts.extend(action);
    parts.extend(objects.iter().copied());

    let others: Vec<&str> = dedup(tokens.iter().copied().filter(|t| {
        t.len() >= 4
            && !EMOTIONS.contains(t)
            && !is_action(t)
            && !OBJECTS.contains(t)
            && !parts.contains(t)
    }))
    .into_iter()
    .take(3)
    .collect();
    parts.extend(others);

    if parts.is_empty() {
        return None;
    }

    parts.push(scene_tag(&tokens, emotion.is_some()));
    Some(parts.join(", "))
}

fn is_action(token: &str) -> bool {
    ACTIONS.contains(&token) || (token.len() > 4 && token.ends_with("ing"))
}

fn scene_tag(tokens: &[&str], has_emotion: bool) -> &'static str {
    SCENE_TAGS
        .iter()
        .find(|(_, keywords)| match keywords {
            Some(words) => tokens.iter().any(|t| words.contains(t)),
            None => has_emotion,
        })
        .map(|(tag, _)| *tag)
        .unwrap_or(DEFAULT_TAG)
}

fn dedup<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for token in tokens {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}
