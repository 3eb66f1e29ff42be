//! Preference extraction from "I like ..." / "I don't like ..." phrasing.
//!
//! Dislike phrasings are checked first: "I don't like spiders" contains
//! "i like" as a substring, so the order matters. Dislikes are stored
//! as `"not {item}"` in the same preference list.

use tracing::debug;

use crate::types::Memory;

const LIKE_PHRASE: &str = "i like";
const DISLIKE_PHRASES: [&str; 3] = ["i don't like", "i do not like", "i dont like"];

/// Scan one utterance for a stated preference and record it.
///
/// Returns the acknowledgement reply when a preference phrase was
/// found, `None` otherwise. Duplicate items (case-insensitive) are not
/// stored twice; the reply changes instead.
pub fn record_preference(input: &str, memory: &mut Memory) -> Option<String> {
    let lower = input.to_lowercase();

    for phrase in DISLIKE_PHRASES {
        if let Some(pos) = lower.find(phrase) {
            let item = lower[pos + phrase.len()..].trim().to_string();
            if item.is_empty() {
                return None;
            }
            return Some(store(memory, format!("not {item}"), &item, false));
        }
    }

    if let Some(pos) = lower.find(LIKE_PHRASE) {
        let item = lower[pos + LIKE_PHRASE.len()..].trim().to_string();
        if item.is_empty() {
            return None;
        }
        return Some(store(memory, item.clone(), &item, true));
    }

    None
}

fn store(memory: &mut Memory, stored: String, item: &str, liked: bool) -> String {
    if memory.has_preference(&stored) {
        return format!("You already told me about {item}, I remember!");
    }

    debug!(preference = %stored, "Recorded preference");
    memory.preferences.push(stored);
    if liked {
        memory.last_topic = item.to_string();
        format!("Nice! I'll remember that you like {item}.")
    } else {
        format!("Understood, you don't like {item}. Noted.")
    }
}
