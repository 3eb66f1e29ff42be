//! Fact learning: explicit teach commands and the implicit
//! declarative-sentence heuristic.
//!
//! Two explicit forms are accepted:
//!
//! - `teach: question | answer`
//! - `teach that key is value`
//!
//! The implicit heuristic picks up plain statements like "cats are
//! cute" (copula exactly once, short key, not a question) and stores
//! them without being asked.

use tracing::debug;

use crate::error::{Result, VeraError};
use crate::store::FactStore;
use crate::types::{LearnedFact, Memory};

const TEACH_COLON: &str = "teach:";
const TEACH_THAT: &str = "teach that ";
const COPULAS: [&str; 2] = [" is ", " are "];
const INTERROGATIVES: [&str; 7] = ["what", "who", "where", "when", "why", "how", "which"];

/// Maximum number of words an implicitly learned key may have.
const MAX_KEY_WORDS: usize = 5;

/// A key/value pair extracted from a teach command or statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teach {
    /// Lowercased lookup key.
    pub key: String,
    /// Stored response text.
    pub value: String,
}

/// Whether the input starts with one of the explicit teach prefixes.
#[must_use]
pub fn is_teach_command(input: &str) -> bool {
    let trimmed = input.trim();
    starts_with_ignore_case(trimmed, TEACH_COLON) || starts_with_ignore_case(trimmed, TEACH_THAT)
}

/// Parse and store an explicit teach command.
///
/// The taught value keeps the user's casing; the key is lowercased.
/// The fact is tagged with the current persisted emotional state.
///
/// # Errors
///
/// Returns [`VeraError::TeachCommand`] when the command is recognised
/// but malformed (missing separator, empty key or value), or a store
/// error if persisting the fact fails.
pub fn explicit_teach<S: FactStore>(
    input: &str,
    memory: &Memory,
    facts: &mut S,
) -> Result<Teach> {
    let trimmed = input.trim();

    let (body, separator) = if starts_with_ignore_case(trimmed, TEACH_COLON) {
        (tail_after(trimmed, TEACH_COLON), "|")
    } else if starts_with_ignore_case(trimmed, TEACH_THAT) {
        (tail_after(trimmed, TEACH_THAT), " is ")
    } else {
        return Err(VeraError::TeachCommand(
            "expected 'teach: question | answer' or 'teach that key is value'".to_string(),
        ));
    };

    let Some((raw_key, raw_value)) = body.split_once(separator) else {
        return Err(VeraError::TeachCommand(format!(
            "missing '{}' separator",
            separator.trim()
        )));
    };

    let key = raw_key.trim().to_lowercase();
    let value = raw_value.trim().to_string();
    if key.is_empty() || value.is_empty() {
        return Err(VeraError::TeachCommand(
            "both a question and an answer are required".to_string(),
        ));
    }

    store_fact(facts, key.clone(), value.clone(), memory)?;
    Ok(Teach { key, value })
}

/// Try the implicit "X is/are Y" heuristic on a plain statement.
///
/// Returns `Ok(None)` when the input does not look like a teachable
/// statement: questions (trailing `?` or a leading interrogative word),
/// inputs without exactly one copula, or keys longer than
/// [`MAX_KEY_WORDS`] words. Both key and value are stored lowercased.
///
/// # Errors
///
/// Returns a store error if persisting the fact fails.
pub fn implicit_teach<S: FactStore>(
    input: &str,
    memory: &Memory,
    facts: &mut S,
) -> Result<Option<Teach>> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() || lower.ends_with('?') {
        return Ok(None);
    }
    if let Some(first_word) = lower.split_whitespace().next() {
        if INTERROGATIVES.contains(&first_word) {
            return Ok(None);
        }
    }

    for copula in COPULAS {
        if lower.matches(copula).count() != 1 {
            continue;
        }
        let Some((raw_key, raw_value)) = lower.split_once(copula) else {
            continue;
        };

        let key = raw_key.trim().to_string();
        let value = raw_value.trim().to_string();
        let key_words = key.split_whitespace().count();
        if key.is_empty() || value.is_empty() || key_words > MAX_KEY_WORDS {
            return Ok(None);
        }

        store_fact(facts, key.clone(), value.clone(), memory)?;
        return Ok(Some(Teach { key, value }));
    }

    Ok(None)
}

fn store_fact<S: FactStore>(
    facts: &mut S,
    key: String,
    value: String,
    memory: &Memory,
) -> Result<()> {
    debug!(key = %key, emotion = %memory.emotional_state, "Storing learned fact");
    facts.put(
        key,
        LearnedFact {
            response: value,
            emotion: memory.emotional_state,
        },
    )
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn tail_after<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.get(prefix.len()..).unwrap_or("")
}
