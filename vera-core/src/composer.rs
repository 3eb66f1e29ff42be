//! Response composition: the priority chain that turns one user
//! utterance into one reply.
//!
//! The chain is ordered and first-match-wins:
//!
//! 1. explicit teach command
//! 2. implicit "X is/are Y" statement
//! 3. stated preference
//! 4. shared-topic coincidence ("me too")
//! 5. compliment
//! 6. date / time query
//! 7. exact learned-fact match
//! 8. substring learned-fact match
//! 9. random fallback
//!
//! Fact answers and fallbacks pass through [`decorate`], which layers
//! an emotion prefix and a personality wrapper around the core text.
//! Command acknowledgements (steps 1-6) are returned undecorated.

use chrono::{DateTime, Datelike, Local, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::emotion;
use crate::error::{Result, VeraError};
use crate::learning;
use crate::preferences;
use crate::store::FactStore;
use crate::types::{Emotion, Memory, Personality};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// Contraction forms only: "you are nice" reads as a declarative
// statement and is claimed by the implicit-teach step above this one.
const COMPLIMENTS: [&str; 5] = [
    "you're nice",
    "you're amazing",
    "you're so cool",
    "i love you",
    "you're the best",
];

const SHARED_TOPIC_PHRASES: [&str; 2] = ["me too", "i also like"];

const FALLBACK_TEMPLATES: [&str; 3] = ["Tell me more!", "Interesting, go on...", "I see, {name}."];

/// Compose the reply to one user utterance.
///
/// Mutates `memory` (last utterance always; emotional state on the
/// fallback branch; preferences and topic when stated) and writes
/// taught facts through `facts`. The clock and RNG are passed in so
/// callers control them.
///
/// # Errors
///
/// Returns a store error if persisting a taught fact fails.
pub fn compose<S: FactStore, R: Rng>(
    input: &str,
    memory: &mut Memory,
    facts: &mut S,
    now: DateTime<Local>,
    rng: &mut R,
) -> Result<String> {
    let normalized = input.trim().to_lowercase();
    memory.last_utterance = normalized.clone();
    let live_emotion = emotion::classify(input);

    // 1. Explicit teach command.
    if learning::is_teach_command(input) {
        return match learning::explicit_teach(input, memory, facts) {
            Ok(taught) => Ok(format!(
                "I learned that '{}' means '{}'. Ask me about it any time!",
                taught.key, taught.value
            )),
            Err(VeraError::TeachCommand(_)) => {
                Ok("To teach me, use: teach: question | answer".to_string())
            }
            Err(e) => Err(e),
        };
    }

    // 2. Implicit declarative statement.
    if let Some(taught) = learning::implicit_teach(input, memory, facts)? {
        return Ok(format!(
            "Interesting! I'll remember that about {}.",
            taught.key
        ));
    }

    // 3. Stated preference.
    if let Some(reply) = preferences::record_preference(input, memory) {
        return Ok(reply);
    }

    // 4. Shared-topic coincidence.
    if SHARED_TOPIC_PHRASES.iter().any(|p| normalized.contains(p)) {
        if memory.last_topic.is_empty() {
            return Ok("Me too! Although you haven't told me what you like yet.".to_string());
        }
        return Ok(format!(
            "No way, I like {} too! Great minds think alike.",
            memory.last_topic
        ));
    }

    // 5. Compliment.
    if COMPLIMENTS.iter().any(|c| normalized.contains(c)) {
        return Ok(format!(
            "Aww, thank you, {}! You just made my day.",
            memory.user_name
        ));
    }

    // 6. Date / time query.
    if let Some(reply) = answer_clock_query(&normalized, now) {
        return Ok(reply);
    }

    // 7. Exact learned-fact match.
    if let Some(fact) = facts.get(&normalized) {
        debug!(key = %normalized, "Exact fact match");
        let core = format!("{} {}", fact.response, fact.emotion.emoji());
        return Ok(decorate(
            &core,
            fact.emotion,
            live_emotion,
            memory.personality,
        ));
    }

    // 8. Substring learned-fact match, oldest key first.
    for (key, fact) in facts.all() {
        if normalized.contains(key.as_str()) {
            debug!(key = %key, "Substring fact match");
            let core = format!("{} {}", fact.response, fact.emotion.emoji());
            return Ok(decorate(
                &core,
                fact.emotion,
                live_emotion,
                memory.personality,
            ));
        }
    }

    // 9. Fallback. Only here does the detected emotion persist.
    memory.emotional_state = live_emotion;
    let template = FALLBACK_TEMPLATES
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_TEMPLATES[0]);
    let core = template.replace("{name}", &memory.user_name);
    Ok(decorate(
        &core,
        memory.emotional_state,
        live_emotion,
        memory.personality,
    ))
}

/// Answer "what day is today" / "what time is it" style queries.
fn answer_clock_query(normalized: &str, now: DateTime<Local>) -> Option<String> {
    let asks_date = (normalized.contains("day") && normalized.contains("today"))
        || (normalized.contains("what")
            && (normalized.contains("date") || normalized.contains("day")));
    if asks_date {
        let weekday = WEEKDAYS[now.weekday().num_days_from_monday() as usize];
        return Some(format!(
            "Today is {weekday}, {:02}/{:02}/{}.",
            now.day(),
            now.month(),
            now.year()
        ));
    }

    if normalized.contains("what time") || normalized.contains("the time") {
        return Some(format!(
            "It's {:02}:{:02} right now.",
            now.hour(),
            now.minute()
        ));
    }

    None
}

/// Layer the emotion prefix and personality wrapper around `core`.
///
/// The emotion carried by the response wins over the freshly detected
/// one unless it is neutral.
fn decorate(core: &str, carried: Emotion, live: Emotion, personality: Personality) -> String {
    let effective = if carried == Emotion::Neutral { live } else { carried };

    let with_emotion = match effective {
        Emotion::Sad => format!("Oh no, I'm sorry you're feeling that way. {core}"),
        Emotion::Happy => format!("That's wonderful to hear! {core}"),
        Emotion::Angry => format!("Easy now, let's work through this together. {core}"),
        Emotion::Neutral => core.to_string(),
    };

    match personality {
        Personality::Kind => format!("{with_emotion} I'm here to help!"),
        Personality::Excited => format!("😄 {with_emotion} How cool!"),
        Personality::Curious => format!("Hmm, how curious... {with_emotion}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryFactStore;
    use crate::types::LearnedFact;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Local> {
        // 2025-08-06 was a Wednesday.
        Local
            .with_ymd_and_hms(2025, 8, 6, 15, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn turn(input: &str, memory: &mut Memory, facts: &mut MemoryFactStore) -> String {
        compose(input, memory, facts, fixed_now(), &mut rng()).expect("compose")
    }

    #[test]
    fn teach_then_exact_recall() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();

        let ack = turn("teach: favorite color | blue", &mut mem, &mut facts);
        assert!(ack.contains("favorite color"));
        assert!(ack.contains("blue"));

        let reply = turn("favorite color", &mut mem, &mut facts);
        assert!(reply.contains("blue"));
    }

    #[test]
    fn malformed_teach_shows_usage() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();
        let reply = turn("teach: no separator here", &mut mem, &mut facts);
        assert!(reply.contains("teach: question | answer"));
        assert!(facts.is_empty());
    }

    #[test]
    fn substring_recall_prefers_oldest_key() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();
        facts
            .put(
                "rust".to_string(),
                LearnedFact {
                    response: "a systems language".to_string(),
                    emotion: Emotion::Neutral,
                },
            )
            .expect("put");
        facts
            .put(
                "rust compiler".to_string(),
                LearnedFact {
                    response: "rustc".to_string(),
                    emotion: Emotion::Neutral,
                },
            )
            .expect("put");

        let reply = turn("tell me about the rust compiler", &mut mem, &mut facts);
        assert!(reply.contains("a systems language"));
        assert!(!reply.contains("rustc"));
    }

    #[test]
    fn date_query_answers_with_weekday() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();
        let reply = turn("what day is today", &mut mem, &mut facts);
        assert!(reply.contains("Wednesday"));
        assert!(reply.contains("06/08/2025"));
    }

    #[test]
    fn time_query_answers_with_clock() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();
        let reply = turn("what time is it?", &mut mem, &mut facts);
        assert!(reply.contains("15:30"));
    }

    #[test]
    fn preference_then_shared_topic() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();

        turn("I like chess", &mut mem, &mut facts);
        assert_eq!(mem.last_topic, "chess");

        let reply = turn("me too!", &mut mem, &mut facts);
        assert!(reply.contains("chess"));
    }

    #[test]
    fn compliment_uses_user_name() {
        let mut mem = Memory {
            user_name: "Ana".to_string(),
            ..Memory::default()
        };
        let mut facts = MemoryFactStore::new();
        let reply = turn("you're the best", &mut mem, &mut facts);
        assert!(reply.contains("Ana"));
        assert!(reply.contains("thank you"));
    }

    #[test]
    fn fallback_persists_detected_emotion() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();

        let reply = turn("feeling a bit sad honestly", &mut mem, &mut facts);
        assert_eq!(mem.emotional_state, Emotion::Sad);
        assert!(reply.contains("sorry you're feeling that way"));
    }

    #[test]
    fn fallback_is_deterministic_with_seeded_rng() {
        let mut mem1 = Memory::default();
        let mut mem2 = Memory::default();
        let mut facts = MemoryFactStore::new();

        let a = turn("zzz unmatched input", &mut mem1, &mut facts);
        let b = turn("zzz unmatched input", &mut mem2, &mut facts);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn personalities_decorate_differently() {
        let mut facts = MemoryFactStore::new();
        let mut replies = Vec::new();
        for personality in [Personality::Kind, Personality::Excited, Personality::Curious] {
            let mut mem = Memory {
                personality,
                ..Memory::default()
            };
            replies.push(turn("zzz unmatched input", &mut mem, &mut facts));
        }
        assert_ne!(replies[0], replies[1]);
        assert_ne!(replies[1], replies[2]);
        assert_ne!(replies[0], replies[2]);
    }

    #[test]
    fn last_utterance_tracks_every_turn() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();
        turn("  Hello There  ", &mut mem, &mut facts);
        assert_eq!(mem.last_utterance, "hello there");
    }

    #[test]
    fn declarative_statement_is_learned_implicitly() {
        let mut mem = Memory::default();
        let mut facts = MemoryFactStore::new();
        let reply = turn("cats are cute", &mut mem, &mut facts);
        assert!(reply.contains("cats"));
        assert_eq!(facts.get("cats").expect("fact").response, "cute");
    }
}
