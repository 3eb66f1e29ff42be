//! Core type definitions for the Vera dialogue engine.
//!
//! Everything here serialises to the two flat JSON documents Vera keeps
//! in its working directory: the session memory and the learned facts.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Emotion
// ---------------------------------------------------------------------------

/// Coarse emotional state, detected per utterance and persisted in
/// [`Memory::emotional_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// No keyword matched.
    #[default]
    Neutral,
    /// The user sounded happy.
    Happy,
    /// The user sounded sad.
    Sad,
    /// The user sounded angry.
    Angry,
}

impl Emotion {
    /// Emoji tag appended to recalled facts.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Neutral => "🙂",
            Self::Happy => "😊",
            Self::Sad => "😔",
            Self::Angry => "😠",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Response-decoration persona. Stored in the memory document so the
/// agent keeps its voice across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// Warm, reassuring suffix.
    #[default]
    Kind,
    /// Enthusiastic wrapper with emoji.
    Excited,
    /// Musing prefix.
    Curious,
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Kind => "kind",
            Self::Excited => "excited",
            Self::Curious => "curious",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Session memory document
// ---------------------------------------------------------------------------

/// One question/answer exchange, kept in the persisted history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What the user said.
    pub question: String,
    /// What the agent replied.
    pub answer: String,
    /// When the exchange happened.
    pub timestamp: DateTime<Utc>,
}

/// The session memory document, persisted as one JSON file.
///
/// Every field carries a serde default so documents written by older
/// versions (or hand-edited ones with missing fields) still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Memory {
    /// The user's name, asked once on first run.
    pub user_name: String,
    /// Last persisted emotional state.
    pub emotional_state: Emotion,
    /// Things the user likes ("chess") and dislikes ("not spiders").
    pub preferences: Vec<String>,
    /// Decoration persona.
    pub personality: Personality,
    /// The most recent normalised user utterance, used by corrections.
    pub last_utterance: String,
    /// Most recently stated liked topic.
    pub last_topic: String,
    /// Full exchange history.
    pub history: Vec<HistoryEntry>,
}

impl Memory {
    /// Whether `item` is already stored as a preference
    /// (case-insensitive).
    #[must_use]
    pub fn has_preference(&self, item: &str) -> bool {
        let needle = item.to_lowercase();
        self.preferences.iter().any(|p| p.to_lowercase() == needle)
    }
}

// ---------------------------------------------------------------------------
// Learned facts
// ---------------------------------------------------------------------------

/// A single taught fact: the response text plus the emotional state the
/// user was in when they taught it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedFact {
    /// The answer to give back when the key matches.
    pub response: String,
    /// Emotional state at teach time.
    #[serde(default)]
    pub emotion: Emotion,
}

/// The learned-facts document: keys are lowercased prompts.
///
/// Insertion order is observable (substring lookup returns the oldest
/// matching key) so this is an [`IndexMap`], not a hash map.
pub type LearnedFacts = IndexMap<String, LearnedFact>;
