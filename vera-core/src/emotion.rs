//! Keyword-based emotion detection.
//!
//! A deliberately small classifier: lowercase the utterance, scan for
//! keyword substrings, first category wins. It has no negation
//! handling, so "not sad" still reads as sad. Check order is fixed:
//! sad, then happy, then angry, then neutral.

use crate::types::Emotion;

const SAD_KEYWORDS: [&str; 5] = ["sad", "unhappy", "depressed", "upset", "miserable"];
const HAPPY_KEYWORDS: [&str; 5] = ["happy", "glad", "cheerful", "delighted", "great"];
const ANGRY_KEYWORDS: [&str; 4] = ["angry", "furious", "annoyed", "irritated"];

/// Classify the emotional tone of one utterance.
#[must_use]
pub fn classify(text: &str) -> Emotion {
    let lower = text.to_lowercase();
    if SAD_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Emotion::Sad
    } else if HAPPY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Emotion::Happy
    } else if ANGRY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Emotion::Angry
    } else {
        Emotion::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_category() {
        assert_eq!(classify("I feel so sad today"), Emotion::Sad);
        assert_eq!(classify("I'm really happy about this"), Emotion::Happy);
        assert_eq!(classify("this makes me angry"), Emotion::Angry);
        assert_eq!(classify("the sky is blue"), Emotion::Neutral);
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(classify("I AM FURIOUS"), Emotion::Angry);
        assert_eq!(classify("So GLAD you asked"), Emotion::Happy);
    }

    #[test]
    fn sad_wins_over_happy() {
        // Mixed signals resolve by check order.
        assert_eq!(classify("happy but also sad"), Emotion::Sad);
    }

    #[test]
    fn substring_matches_inside_words() {
        // "gladiator" contains "glad"; a known quirk of substring scan.
        assert_eq!(classify("the gladiator arena"), Emotion::Happy);
    }

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(classify(""), Emotion::Neutral);
    }
}
