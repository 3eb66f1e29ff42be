//! Per-session conversation context.
//!
//! Unlike [`crate::types::Memory`], nothing here is persisted: the
//! context lives for one run of the loop and keeps a bounded window of
//! recent exchanges for logging and prompt-side context.

use std::collections::VecDeque;

/// How many exchanges the rolling transcript keeps.
const WINDOW: usize = 5;

/// Rolling per-session state owned by the conversation loop.
#[derive(Debug, Default)]
pub struct SessionContext {
    turns: u32,
    recent: VecDeque<(String, String)>,
}

impl SessionContext {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one question/answer exchange, evicting the oldest once
    /// the window is full.
    pub fn push_exchange(&mut self, question: &str, answer: &str) {
        if self.recent.len() == WINDOW {
            self.recent.pop_front();
        }
        self.recent
            .push_back((question.to_string(), answer.to_string()));
        self.turns += 1;
    }

    /// Total exchanges this session.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Render the recent window as a readable transcript.
    #[must_use]
    pub fn transcript(&self, agent_name: &str) -> String {
        let mut out = String::new();
        for (question, answer) in &self.recent {
            out.push_str(&format!("You: {question}\n{agent_name}: {answer}\n"));
        }
        out
    }
}
