//! # Vera Core Library
//!
//! Rule-based dialogue engine behind the Vera command-line companion.
//!
//! One call to [`composer::compose`] turns a user utterance into a
//! reply by walking a fixed priority chain:
//!
//! - **Learning** — explicit `teach:` commands and implicit "X is Y"
//!   statements, write-through to a JSON fact store
//! - **Preferences** — "I like / I don't like" tracking with dedup
//! - **Small talk** — shared-topic coincidences, compliments, date and
//!   time queries
//! - **Recall** — exact then substring lookup over learned facts
//! - **Decoration** — detected emotion and a persisted personality
//!   shape the final phrasing
//!
//! State lives in two flat JSON documents (session memory, learned
//! facts) so a session picks up exactly where the previous one ended.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod composer;
pub mod config;
pub mod emotion;
pub mod error;
pub mod learning;
pub mod preferences;
pub mod session;
pub mod store;
pub mod types;

pub use config::VeraConfig;
pub use error::{Result, VeraError};
pub use session::SessionContext;
pub use store::{FactStore, JsonFactStore, MemoryFactStore};
pub use types::*;
