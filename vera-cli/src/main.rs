//! Vera command-line companion.
//!
//! Wires the dialogue engine to a stdin/stdout conversation loop:
//! loads configuration and the two JSON stores, asks for the user's
//! name on first run, then alternates read / compose / persist until a
//! farewell or EOF.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use chrono::{Local, Utc};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use vera_core::store::{self, FactStore};
use vera_core::{
    composer, HistoryEntry, JsonFactStore, LearnedFact, Memory, SessionContext, VeraConfig,
};

const CONFIG_PATH: &str = "vera.toml";
const FAREWELLS: [&str; 3] = ["bye", "exit", "goodbye"];
const CORRECT_PREFIX: &str = "correct:";

fn main() -> anyhow::Result<()> {
    let config = VeraConfig::from_file(Path::new(CONFIG_PATH))
        .with_context(|| format!("loading {CONFIG_PATH}"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.general.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(agent = %config.general.agent_name, "Vera starting up");

    let mut memory: Memory = store::load_or_default(&config.stores.memory_path);
    let mut facts = JsonFactStore::open_or_default(&config.stores.learned_path);
    let mut session = SessionContext::new();
    let mut rng = rand::thread_rng();

    let agent = &config.general.agent_name;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if memory.user_name.is_empty() {
        print_prompt(&format!("{agent}: Hi! I don't think we've met. What's your name? "))?;
        match lines.next().transpose().context("reading name")? {
            Some(line) if !line.trim().is_empty() => {
                memory.user_name = line.trim().to_string();
                store::save_document(&config.stores.memory_path, &memory)?;
                info!(user = %memory.user_name, "First run, name recorded");
            }
            _ => {
                println!("{agent}: No name, no conversation. See you next time!");
                return Ok(());
            }
        }
        println!(
            "{agent}: Nice to meet you, {}! You can teach me things with 'teach: question | answer'.",
            memory.user_name
        );
    } else {
        println!(
            "{agent}: Hello {}! How can I help you today?",
            memory.user_name
        );
    }

    loop {
        print_prompt("You: ")?;
        let Some(line) = lines.next().transpose().context("reading input")? else {
            break;
        };
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        let lower = input.to_lowercase();
        if FAREWELLS.contains(&lower.as_str()) {
            break;
        }

        let reply = if starts_with_ignore_case(&input, CORRECT_PREFIX) {
            apply_correction(&input, &memory, &mut facts)?
        } else {
            composer::compose(&input, &mut memory, &mut facts, Local::now(), &mut rng)?
        };

        println!("{agent}: {reply}");

        memory.history.push(HistoryEntry {
            question: input.clone(),
            answer: reply.clone(),
            timestamp: Utc::now(),
        });
        if let Err(e) = store::save_document(&config.stores.memory_path, &memory) {
            warn!(error = %e, "Failed to persist session memory");
        }

        session.push_exchange(&input, &reply);
        debug!(turn = session.turns(), "Exchange recorded");
    }

    println!(
        "{agent}: Goodbye, {}! I'll remember everything for next time.",
        memory.user_name
    );
    debug!(
        turns = session.turns(),
        transcript = %session.transcript(agent),
        "Session ended"
    );
    Ok(())
}

/// Handle `correct: <better answer>`, overriding the stored response
/// for the previous utterance.
fn apply_correction(
    input: &str,
    memory: &Memory,
    facts: &mut JsonFactStore,
) -> anyhow::Result<String> {
    let correction = input[CORRECT_PREFIX.len()..].trim();
    if correction.is_empty() {
        return Ok("To correct me, use: correct: the better answer".to_string());
    }
    if memory.last_utterance.is_empty() {
        return Ok("There's nothing to correct yet, tell me something first!".to_string());
    }

    facts.put(
        memory.last_utterance.clone(),
        LearnedFact {
            response: correction.to_string(),
            emotion: memory.emotional_state,
        },
    )?;
    info!(key = %memory.last_utterance, "Correction stored");
    Ok(format!(
        "Thanks for the correction! I'll answer '{correction}' next time."
    ))
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn print_prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}
