//! Configuration for the Vera agent.
//!
//! Maps directly to `vera.toml` in the working directory. A missing
//! file yields the full default configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level Vera configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeraConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Store file locations.
    #[serde(default)]
    pub stores: StoreConfig,
}

impl VeraConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `VeraError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::VeraError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: defaults are returned so the
    /// agent runs out of the box.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Display name the agent speaks as.
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            agent_name: "Vera".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Where the two JSON store files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Session memory document.
    #[serde(default = "default_memory_path")]
    pub memory_path: PathBuf,
    /// Learned facts document.
    #[serde(default = "default_learned_path")]
    pub learned_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            memory_path: PathBuf::from("memory.json"),
            learned_path: PathBuf::from("learned.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_agent_name() -> String {
    "Vera".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_memory_path() -> PathBuf {
    PathBuf::from("memory.json")
}
fn default_learned_path() -> PathBuf {
    PathBuf::from("learned.json")
}
