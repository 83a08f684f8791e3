//! Prompt pool loading
//!
//! Pools are JSON files holding a single list:
//! `{"top_300_bigrams": [...]}` for easy rounds and
//! `{"top_300_trigrams": [...]}` for hard rounds. A missing file falls back
//! to the list built into the binary; a malformed one is an error.

use std::io::ErrorKind;
use std::path::Path;

use ngrush_core::config::{ConfigError, MAX_PROMPT_LEN};
use ngrush_core::game::PromptClass;
use serde::Deserialize;
use tracing::{info, warn};

use super::loader::PromptSettings;
use crate::error::AppError;

const EMBEDDED_BIGRAMS: &str = include_str!("../../data/top_300_bigrams.json");
const EMBEDDED_TRIGRAMS: &str = include_str!("../../data/top_300_trigrams.json");

#[derive(Deserialize)]
struct BigramFile {
    top_300_bigrams: Vec<String>,
}

#[derive(Deserialize)]
struct TrigramFile {
    top_300_trigrams: Vec<String>,
}

/// Both prompt pools, owned
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub easy: Vec<String>,
    pub hard: Vec<String>,
}

impl PromptSet {
    /// Load the pools named in the config
    pub fn load(settings: &PromptSettings) -> Result<Self, AppError> {
        let bigrams = read_or_embedded(&settings.bigrams, EMBEDDED_BIGRAMS)?;
        let trigrams = read_or_embedded(&settings.trigrams, EMBEDDED_TRIGRAMS)?;
        let set = Self::from_json(&bigrams, &trigrams)?;
        info!(
            "Loaded {} bigrams and {} trigrams",
            set.easy.len(),
            set.hard.len()
        );
        Ok(set)
    }

    /// The pools built into the binary
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_BIGRAMS, EMBEDDED_TRIGRAMS)
    }

    /// Parse and validate both pools
    pub fn from_json(bigrams: &str, trigrams: &str) -> Result<Self, AppError> {
        let easy = serde_json::from_str::<BigramFile>(bigrams)
            .map_err(|source| AppError::Prompts {
                name: "bigrams".into(),
                source,
            })?
            .top_300_bigrams;
        let hard = serde_json::from_str::<TrigramFile>(trigrams)
            .map_err(|source| AppError::Prompts {
                name: "trigrams".into(),
                source,
            })?
            .top_300_trigrams;

        let set = Self { easy, hard };
        set.validate()?;
        Ok(set)
    }

    /// Reject empty pools and prompts too long to show
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (class, pool) in [(PromptClass::Easy, &self.easy), (PromptClass::Hard, &self.hard)] {
            if pool.is_empty() {
                return Err(ConfigError::EmptyPromptPool(class));
            }
            if pool.iter().any(|p| p.len() > MAX_PROMPT_LEN) {
                return Err(ConfigError::PromptTooLong);
            }
        }
        Ok(())
    }
}

fn read_or_embedded(path: &Path, embedded: &'static str) -> Result<String, AppError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} not found, using built-in prompts", path.display());
            Ok(embedded.to_string())
        }
        Err(source) => Err(AppError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
