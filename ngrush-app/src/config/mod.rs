//! Configuration loading
//!
//! The launcher reads a TOML config file (or the embedded default) and two
//! JSON prompt pools (or the embedded lists).

pub mod loader;
pub mod prompts;

pub use loader::{AppConfig, AudioSettings, DisplayKind};
pub use prompts::PromptSet;
