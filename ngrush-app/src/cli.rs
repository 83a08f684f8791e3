//! Command line interface
//!
//! With no positional arguments the launcher shows the settings menu. Giving
//! a player count plays a single match with those settings and exits.

use std::path::PathBuf;

use clap::Parser;
use embassy_time::Duration;
use ngrush_core::config::{ConfigError, MatchConfig, MAX_BASE_DEADLINE};

use crate::config::AppConfig;
use crate::error::AppError;

/// Round time of a one-shot match when only the player count is given
const ONE_SHOT_ROUND_SECS: f64 = 5.0;
/// Lives in a one-shot match when not given
const ONE_SHOT_LIVES: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "ngrush", version, about = "Beat the ngram before time runs out")]
pub struct Cli {
    /// Players in a one-shot match (skips the menu)
    pub players: Option<usize>,

    /// Base round time in seconds for the one-shot match
    pub round_time: Option<f64>,

    /// Starting lives for the one-shot match
    pub lives: Option<u8>,

    /// Config file (defaults to ./ngrush.toml, then built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable the urgency ticker
    #[arg(long)]
    pub no_ticker: bool,

    /// Disable audio cues
    #[arg(long)]
    pub no_audio: bool,
}

impl Cli {
    /// Match to play straight away, if one was given on the command line
    pub fn one_shot(&self, config: &AppConfig) -> Result<Option<MatchConfig>, AppError> {
        let Some(players) = self.players else {
            return Ok(None);
        };

        let base = round_duration(self.round_time.unwrap_or(ONE_SHOT_ROUND_SECS))?;
        let lives = self.lives.unwrap_or(ONE_SHOT_LIVES);

        let config = MatchConfig::new(players, base, lives)?
            .with_loss_threshold(config.game.loss_threshold)?;
        Ok(Some(config))
    }

    /// Fold command line switches into the loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        if self.no_ticker {
            config.ticker.enabled = false;
        }
        if self.no_audio {
            config.audio.enabled = false;
        }
    }
}

/// Base deadline for a round time given in seconds
///
/// Positive times below one microsecond round up to one microsecond.
fn round_duration(secs: f64) -> Result<Duration, ConfigError> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(ConfigError::NonPositiveDeadline);
    }
    if secs > MAX_BASE_DEADLINE.as_micros() as f64 / 1_000_000.0 {
        return Err(ConfigError::DeadlineTooLong);
    }
    let micros = (secs * 1_000_000.0).ceil() as u64;
    Ok(Duration::from_micros(micros.max(1)))
}
