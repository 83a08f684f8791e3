//! Configuration type definitions
//!
//! These types describe a match before it starts. The launcher builds them
//! from the settings menu, the command line or the config file.

use core::fmt;

use embassy_time::Duration;

use crate::game::PromptClass;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum players per match (roster capacity)
pub const MAX_PLAYERS: usize = 16;

/// Maximum prompt length in bytes
pub const MAX_PROMPT_LEN: usize = 8;

/// Longest base deadline a match accepts
pub const MAX_BASE_DEADLINE: Duration = Duration::from_secs(60 * 60);

/// Fraction of eliminated players after which hard prompts are used
pub const DEFAULT_LOSS_THRESHOLD: f32 = 0.6;

/// Errors rejecting a match configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Fewer than one player
    NoPlayers,
    /// More players than the roster can hold
    TooManyPlayers { max: usize },
    /// Base deadline is zero
    NonPositiveDeadline,
    /// Base deadline is longer than `MAX_BASE_DEADLINE`
    DeadlineTooLong,
    /// Fewer than one starting life
    NoLives,
    /// Loss threshold outside [0, 1] or not a number
    InvalidLossThreshold,
    /// A prompt pool has no entries
    EmptyPromptPool(PromptClass),
    /// A prompt does not fit in `MAX_PROMPT_LEN` bytes
    PromptTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoPlayers => write!(f, "a match needs at least one player"),
            ConfigError::TooManyPlayers { max } => {
                write!(f, "a match supports at most {} players", max)
            }
            ConfigError::NonPositiveDeadline => write!(f, "round time must be greater than zero"),
            ConfigError::DeadlineTooLong => write!(
                f,
                "round time must be at most {} s",
                MAX_BASE_DEADLINE.as_secs()
            ),
            ConfigError::NoLives => write!(f, "players need at least one life"),
            ConfigError::InvalidLossThreshold => {
                write!(f, "loss threshold must be between 0 and 1")
            }
            ConfigError::EmptyPromptPool(class) => write!(f, "the {} prompt pool is empty", class),
            ConfigError::PromptTooLong => {
                write!(f, "prompts must be at most {} bytes", MAX_PROMPT_LEN)
            }
        }
    }
}

/// Validated match configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Players at the start of the match (fixed for the whole match)
    players: u8,
    /// Turn deadline while every player is still in
    base_deadline: Duration,
    /// Lives each player starts with
    lives: u8,
    /// Loss ratio at which rounds switch to hard prompts
    loss_threshold: f32,
}

impl MatchConfig {
    /// Validate and build a match configuration
    pub fn new(players: usize, base_deadline: Duration, lives: u8) -> Result<Self, ConfigError> {
        if players < 1 {
            return Err(ConfigError::NoPlayers);
        }
        if players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers { max: MAX_PLAYERS });
        }
        if base_deadline.as_ticks() == 0 {
            return Err(ConfigError::NonPositiveDeadline);
        }
        if base_deadline > MAX_BASE_DEADLINE {
            return Err(ConfigError::DeadlineTooLong);
        }
        if lives < 1 {
            return Err(ConfigError::NoLives);
        }

        Ok(Self {
            players: players as u8,
            base_deadline,
            lives,
            loss_threshold: DEFAULT_LOSS_THRESHOLD,
        })
    }

    /// Replace the loss threshold (default 0.6)
    pub fn with_loss_threshold(mut self, threshold: f32) -> Result<Self, ConfigError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidLossThreshold);
        }
        self.loss_threshold = threshold;
        Ok(self)
    }

    pub fn players(&self) -> u8 {
        self.players
    }

    pub fn base_deadline(&self) -> Duration {
        self.base_deadline
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn loss_threshold(&self) -> f32 {
        self.loss_threshold
    }
}

/// Round speed offered by the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeedPreset {
    /// 15 second base deadline
    Slow,
    /// 10 second base deadline
    #[default]
    Medium,
    /// 5 second base deadline
    Fast,
}

impl SpeedPreset {
    const ALL: [SpeedPreset; 3] = [SpeedPreset::Slow, SpeedPreset::Medium, SpeedPreset::Fast];

    /// Base deadline for this speed
    pub fn base_deadline(self) -> Duration {
        match self {
            SpeedPreset::Slow => Duration::from_secs(15),
            SpeedPreset::Medium => Duration::from_secs(10),
            SpeedPreset::Fast => Duration::from_secs(5),
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Medium => "Medium",
            SpeedPreset::Fast => "Fast",
        }
    }

    /// Next preset, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous preset, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            SpeedPreset::Slow => 0,
            SpeedPreset::Medium => 1,
            SpeedPreset::Fast => 2,
        }
    }
}
