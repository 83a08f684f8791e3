//! Per-round difficulty
//!
//! Round parameters are derived fresh every round from the number of
//! players still in the match. Fewer players means a shorter deadline, and
//! once enough players are out the prompts switch to the hard pool.

use core::fmt;

use embassy_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which prompt pool a round draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PromptClass {
    /// Bigrams
    Easy,
    /// Trigrams
    Hard,
}

impl fmt::Display for PromptClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptClass::Easy => write!(f, "easy"),
            PromptClass::Hard => write!(f, "hard"),
        }
    }
}

/// Parameters of one round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundParams {
    /// Active players at the start of the round
    pub players_remaining: u8,
    /// Fraction of the starting players already eliminated
    pub loss_ratio: f32,
    /// Prompt pool for this round
    pub prompt_class: PromptClass,
    /// Per-turn deadline
    pub deadline: Duration,
}

impl RoundParams {
    /// Derive round parameters from match state
    ///
    /// - `total`: players at the start of the match (> 0)
    /// - `remaining`: active players now (<= `total`)
    /// - `base_deadline`: deadline while all players are in
    /// - `threshold`: loss ratio at which hard prompts start
    pub fn compute(total: u8, remaining: u8, base_deadline: Duration, threshold: f32) -> Self {
        let total = total.max(1);
        let remaining = remaining.min(total);

        let lost = total - remaining;
        let loss_ratio = lost as f32 / total as f32;

        let hard = loss_ratio >= threshold || remaining == 3;

        // Integer microseconds keep the scaling exact for whole-second bases
        let deadline_us = base_deadline.as_micros() * remaining as u64 / total as u64;

        Self {
            players_remaining: remaining,
            loss_ratio,
            prompt_class: if hard {
                PromptClass::Hard
            } else {
                PromptClass::Easy
            },
            deadline: Duration::from_micros(deadline_us),
        }
    }

    pub fn use_hard_prompt(&self) -> bool {
        self.prompt_class == PromptClass::Hard
    }
}
