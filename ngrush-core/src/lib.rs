//! Board-agnostic core logic for the ngrush elimination game
//!
//! This crate contains all game logic that does not depend on a specific
//! display, input device or sound system:
//!
//! - Collaborator traits (renderer, feedback cues, prompt source, observer)
//! - Interrupt signal racing a player's reaction against a deadline
//! - Ticker pacing urgency cues during a turn
//! - Round and match engines (difficulty scaling, elimination bookkeeping)
//! - Launcher state machine and settings menus
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod menu;
pub mod signal;
pub mod state;
pub mod ticker;
pub mod traits;

pub use engine::{MatchEngine, MatchOutcome, RoundEngine, RoundSummary};
pub use signal::InterruptSignal;
pub use ticker::Ticker;
