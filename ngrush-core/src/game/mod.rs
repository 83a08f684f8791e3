//! Match data model
//!
//! The roster of surviving players and the per-round parameters derived
//! from it.

pub mod roster;
pub mod round;

pub use roster::{Player, PlayerId, Roster};
pub use round::{PromptClass, RoundParams};
