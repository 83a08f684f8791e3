//! Round and match engines
//!
//! `RoundEngine` runs one pass over the active players with a shared prompt
//! and deadline. `MatchEngine` owns the roster, derives each round's
//! difficulty and drives rounds until at most one player is left.

pub mod matcher;
pub mod round;

pub use matcher::{MatchEngine, MatchOutcome, MatchPhase};
pub use round::{RoundEngine, RoundSummary};
