//! Match observer
//!
//! Lets the launcher (or a test) follow the match turn by turn without the
//! engines knowing who is listening. Every method defaults to a no-op.

use embassy_time::Duration;

use crate::game::{PlayerId, RoundParams};

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player reacted before the deadline
    Reacted,
    /// The deadline passed first; the player lost a life
    TimedOut,
}

pub trait MatchObserver {
    /// A round is about to start (prompt already chosen)
    fn round_started(&mut self, _round: u16, _params: &RoundParams, _prompt: &str) {}

    /// A player's turn has started; the interrupt signal is armed
    fn turn_started(&mut self, _player: PlayerId, _deadline: Duration) {}

    /// A player's turn is over
    fn turn_finished(&mut self, _player: PlayerId, _outcome: TurnOutcome, _lives: u8) {}

    /// A player lost their last life in `round`
    fn player_eliminated(&mut self, _player: PlayerId, _round: u16) {}
}

impl MatchObserver for () {}

impl<T: MatchObserver + ?Sized> MatchObserver for &mut T {
    fn round_started(&mut self, round: u16, params: &RoundParams, prompt: &str) {
        (**self).round_started(round, params, prompt)
    }

    fn turn_started(&mut self, player: PlayerId, deadline: Duration) {
        (**self).turn_started(player, deadline)
    }

    fn turn_finished(&mut self, player: PlayerId, outcome: TurnOutcome, lives: u8) {
        (**self).turn_finished(player, outcome, lives)
    }

    fn player_eliminated(&mut self, player: PlayerId, round: u16) {
        (**self).player_eliminated(player, round)
    }
}
