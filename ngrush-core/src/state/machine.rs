//! State machine definition

use super::events::Event;

/// Launcher states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Settings menu on screen
    #[default]
    Menu,
    /// A match is running
    Playing,
    /// Result on screen, waiting for the post-game choice
    GameOver,
    /// Powered off; the launcher exits
    Off,
}

impl State {
    /// Check if this is the final state
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Off)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Menu, SettingsConfirmed) => Playing,
            (Menu, PowerOff) => Off,

            (Playing, MatchFinished) => GameOver,

            (GameOver, PlayAgain) => Playing,
            (GameOver, BackToMenu) => Menu,
            (GameOver, PowerOff) => Off,

            // Default: stay in current state
            _ => self,
        }
    }
}
