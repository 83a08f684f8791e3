//! Events that trigger launcher transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Settings menu finished; a match can start
    SettingsConfirmed,
    /// The running match has a result
    MatchFinished,
    /// Post-game: replay with the same settings
    PlayAgain,
    /// Post-game: return to the settings menu
    BackToMenu,
    /// Shut the device down
    PowerOff,
}
