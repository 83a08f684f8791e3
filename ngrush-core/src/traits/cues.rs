//! Feedback cues (ticking and penalty sounds)

/// Feedback events emitted during a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Slow tick while plenty of time remains
    Tick,
    /// Fast tick in the final seconds
    TickFast,
    /// A player ran out of time
    Penalty,
}

/// Errors from a cue player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueError {
    /// The sound for this cue is not loaded
    Missing,
    /// The output device rejected the cue
    Playback,
}

/// Fire-and-forget feedback output
///
/// Implementations must not block; failures are ignored by the engines.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

/// Silent cue player
impl CuePlayer for () {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

impl<T: CuePlayer + ?Sized> CuePlayer for &mut T {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}
