//! Shared state between the input thread and the launcher
//!
//! Input sources (the stdin reader thread or GPIO interrupt callbacks) run
//! outside the executor. While a match is running they set the interrupt
//! signal directly; otherwise they feed button presses to the launcher
//! through a channel.

use std::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use ngrush_core::input::Button;
use ngrush_core::InterruptSignal;

/// Channel capacity for menu input
const INPUT_CHANNEL_SIZE: usize = 8;

/// Input delivered to the launcher outside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// One of the three buttons was pressed
    Button(Button),
    /// The input source is gone; nothing more will arrive
    Closed,
}

/// Queue of launcher input
pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE>;

/// Reaction flag for the turn in progress
pub static SIGNAL: InterruptSignal = InterruptSignal::new();

/// Menu and post-game button presses
pub static INPUT_CHANNEL: InputChannel = Channel::new();

/// Set while a match is running; routes presses to `SIGNAL`
pub static MATCH_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_match_active(active: bool) {
    MATCH_ACTIVE.store(active, Ordering::Release);
}

/// Drop presses queued while nobody was listening
pub fn drain_input() {
    while let Ok(event) = INPUT_CHANNEL.try_receive() {
        if event == InputEvent::Closed {
            // Keep the end-of-input marker for the next reader
            let _ = INPUT_CHANNEL.try_send(InputEvent::Closed);
            break;
        }
    }
}
