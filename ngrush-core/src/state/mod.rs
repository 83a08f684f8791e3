//! Launcher state machine
//!
//! Decides what the device is doing between matches: showing the settings
//! menu, playing, showing the result, or shutting down.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
