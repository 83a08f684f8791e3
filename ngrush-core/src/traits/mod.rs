//! Collaborator traits
//!
//! These traits define the interface between the game engines and the
//! outside world: the display, the sound system, the prompt pools and
//! anything that wants to follow the match as it happens.

pub mod cues;
pub mod observer;
pub mod prompts;
pub mod renderer;

pub use cues::{Cue, CueError, CuePlayer};
pub use observer::{MatchObserver, TurnOutcome};
pub use prompts::{Prompt, PromptPools, PromptSource};
pub use renderer::{RenderError, Renderer};
