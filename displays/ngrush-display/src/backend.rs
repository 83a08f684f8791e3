//! Display backend trait
//!
//! Defines the interface for different display types.

use core::fmt;

use crate::framebuffer::Framebuffer;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Bus transfer to the display failed
    Communication,
    /// Control pin (data/command select or reset) could not be driven
    Pin,
    /// Display not initialized
    NotInitialized,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Communication => write!(f, "display bus error"),
            DisplayError::Pin => write!(f, "display control pin error"),
            DisplayError::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for showing a finished frame.
pub trait DisplayBackend {
    /// Push the whole framebuffer to the display
    fn flush(&mut self, frame: &Framebuffer) -> Result<(), DisplayError>;

    /// Turn the panel on or off
    fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError>;
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn flush(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        (**self).flush(frame)
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        (**self).set_display_on(on)
    }
}
