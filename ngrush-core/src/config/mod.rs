//! Configuration types
//!
//! Match settings are validated on construction; an invalid combination is
//! rejected before a match starts, never clamped.

pub mod timing;
pub mod types;

pub use timing::*;
pub use types::*;
