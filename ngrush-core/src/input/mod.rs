//! Button input
//!
//! Three buttons drive the launcher menus. During a match any press is a
//! reaction; presses closer together than the refractory period are
//! dropped.

pub mod button;
pub mod debounce;

pub use button::Button;
pub use debounce::Debouncer;
