//! Display side of the ngrush game
//!
//! This crate provides:
//! - `Framebuffer`, a 128x64 monochrome page buffer usable as an
//!   `embedded-graphics` draw target
//! - `DisplayBackend` trait for anything that can show a framebuffer
//! - `Sh1106` driver for SPI-attached SH1106 OLED panels
//! - `OledRenderer`, the game's `Renderer` on top of any backend
//!
//! # Architecture
//!
//! All drawing happens in the framebuffer; a backend only ever pushes whole
//! pages. The same renderer drives the real panel on the device and the
//! terminal preview on a development machine.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod backend;
pub mod framebuffer;
pub mod renderer;
pub mod sh1106;

pub use backend::{DisplayBackend, DisplayError};
pub use framebuffer::{Framebuffer, Scaled, HEIGHT, PAGES, WIDTH};
pub use renderer::OledRenderer;
pub use sh1106::Sh1106;
