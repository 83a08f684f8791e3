//! Background workers

pub mod input;

pub use input::spawn_input_reader;
