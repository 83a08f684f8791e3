//! Launcher errors
//!
//! Only configuration and wiring problems are fatal; they are reported once
//! and the launcher exits. Display and audio failures during play are logged
//! where they happen.

use std::path::PathBuf;

use ngrush_core::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid prompt file {name}: {source}")]
    Prompts {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    Settings(ConfigError),

    #[error("failed to start input reader: {0}")]
    Input(#[source] std::io::Error),

    #[error("{0} needs a build with the `rpi` feature")]
    Unsupported(&'static str),

    #[cfg(feature = "rpi")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[cfg(feature = "rpi")]
    #[error("SPI error: {0}")]
    Spi(#[from] rppal::spi::Error),

    #[cfg(feature = "rpi")]
    #[error("display setup failed: {0}")]
    Display(ngrush_display::DisplayError),

    #[cfg(feature = "rpi")]
    #[error("invalid wiring: {0}")]
    Wiring(String),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Settings(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_message() {
        let e = AppError::from(ConfigError::NoLives);
        assert_eq!(e.to_string(), "invalid settings: players need at least one life");
    }

    #[test]
    fn test_io_error_names_path() {
        let e = AppError::Io {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(e.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_unsupported_names_feature() {
        let e = AppError::Unsupported("gpio input");
        assert_eq!(e.to_string(), "gpio input needs a build with the `rpi` feature");
    }
}
