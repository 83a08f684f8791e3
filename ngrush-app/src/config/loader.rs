//! Config file loading
//!
//! Loads the launcher configuration from a TOML file.
//! Falls back to the embedded defaults if no file is present.

use std::path::{Path, PathBuf};

use embassy_time::Duration;
use ngrush_core::config::{ConfigError, SpeedPreset, TickerConfig, DEFAULT_LOSS_THRESHOLD};
use ngrush_core::input::Button;
use ngrush_core::menu::MatchSettings;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AppError;

/// Embedded default configuration
const EMBEDDED_CONFIG: &str = include_str!("../../ngrush.toml");

/// Config file looked up in the working directory
const LOCAL_CONFIG: &str = "ngrush.toml";

/// Match settings preselected in the menu
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchDefaults {
    pub speed: SpeedPreset,
    pub players: u8,
    pub lives: u8,
    pub loss_threshold: f32,
}

impl Default for MatchDefaults {
    fn default() -> Self {
        let settings = MatchSettings::default();
        Self {
            speed: settings.speed,
            players: settings.players,
            lives: settings.lives,
            loss_threshold: DEFAULT_LOSS_THRESHOLD,
        }
    }
}

impl MatchDefaults {
    pub fn settings(&self) -> MatchSettings {
        MatchSettings {
            speed: self.speed,
            players: self.players,
            lives: self.lives,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TickerSettings {
    pub enabled: bool,
    pub slow_interval_ms: u64,
    pub fast_interval_ms: u64,
    pub fast_window_ms: u64,
}

impl Default for TickerSettings {
    fn default() -> Self {
        let cadence = TickerConfig::default();
        Self {
            enabled: true,
            slow_interval_ms: cadence.slow_interval.as_millis(),
            fast_interval_ms: cadence.fast_interval.as_millis(),
            fast_window_ms: cadence.fast_window.as_millis(),
        }
    }
}

impl TickerSettings {
    /// Ticker cadence, or `None` when the ticker is off
    pub fn cadence(&self) -> Option<TickerConfig> {
        self.enabled.then(|| TickerConfig {
            slow_interval: Duration::from_millis(self.slow_interval_ms.max(1)),
            fast_interval: Duration::from_millis(self.fast_interval_ms.max(1)),
            fast_window: Duration::from_millis(self.fast_window_ms),
        })
    }
}

/// Where reactions and menu presses come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Lines on stdin
    #[default]
    Keyboard,
    /// Push buttons on GPIO (`rpi` builds)
    Gpio,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    pub source: InputSource,
    pub debounce_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            source: InputSource::Keyboard,
            debounce_ms: 200,
        }
    }
}

impl InputSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptSettings {
    pub bigrams: PathBuf,
    pub trigrams: PathBuf,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            bigrams: PathBuf::from("data/top_300_bigrams.json"),
            trigrams: PathBuf::from("data/top_300_trigrams.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSettings {
    pub enabled: bool,
    pub tick: PathBuf,
    pub tick_fast: PathBuf,
    pub penalty: PathBuf,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tick: PathBuf::from("sounds/tick.wav"),
            tick_fast: PathBuf::from("sounds/tick_fast.wav"),
            penalty: PathBuf::from("sounds/ding.wav"),
        }
    }
}

/// Where frames are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    /// Half-block rendering on stdout
    #[default]
    Terminal,
    /// Frames are drawn but not shown
    #[serde(rename = "none")]
    Headless,
    /// SH1106 panel on SPI (`rpi` builds)
    Sh1106,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    pub backend: DisplayKind,
    pub rotate: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            backend: DisplayKind::Terminal,
            rotate: true,
        }
    }
}

/// Raspberry Pi wiring, BCM pin numbers
#[cfg_attr(not(feature = "rpi"), allow(dead_code))]
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpioSettings {
    pub spi_bus: u8,
    pub spi_cs: u8,
    pub spi_hz: u32,
    /// Data/command select (A0)
    pub dc_pin: u8,
    /// Panel reset (RESN)
    pub reset_pin: u8,
    pub button_a: u8,
    pub button_b: u8,
    pub button_c: u8,
}

impl Default for GpioSettings {
    fn default() -> Self {
        Self {
            spi_bus: 0,
            spi_cs: 0,
            spi_hz: 1_000_000,
            dc_pin: 25,
            reset_pin: 24,
            button_a: 17,
            button_b: 27,
            button_c: 22,
        }
    }
}

#[cfg_attr(not(feature = "rpi"), allow(dead_code))]
impl GpioSettings {
    /// Buttons with their input pins
    pub fn buttons(&self) -> [(Button, u8); 3] {
        [
            (Button::A, self.button_a),
            (Button::B, self.button_b),
            (Button::C, self.button_c),
        ]
    }
}

/// Launcher configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    #[serde(rename = "match")]
    pub game: MatchDefaults,
    pub ticker: TickerSettings,
    pub input: InputSettings,
    pub prompts: PromptSettings,
    pub audio: AudioSettings,
    pub display: DisplaySettings,
    pub gpio: GpioSettings,
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `./ngrush.toml` is used if
    /// present, otherwise the embedded defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let (source, text) = match path {
            Some(path) => (path.to_path_buf(), read(path)?),
            None if Path::new(LOCAL_CONFIG).exists() => {
                (PathBuf::from(LOCAL_CONFIG), read(Path::new(LOCAL_CONFIG))?)
            }
            None => {
                debug!("No config file, using embedded defaults");
                return Self::embedded();
            }
        };

        let config = Self::parse(&text)?;
        info!("Loaded configuration from {}", source.display());
        Ok(config)
    }

    /// The built-in configuration
    pub fn embedded() -> Result<Self, AppError> {
        Self::parse(EMBEDDED_CONFIG)
    }

    /// Parse and validate TOML text
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no match could be played with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game
            .settings()
            .match_config()?
            .with_loss_threshold(self.game.loss_threshold)?;
        Ok(())
    }

    /// Reject hardware this binary was built without
    pub fn check_build(&self) -> Result<(), AppError> {
        if cfg!(feature = "rpi") {
            return Ok(());
        }
        if self.display.backend == DisplayKind::Sh1106 {
            return Err(AppError::Unsupported("the sh1106 display"));
        }
        if self.input.source == InputSource::Gpio {
            return Err(AppError::Unsupported("gpio input"));
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
