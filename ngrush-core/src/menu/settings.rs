//! Settings menu
//!
//! Pages are shown in order: round speed, player count, lives. `A` steps
//! the value down, `C` steps it up and `B` confirms the page. Speed wraps
//! around; the counts stop at their bounds.

use core::fmt::Write;

use heapless::String;

use crate::config::{ConfigError, MatchConfig, SpeedPreset};
use crate::input::Button;

/// Most players the menu offers
pub const MAX_MENU_PLAYERS: u8 = 10;

/// Most lives the menu offers
pub const MAX_MENU_LIVES: u8 = 9;

/// Settings chosen for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub speed: SpeedPreset,
    pub players: u8,
    pub lives: u8,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            speed: SpeedPreset::Medium,
            players: 2,
            lives: 3,
        }
    }
}

impl MatchSettings {
    /// Validated match configuration for these settings
    pub fn match_config(&self) -> Result<MatchConfig, ConfigError> {
        MatchConfig::new(self.players as usize, self.speed.base_deadline(), self.lives)
    }
}

/// Menu page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Speed,
    Players,
    Lives,
}

/// Result of a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    /// Still in the menu; redraw
    Continue,
    /// Last page confirmed
    Done(MatchSettings),
}

/// Three-page settings menu
#[derive(Debug, Clone)]
pub struct SettingsMenu {
    page: MenuPage,
    settings: MatchSettings,
}

impl Default for SettingsMenu {
    fn default() -> Self {
        Self::new(MatchSettings::default())
    }
}

impl SettingsMenu {
    /// Start on the speed page with `initial` preselected
    pub fn new(initial: MatchSettings) -> Self {
        let settings = MatchSettings {
            speed: initial.speed,
            players: initial.players.clamp(1, MAX_MENU_PLAYERS),
            lives: initial.lives.clamp(1, MAX_MENU_LIVES),
        };
        Self {
            page: MenuPage::Speed,
            settings,
        }
    }

    pub fn page(&self) -> MenuPage {
        self.page
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Apply a button press
    pub fn handle(&mut self, button: Button) -> MenuStep {
        let s = &mut self.settings;

        match (self.page, button) {
            (MenuPage::Speed, Button::A) => s.speed = s.speed.prev(),
            (MenuPage::Speed, Button::C) => s.speed = s.speed.next(),
            (MenuPage::Speed, Button::B) => self.page = MenuPage::Players,

            (MenuPage::Players, Button::A) => s.players = s.players.saturating_sub(1).max(1),
            (MenuPage::Players, Button::C) => {
                s.players = (s.players + 1).min(MAX_MENU_PLAYERS)
            }
            (MenuPage::Players, Button::B) => self.page = MenuPage::Lives,

            (MenuPage::Lives, Button::A) => s.lives = s.lives.saturating_sub(1).max(1),
            (MenuPage::Lives, Button::C) => s.lives = (s.lives + 1).min(MAX_MENU_LIVES),
            (MenuPage::Lives, Button::B) => {
                // Ready for the next visit
                self.page = MenuPage::Speed;
                return MenuStep::Done(self.settings);
            }
        }

        MenuStep::Continue
    }

    /// Page title
    pub fn title(&self) -> &'static str {
        match self.page {
            MenuPage::Speed => "Round Speed",
            MenuPage::Players => "Players",
            MenuPage::Lives => "Lives",
        }
    }

    /// Current value of the page
    pub fn value(&self) -> String<16> {
        let mut out = String::new();
        let _ = match self.page {
            MenuPage::Speed => out.push_str(self.settings.speed.label()),
            MenuPage::Players => write!(out, "{}", self.settings.players).map_err(|_| ()),
            MenuPage::Lives => write!(out, "{}", self.settings.lives).map_err(|_| ()),
        };
        out
    }
}
