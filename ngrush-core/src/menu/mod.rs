//! Launcher menus
//!
//! A three-page settings menu (speed, players, lives) and the post-game
//! choice, both driven by the three buttons.

pub mod post_game;
pub mod settings;

pub use post_game::PostGameAction;
pub use settings::{MatchSettings, MenuPage, MenuStep, SettingsMenu, MAX_MENU_LIVES, MAX_MENU_PLAYERS};
