//! Post-game choice

use crate::input::Button;
use crate::state::Event;

/// What to do after a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostGameAction {
    /// Replay with the same settings
    PlayAgain,
    /// Back to the settings menu
    Menu,
    /// Shut down
    PowerOff,
}

impl PostGameAction {
    /// Hint shown under the result
    pub const HINT: &'static str = "A:Again B:Menu C:Off";

    pub fn from_button(button: Button) -> Self {
        match button {
            Button::A => PostGameAction::PlayAgain,
            Button::B => PostGameAction::Menu,
            Button::C => PostGameAction::PowerOff,
        }
    }

    /// Launcher event for this choice
    pub fn event(self) -> Event {
        match self {
            PostGameAction::PlayAgain => Event::PlayAgain,
            PostGameAction::Menu => Event::BackToMenu,
            PostGameAction::PowerOff => Event::PowerOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;

    #[test]
    fn test_button_mapping() {
        assert_eq!(PostGameAction::from_button(Button::A), PostGameAction::PlayAgain);
        assert_eq!(PostGameAction::from_button(Button::B), PostGameAction::Menu);
        assert_eq!(PostGameAction::from_button(Button::C), PostGameAction::PowerOff);
    }

    #[test]
    fn test_actions_drive_launcher() {
        let state = State::GameOver;
        assert_eq!(
            state.transition(PostGameAction::from_button(Button::A).event()),
            State::Playing
        );
        assert_eq!(
            state.transition(PostGameAction::from_button(Button::B).event()),
            State::Menu
        );
        assert_eq!(
            state.transition(PostGameAction::from_button(Button::C).event()),
            State::Off
        );
    }
}
