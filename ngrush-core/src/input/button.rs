//! Button identities

/// One of the three launcher buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left: decrement / play again
    A,
    /// Middle: confirm / back to menu
    B,
    /// Right: increment / power off
    C,
}

impl Button {
    /// Map a keyboard character to a button (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Button::A),
            'b' => Some(Button::B),
            'c' => Some(Button::C),
            _ => None,
        }
    }

    pub fn label(self) -> char {
        match self {
            Button::A => 'A',
            Button::B => 'B',
            Button::C => 'C',
        }
    }
}
