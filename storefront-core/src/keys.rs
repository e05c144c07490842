//! Keyboard key classification shared by the widgets.

/// The keys the widgets react to, parsed from `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Classify a DOM key value, accepting the legacy IE/Edge spellings.
    #[must_use]
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => Self::Other,
        }
    }

    /// Enter and Space activate buttons and button-like controls.
    #[must_use]
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}
