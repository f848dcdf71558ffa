use caret::KeyInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Formats seconds as `m:ss`
pub fn clock_label(seconds: u32) -> String {
    format!("{}:{:0>2}", seconds / 60, seconds % 60)
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent contains a character that matches the input
    fn is_char(&self, character: char) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed with CTRL as
    /// a modifier.
    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.has_mods(KeyModifiers::CONTROL) && self.is_press() && self.is_char(character)
    }

    /// Returns true if the keyevent opens the history page
    fn is_history(&self) -> bool {
        self.is_ctrl_press_char('r')
    }

    /// The key as the typing engine sees it
    fn key_input(&self) -> KeyInput;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_char(&self, character: char) -> bool {
        self.code == KeyCode::Char(character)
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }

    fn key_input(&self) -> KeyInput {
        // Some terminals send ^H for backspace
        if self.has_mods(KeyModifiers::CONTROL) && self.is_char('h') {
            return KeyInput::Backspace;
        }

        if self.has_mods(KeyModifiers::CONTROL) || self.has_mods(KeyModifiers::ALT) {
            return KeyInput::Control;
        }

        match self.code {
            KeyCode::Char(character) => KeyInput::from(character),
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Tab | KeyCode::BackTab => KeyInput::Control,
            _ => KeyInput::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_input() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers).key_input();

        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), KeyInput::Char('a'));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), KeyInput::Char('A'));
        assert_eq!(key(KeyCode::Char(' '), KeyModifiers::NONE), KeyInput::Space);
        assert_eq!(key(KeyCode::Backspace, KeyModifiers::NONE), KeyInput::Backspace);
        assert_eq!(key(KeyCode::Char('w'), KeyModifiers::CONTROL), KeyInput::Control);
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), KeyInput::Control);
        assert_eq!(key(KeyCode::Left, KeyModifiers::NONE), KeyInput::Other);
    }

    #[test]
    fn test_ctrl_h_is_backspace() {
        let ctrl_h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL);
        assert_eq!(ctrl_h.key_input(), KeyInput::Backspace);
        assert!(!ctrl_h.is_history());

        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(ctrl_r.is_history());
        assert_eq!(ctrl_r.key_input(), KeyInput::Control);
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label(5), "0:05");
        assert_eq!(clock_label(125), "2:05");
    }
}
