use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;
use crate::modes::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Steer the snake on the next tick
    Steer(Direction),
    /// Append a character to the player name
    NameChar(char),
    /// Delete the last character of the player name
    Backspace,
    /// Accept the player name and start a new run
    Confirm,
    Quit,
    None,
}

/// Translates key presses into actions for the current mode
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, mode: Mode) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match mode {
            Mode::Playing => self.playing_key(key),
            Mode::NameEntry => self.name_entry_key(key),
        }
    }

    fn playing_key(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    // Letters are name input here, so only Esc quits
    fn name_entry_key(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => KeyAction::NameChar(c),
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), Mode::Playing),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down), Mode::Playing),
            KeyAction::Steer(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left), Mode::Playing),
            KeyAction::Steer(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right), Mode::Playing),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w')), Mode::Playing),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a')), Mode::Playing),
            KeyAction::Steer(Direction::Left)
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper, Mode::Playing),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_quit_keys_while_playing() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('q')), Mode::Playing),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Esc), Mode::Playing),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_name_entry_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('q')), Mode::NameEntry),
            KeyAction::NameChar('q')
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('7')), Mode::NameEntry),
            KeyAction::NameChar('7')
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter), Mode::NameEntry),
            KeyAction::Confirm
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Backspace), Mode::NameEntry),
            KeyAction::Backspace
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Esc), Mode::NameEntry),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_arrows_ignored_during_name_entry() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), Mode::NameEntry),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('-')), Mode::NameEntry),
            KeyAction::None
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x')), Mode::Playing),
            KeyAction::None
        );
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(handler.handle_key_event(ctrl_c, Mode::Playing), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(ctrl_c, Mode::NameEntry), KeyAction::Quit);
    }
}
