//! Keyboard mapping for in-game input

use crate::game::MoveKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means while a game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Move(MoveKind),
    /// Show the help popup
    Help,
    /// Abandon the game and return to the menu
    Quit,
}

/// Map a key press to an in-game input, None for unbound keys
pub fn map_game_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match normalize_key(key.code) {
        KeyCode::Left => Some(GameInput::Move(MoveKind::Left)),
        KeyCode::Right => Some(GameInput::Move(MoveKind::Right)),
        KeyCode::Down => Some(GameInput::Move(MoveKind::SoftDrop)),
        KeyCode::Up => Some(GameInput::Move(MoveKind::Rotate)),
        KeyCode::Char(' ') => Some(GameInput::Move(MoveKind::HardDrop)),
        KeyCode::Char('s') => Some(GameInput::Move(MoveKind::AlterSpeed)),
        KeyCode::Char('h') => Some(GameInput::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_map_to_moves() {
        assert_eq!(
            map_game_key(press(KeyCode::Left)),
            Some(GameInput::Move(MoveKind::Left))
        );
        assert_eq!(
            map_game_key(press(KeyCode::Right)),
            Some(GameInput::Move(MoveKind::Right))
        );
        assert_eq!(
            map_game_key(press(KeyCode::Down)),
            Some(GameInput::Move(MoveKind::SoftDrop))
        );
        assert_eq!(
            map_game_key(press(KeyCode::Up)),
            Some(GameInput::Move(MoveKind::Rotate))
        );
    }

    #[test]
    fn test_space_is_hard_drop() {
        assert_eq!(
            map_game_key(press(KeyCode::Char(' '))),
            Some(GameInput::Move(MoveKind::HardDrop))
        );
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        assert_eq!(
            map_game_key(press(KeyCode::Char('S'))),
            Some(GameInput::Move(MoveKind::AlterSpeed))
        );
        assert_eq!(map_game_key(press(KeyCode::Char('Q'))), Some(GameInput::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_game_key(key), Some(GameInput::Quit));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(map_game_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_game_key(press(KeyCode::Tab)), None);
    }
}
