use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Command;
use crate::point::Direction;

/// Maps a key press to a game command.
///
/// Arrows steer (up rotates), Ctrl-C, Esc and `q` quit, `p` pauses.
/// Releases and unbound keys map to nothing.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_steer_the_piece() {
        assert_eq!(command_for(press(KeyCode::Up)), Some(Command::Rotate));
        assert_eq!(command_for(press(KeyCode::Left)), Some(Command::Move(Direction::Left)));
        assert_eq!(command_for(press(KeyCode::Right)), Some(Command::Move(Direction::Right)));
        assert_eq!(command_for(press(KeyCode::Down)), Some(Command::Move(Direction::Down)));
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(key), Some(Command::Quit));
        assert_eq!(command_for(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(command_for(key), None);
    }
}
