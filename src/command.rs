use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Turn(Direction),
    Pause,
    Restart,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        // Shift is allowed so that letter keys work in either case
        if !(KeyModifiers::NONE | KeyModifiers::SHIFT).contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'W') | KeyCode::Up => Some(Command::Turn(Direction::North)),
            KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Command::Turn(Direction::South)),
            KeyCode::Char('a' | 'A') | KeyCode::Left => Some(Command::Turn(Direction::West)),
            KeyCode::Char('d' | 'D') | KeyCode::Right => Some(Command::Turn(Direction::East)),
            KeyCode::Char(' ' | 'p' | 'P') => Some(Command::Pause),
            KeyCode::Char('r' | 'R') => Some(Command::Restart),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}
