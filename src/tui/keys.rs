//! Key bindings.
//!
//! | key                 | effect                         |
//! |---------------------|--------------------------------|
//! | arrows / `h j k l`  | move the cursor                |
//! | `Enter` / `Space`   | click the square under cursor  |
//! | `r`                 | resign                         |
//! | `d`                 | offer a draw                   |
//! | `n`                 | new game                       |
//! | `1` `2` `3`         | beginner / intermediate / advanced |
//! | `q` / `Esc` / `^C`  | quit                           |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Square;
use crate::game::{Action, FrontendEvent, Mode};

pub const HELP: &str =
    "arrows/hjkl move  enter select  r resign  d draw  n new game  1/2/3 mode  q quit";

/// Maps a key press to an event, moving `cursor` for navigation keys.
pub fn map_key(key: KeyEvent, cursor: &mut Square) -> Option<FrontendEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(FrontendEvent::Quit);
    }

    let (rank_delta, file_delta) = match key.code {
        KeyCode::Up | KeyCode::Char('k') => (1, 0),
        KeyCode::Down | KeyCode::Char('j') => (-1, 0),
        KeyCode::Left | KeyCode::Char('h') => (0, -1),
        KeyCode::Right | KeyCode::Char('l') => (0, 1),
        code => return action_for(code, *cursor),
    };
    if let Some(moved) = cursor.offset(rank_delta, file_delta) {
        *cursor = moved;
    }
    None
}

fn action_for(code: KeyCode, cursor: Square) -> Option<FrontendEvent> {
    let action = match code {
        KeyCode::Enter | KeyCode::Char(' ') => Action::ClickSquare(cursor),
        KeyCode::Char('r') => Action::Resign,
        KeyCode::Char('d') => Action::OfferDraw,
        KeyCode::Char('n') => Action::NewGame,
        KeyCode::Char('1') => Action::SelectMode(Mode::Beginner),
        KeyCode::Char('2') => Action::SelectMode(Mode::Intermediate),
        KeyCode::Char('3') => Action::SelectMode(Mode::Advanced),
        KeyCode::Char('q') | KeyCode::Esc => return Some(FrontendEvent::Quit),
        _ => return None,
    };
    Some(FrontendEvent::Action(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sq(algebraic: &str) -> Square {
        Square::from_algebraic(algebraic).unwrap()
    }

    #[test]
    fn test_cursor_moves_and_stops_at_edges() {
        let mut cursor = sq("e2");
        assert_eq!(map_key(press(KeyCode::Up), &mut cursor), None);
        assert_eq!(cursor, sq("e3"));
        map_key(press(KeyCode::Char('h')), &mut cursor);
        assert_eq!(cursor, sq("d3"));

        let mut corner = sq("a1");
        map_key(press(KeyCode::Left), &mut corner);
        map_key(press(KeyCode::Char('j')), &mut corner);
        assert_eq!(corner, sq("a1"));
    }

    #[test]
    fn test_enter_clicks_cursor_square() {
        let mut cursor = sq("g1");
        assert_eq!(
            map_key(press(KeyCode::Enter), &mut cursor),
            Some(FrontendEvent::Action(Action::ClickSquare(sq("g1"))))
        );
    }

    #[test]
    fn test_command_keys() {
        let mut cursor = sq("a1");
        assert_eq!(
            map_key(press(KeyCode::Char('3')), &mut cursor),
            Some(FrontendEvent::Action(Action::SelectMode(Mode::Advanced)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('r')), &mut cursor),
            Some(FrontendEvent::Action(Action::Resign))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('q')), &mut cursor),
            Some(FrontendEvent::Quit)
        );
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &mut cursor
            ),
            Some(FrontendEvent::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x')), &mut cursor), None);
    }
}
