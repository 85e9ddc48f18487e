//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use strictly_trivia::{CATEGORY_COUNT, CLUES_PER_CATEGORY, Coordinate};

/// Moves the cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Coordinate, key: KeyCode) -> Coordinate {
    let Coordinate { category, clue } = cursor;

    match key {
        KeyCode::Left => Coordinate::new(category.saturating_sub(1), clue),
        KeyCode::Right => Coordinate::new((category + 1).min(CATEGORY_COUNT - 1), clue),
        KeyCode::Up => Coordinate::new(category, clue.saturating_sub(1)),
        KeyCode::Down => Coordinate::new(category, (clue + 1).min(CLUES_PER_CATEGORY - 1)),
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_board() {
        let start = Coordinate::new(2, 2);
        assert_eq!(move_cursor(start, KeyCode::Left), Coordinate::new(1, 2));
        assert_eq!(move_cursor(start, KeyCode::Right), Coordinate::new(3, 2));
        assert_eq!(move_cursor(start, KeyCode::Up), Coordinate::new(2, 1));
        assert_eq!(move_cursor(start, KeyCode::Down), Coordinate::new(2, 3));
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        let top_left = Coordinate::new(0, 0);
        assert_eq!(move_cursor(top_left, KeyCode::Left), top_left);
        assert_eq!(move_cursor(top_left, KeyCode::Up), top_left);

        let bottom_right = Coordinate::new(CATEGORY_COUNT - 1, CLUES_PER_CATEGORY - 1);
        assert_eq!(move_cursor(bottom_right, KeyCode::Right), bottom_right);
        assert_eq!(move_cursor(bottom_right, KeyCode::Down), bottom_right);
    }

    #[test]
    fn test_other_keys_leave_cursor() {
        let cursor = Coordinate::new(1, 4);
        assert_eq!(move_cursor(cursor, KeyCode::Char('x')), cursor);
    }
}
