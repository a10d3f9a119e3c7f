//! Turn parity invariant: the side to move follows from the mark counts.

use super::super::{Board, Mark};
use super::Invariant;

/// Invariant: X is to move exactly when both marks have been played
/// equally often.
pub struct TurnParity;

impl Invariant<Board> for TurnParity {
    fn holds(board: &Board) -> bool {
        let expected = if board.count(Mark::X) == board.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        };
        board.turn() == expected
    }

    fn description() -> &'static str {
        "Turn alternates X, O, X, O, ..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_follows_counts() {
        let mut board = Board::new();
        assert!(TurnParity::holds(&board));
        board.apply_move(1, 1).expect("legal move");
        assert!(TurnParity::holds(&board));
        assert_eq!(board.turn(), Mark::O);
    }

    #[test]
    fn test_rejected_move_keeps_parity() {
        let mut board = Board::new();
        board.apply_move(1, 1).expect("legal move");
        assert!(board.apply_move(1, 1).is_err());
        assert!(TurnParity::holds(&board));
    }
}
