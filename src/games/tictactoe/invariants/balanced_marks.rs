//! Balanced marks invariant: X leads O by zero or one.

use super::super::{Board, Mark};
use super::Invariant;
use tracing::warn;

/// Invariant: `count(X) == count(O)` or `count(X) == count(O) + 1`.
///
/// X always moves first and turns alternate, so no other difference is
/// reachable.
pub struct BalancedMarks;

impl Invariant<Board> for BalancedMarks {
    fn holds(board: &Board) -> bool {
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);
        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_play_stays_balanced() {
        let mut board = Board::new();
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)] {
            board.apply_move(row, col).expect("legal move");
            assert!(BalancedMarks::holds(&board));
        }
        assert_eq!(board.count(Mark::X), 3);
        assert_eq!(board.count(Mark::O), 2);
    }
}
