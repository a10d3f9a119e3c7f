//! Property tests for the board engine.

use agent_tictactoe::{Board, Cell, Mark, Outcome, parse_rendered, rules::is_full};
use proptest::prelude::*;

/// Coordinates in 0..4, so some fall outside a 3x3 board.
fn coordinates() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..4, 0usize..4), 0..20)
}

/// Whether `mark` fills any row, column or diagonal of a 3x3 board.
fn has_line(board: &Board, mark: Mark) -> bool {
    let filled = |r: usize, c: usize| board.cell(r, c) == Some(Cell::Occupied(mark));
    (0..3).any(|i| (0..3).all(|j| filled(i, j)))
        || (0..3).any(|j| (0..3).all(|i| filled(i, j)))
        || (0..3).all(|i| filled(i, i))
        || (0..3).all(|i| filled(i, 2 - i))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every cell is either occupied or offered as a legal move.
    #[test]
    fn legal_moves_partition_the_grid(moves in coordinates()) {
        let mut board = Board::new();
        for (row, col) in moves {
            let _ = board.apply_move(row, col);
            prop_assert_eq!(board.legal_moves().len() + board.occupied(), 9);
        }
    }

    /// Accepted moves alternate X, O, X, ... and rejected ones change nothing.
    #[test]
    fn accepted_moves_alternate(moves in coordinates()) {
        let mut board = Board::new();
        let mut expected = Mark::X;
        for (row, col) in moves {
            let before = board.clone();
            match board.apply_move(row, col) {
                Ok(grid) => {
                    prop_assert_eq!(board.cell(row, col), Some(Cell::Occupied(expected)));
                    prop_assert_eq!(grid, board.render());
                    expected = expected.opponent();
                }
                Err(_) => prop_assert_eq!(&board, &before),
            }
            prop_assert_eq!(board.turn(), expected);
        }
    }

    /// Outcome matches a direct scan of the grid.
    #[test]
    fn evaluate_matches_grid(moves in coordinates()) {
        let mut board = Board::new();
        for (row, col) in moves {
            // Stop at the first terminal state, as a session would.
            if board.evaluate().is_terminal() {
                break;
            }
            let _ = board.apply_move(row, col);
        }

        let x = has_line(&board, Mark::X);
        let o = has_line(&board, Mark::O);
        prop_assert!(!(x && o));
        let expected = if x {
            Outcome::Win(Mark::X)
        } else if o {
            Outcome::Win(Mark::O)
        } else if is_full(&board) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };
        prop_assert_eq!(board.evaluate(), expected);
    }

    /// The rendered grid reads back as the same cells.
    #[test]
    fn rendering_recovers_cells(moves in coordinates()) {
        let mut board = Board::new();
        for (row, col) in moves {
            let _ = board.apply_move(row, col);
        }
        let rows = parse_rendered(&board.render()).expect("canonical rendering parses");
        let cells: Vec<Cell> = rows.into_iter().flatten().collect();
        prop_assert_eq!(cells.as_slice(), board.cells());
        prop_assert_eq!(Board::from_rendered(&board.render()).expect("rebuilds"), board);
    }
}
