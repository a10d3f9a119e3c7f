//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Cell};
use super::win::winning_line;
use tracing::{info, instrument};

/// Checks if every cell is occupied.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    let full = board.cells().iter().all(|c| *c != Cell::Empty);
    if full {
        info!("Board is full");
    }
    full
}

/// A full board with no completed line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winning_line(board).is_none()
}
