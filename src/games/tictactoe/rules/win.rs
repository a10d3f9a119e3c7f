//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark};
use tracing::instrument;

/// A line that can be completed for a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// Row index.
    Row(usize),
    /// Column index.
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// All lines of a `size` x `size` grid in detection order: rows,
    /// columns, main diagonal, anti-diagonal.
    pub fn all(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .chain([Line::MainDiagonal, Line::AntiDiagonal])
    }

    /// Coordinates covered by this line.
    pub fn cells(self, size: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..size).map(move |i| match self {
            Line::Row(r) => (r, i),
            Line::Column(c) => (i, c),
            Line::MainDiagonal => (i, i),
            Line::AntiDiagonal => (i, size - 1 - i),
        })
    }
}

/// Returns the first completed line and its owner, if any.
///
/// Under legal play at most one mark can own a completed line, so the
/// search order only matters for reproducibility.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Mark, Line)> {
    let size = board.size();
    Line::all(size).find_map(|line| {
        let mut cells = line.cells(size).map(|(r, c)| board.cell(r, c));
        let first = cells.next()??;
        let Cell::Occupied(mark) = first else {
            return None;
        };
        cells
            .all(|c| c == Some(first))
            .then_some((mark, line))
    })
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}
