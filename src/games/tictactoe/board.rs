//! Board engine: sole authority over grid mutation.
//!
//! The board is a plain grid-mutation primitive. It has no terminal flag
//! and will accept moves after a line has been completed; the resolver is
//! responsible for refusing to resolve turns once [`Board::evaluate`]
//! reports a terminal outcome.

use super::invariants::{BoardInvariants, InvariantSet};
use super::render;
use super::rules;
use super::types::{Cell, Mark, Move, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Side length of the canonical game.
pub const DEFAULT_SIZE: usize = 3;

/// Reasons the board refuses a move or a construction request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Row or column outside `[0, size - 1]`.
    #[display(
        "Invalid move: Position out of bounds. Please choose row and column between 0 and {}.",
        size - 1
    )]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Side length of the board.
        size: usize,
    },

    /// Target cell already holds a mark.
    #[display("Invalid move: Position ({row}, {col}) is already occupied.")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Board side length must be at least one.
    #[display("Invalid board size: {size}")]
    InvalidSize {
        /// Requested side length.
        size: usize,
    },

    /// Text could not be read back as a grid.
    #[display("Malformed grid: {_0}")]
    MalformedGrid(String),
}

impl std::error::Error for BoardError {}

/// Square grid of cells plus the mark whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    turn: Mark,
}

impl Board {
    /// Creates an empty 3x3 board with X to move.
    #[instrument]
    pub fn new() -> Self {
        info!("Initialized new Tic Tac Toe board");
        Self::empty(DEFAULT_SIZE)
    }

    /// Creates an empty `size` x `size` board with X to move.
    #[instrument]
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize { size });
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            turn: Mark::X,
        }
    }

    /// Rebuilds a board from its canonical rendering.
    ///
    /// The side to move is derived from the mark counts, so the text must
    /// describe a position reachable by alternating play.
    #[instrument(skip(text))]
    pub fn from_rendered(text: &str) -> Result<Self, BoardError> {
        let rows = render::parse(text)?;
        let size = rows.len();
        let board = Self {
            size,
            cells: rows.into_iter().flatten().collect(),
            turn: Mark::X,
        };
        let turn = if board.count(Mark::X) == board.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        };
        let board = Self { turn, ..board };

        BoardInvariants::check_all(&board).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            BoardError::MalformedGrid(descriptions)
        })?;

        Ok(board)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Mark that moves next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `(row, col)`, or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Places the current mark at `(row, col)` and passes the turn.
    ///
    /// On success exactly one cell changes, the turn flips, and the
    /// rendered grid is returned. On rejection nothing changes.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfBounds`] if either coordinate is outside the
    /// grid, [`BoardError::CellOccupied`] if the cell is taken.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<String, BoardError> {
        let Some(cell) = self.cell(row, col) else {
            let err = BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            };
            warn!(row, col, "{}", err);
            return Err(err);
        };

        if cell != Cell::Empty {
            let err = BoardError::CellOccupied { row, col };
            warn!("{}", err);
            return Err(err);
        }

        let index = row * self.size + col;
        self.cells[index] = Cell::Occupied(self.turn);
        info!(mark = %self.turn, row, col, "Mark placed");
        self.turn = self.turn.opponent();

        debug_assert!(
            BoardInvariants::check_all(self).is_ok(),
            "board invariants violated after move"
        );

        Ok(self.render())
    }

    /// Empty cells in row-major order.
    #[instrument(skip(self))]
    pub fn legal_moves(&self) -> Vec<Move> {
        let moves: Vec<Move> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
            .collect();
        debug!(count = moves.len(), "Computed legal moves");
        moves
    }

    /// Derives the outcome from the grid.
    ///
    /// Lines are checked rows first, then columns, then the main and anti
    /// diagonals. A completed line wins; otherwise a full grid is a draw.
    #[instrument(skip(self))]
    pub fn evaluate(&self) -> Outcome {
        if let Some((mark, line)) = rules::winning_line(self) {
            debug!(%mark, ?line, "Winning line found");
            return Outcome::Win(mark);
        }
        if rules::is_full(self) {
            return Outcome::Draw;
        }
        Outcome::InProgress
    }

    /// Restores the empty grid with X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.turn = Mark::X;
        info!("Board reset to initial state");
    }

    /// Canonical text rendering used for display and prompts.
    pub fn render(&self) -> String {
        render::render(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
