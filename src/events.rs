//! Events published by a session to its display collaborator.

use crate::games::tictactoe::{Mark, Move, Outcome};
use crate::resolver::TurnError;
use crate::stats::SessionStats;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One line of the move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveRecord {
    /// 1-based move number within the game.
    number: usize,
    /// Party id, e.g. `Player 1 (llama-3.3-70b)`.
    party: String,
    /// Mark placed.
    mark: Mark,
    /// Applied coordinate.
    mv: Move,
}

impl MoveRecord {
    /// Creates a history entry.
    pub fn new(number: usize, party: impl Into<String>, mark: Mark, mv: Move) -> Self {
        Self {
            number,
            party: party.into(),
            mark,
            mv,
        }
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}: {}", self.number, self.party, self.mv)
    }
}

/// Session state change.
///
/// Every turn event carries the grid, the outcome and the full move log of
/// the current game, so a display can redraw from any single event.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The board and history were cleared for a new game.
    GameReset {
        /// Empty grid.
        grid: String,
    },

    /// A move was applied.
    MoveApplied {
        /// History entry for the move.
        record: MoveRecord,
        /// Grid after the move.
        grid: String,
        /// Outcome after the move.
        outcome: Outcome,
        /// Moves of the current game, oldest first, including this one.
        history: Vec<MoveRecord>,
    },

    /// A turn produced no move; the board is unchanged.
    TurnRejected {
        /// Side that was asked.
        mark: Mark,
        /// Why nothing was applied.
        error: TurnError,
        /// Grid at the time of the attempt.
        grid: String,
        /// Current outcome.
        outcome: Outcome,
        /// Moves of the current game, oldest first.
        history: Vec<MoveRecord>,
    },

    /// The game reached a terminal outcome.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
        /// Label of the winning seat, `None` for a draw.
        winner: Option<String>,
        /// Statistics including this game.
        stats: SessionStats,
    },
}
