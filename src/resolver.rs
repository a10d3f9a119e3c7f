//! Move resolution: drives exactly one turn from prompt to applied move.
//!
//! The resolver borrows the board mutably for the whole turn, including
//! the agent call, so no other writer can touch the grid until the turn
//! is fully processed.

use crate::agent::Agent;
use crate::games::tictactoe::{Board, BoardError, Mark, Move, Outcome};
use crate::prompt::{extract_coordinates, to_move, turn_prompt};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Result of a successfully resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TurnResult {
    /// Mark that moved.
    mark: Mark,
    /// Applied coordinate.
    mv: Move,
    /// Rendered grid after the move.
    grid_text: String,
    /// Outcome computed right after the move.
    outcome: Outcome,
}

impl TurnResult {
    /// Row of the applied move.
    pub fn row(&self) -> usize {
        self.mv.row
    }

    /// Column of the applied move.
    pub fn col(&self) -> usize {
        self.mv.col
    }
}

/// Why a turn did not produce a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The board is already terminal; nothing was asked or applied.
    #[display("Game is already over: {_0}")]
    GameAlreadyOver(Outcome),

    /// The agent could not be reached or timed out.
    #[display("Agent {agent} unavailable: {message}")]
    AgentUnavailable {
        /// Agent display name.
        agent: String,
        /// Transport failure description.
        message: String,
    },

    /// The reply did not name a legal move.
    #[display("Invalid move proposed: {raw_text:?}")]
    InvalidMoveProposed {
        /// Reply text exactly as received.
        raw_text: String,
    },

    /// The board rejected a move that had already been validated.
    #[display("Board rejected validated move {mv}: {reason}")]
    ConcurrentMutationConflict {
        /// The validated move.
        mv: Move,
        /// The board's rejection.
        reason: BoardError,
    },
}

impl std::error::Error for TurnError {}

impl TurnError {
    /// True for errors the caller may answer by re-prompting.
    ///
    /// `GameAlreadyOver` and `ConcurrentMutationConflict` indicate misuse
    /// or a logic defect and should be surfaced instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TurnError::AgentUnavailable { .. } | TurnError::InvalidMoveProposed { .. }
        )
    }
}

/// Resolves one turn for the side to move.
///
/// Refuses terminal boards, prompts `agent` with the grid and legal moves,
/// parses the first two integers of the reply and applies them if they
/// name a legal move. The turn only advances on `Ok`.
///
/// # Errors
///
/// See [`TurnError`].
#[instrument(skip(board, agent), fields(agent = %agent.name(), turn = %board.turn()))]
pub async fn resolve_turn(
    board: &mut Board,
    agent: &mut dyn Agent,
    timeout: Option<Duration>,
) -> Result<TurnResult, TurnError> {
    let outcome = board.evaluate();
    if outcome.is_terminal() {
        warn!(%outcome, "Refusing to resolve turn on finished game");
        return Err(TurnError::GameAlreadyOver(outcome));
    }

    let legal = board.legal_moves();
    if legal.is_empty() {
        warn!("No legal moves left");
        return Err(TurnError::GameAlreadyOver(Outcome::Draw));
    }

    let prompt = turn_prompt(board, &legal);
    let reply = ask(agent, &prompt, timeout).await?;

    let Some(mv) = extract_coordinates(&reply)
        .and_then(to_move)
        .filter(|mv| legal.contains(mv))
    else {
        warn!(reply = %reply, "Agent proposed an invalid move");
        return Err(TurnError::InvalidMoveProposed { raw_text: reply });
    };

    let mark = board.turn();
    let grid_text = board.apply_move(mv.row, mv.col).map_err(|reason| {
        error!(%mv, %reason, "Board rejected a validated move");
        TurnError::ConcurrentMutationConflict { mv, reason }
    })?;

    let outcome = board.evaluate();
    info!(%mark, %mv, %outcome, "Turn resolved");

    Ok(TurnResult {
        mark,
        mv,
        grid_text,
        outcome,
    })
}

/// Sends the prompt, mapping transport failures and timeouts alike.
async fn ask(
    agent: &mut dyn Agent,
    prompt: &str,
    timeout: Option<Duration>,
) -> Result<String, TurnError> {
    let name = agent.name().to_string();
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, agent.propose(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(agent = %name, ?limit, "Agent timed out");
                return Err(TurnError::AgentUnavailable {
                    agent: name,
                    message: format!("no reply within {}s", limit.as_secs_f32()),
                });
            }
        },
        None => agent.propose(prompt).await,
    };

    result.map_err(|e| TurnError::AgentUnavailable {
        agent: name,
        message: e.message,
    })
}
