//! A match between two agent seats: board, history, statistics and the
//! turn loop.

use crate::agent::Agent;
use crate::events::{GameEvent, MoveRecord};
use crate::games::tictactoe::{Board, Mark, Outcome};
use crate::resolver::{TurnError, TurnResult, resolve_turn};
use crate::stats::SessionStats;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// An agent plus the label it is displayed and ranked under.
pub struct Seat {
    agent: Box<dyn Agent>,
    label: String,
}

impl Seat {
    /// Seats `agent` under `label` (usually the model preset key).
    pub fn new(agent: impl Agent + 'static, label: impl Into<String>) -> Self {
        Self {
            agent: Box::new(agent),
            label: label.into(),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Agent name.
    pub fn name(&self) -> &str {
        self.agent.name()
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat")
            .field("agent", &self.agent.name())
            .field("label", &self.label)
            .finish()
    }
}

/// Shared pause flag, checked only between turns.
#[derive(Debug, Clone, Default)]
pub struct PauseHandle(Arc<AtomicBool>);

impl PauseHandle {
    /// Requests a pause at the next turn boundary.
    pub fn pause(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clears a pause request.
    pub fn resume(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Handles an interrupt: the first one requests a pause, later ones
    /// return `true` so the caller can stop without waiting for the turn.
    pub fn interrupt(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }

    /// True while a pause is requested.
    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How [`GameSession::run`] stopped without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The game reached a terminal outcome.
    Finished(Outcome),
    /// A pause was requested; the game can be resumed with another `run`.
    Paused,
}

/// Why [`GameSession::run`] gave up.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The side to move failed every allowed attempt.
    #[display("{mark} produced no valid move in {attempts} attempts: {last}")]
    Stalled {
        /// Side to move.
        mark: Mark,
        /// Attempts made.
        attempts: u32,
        /// Last failure.
        last: TurnError,
    },

    /// A failure that re-prompting cannot fix.
    #[display("{_0}")]
    Turn(TurnError),
}

impl std::error::Error for SessionError {}

/// Two seats playing a series of games on one board.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    seats: [Seat; 2],
    history: Vec<MoveRecord>,
    stats: SessionStats,
    pause: PauseHandle,
    turn_timeout: Option<Duration>,
    events: Option<UnboundedSender<GameEvent>>,
}

fn seat_index(mark: Mark) -> usize {
    match mark {
        Mark::X => 0,
        Mark::O => 1,
    }
}

impl GameSession {
    /// Creates a session with `x` and `o` seated and an empty board.
    #[instrument(skip(x, o), fields(x = %x.label, o = %o.label))]
    pub fn new(x: Seat, o: Seat) -> Self {
        info!("Creating game session");
        Self {
            board: Board::new(),
            seats: [x, o],
            history: Vec::new(),
            stats: SessionStats::new(),
            pause: PauseHandle::default(),
            turn_timeout: None,
            events: None,
        }
    }

    /// Limits how long each agent may take to reply.
    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Publishes [`GameEvent`]s to `sender`.
    pub fn with_events(mut self, sender: UnboundedSender<GameEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves applied in the current game, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Statistics across games.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Seat playing `mark`.
    pub fn seat(&self, mark: Mark) -> &Seat {
        &self.seats[seat_index(mark)]
    }

    /// Handle for pausing from another task.
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    /// Resolves one turn for the side to move.
    ///
    /// On success the move is appended to the history; a terminal result
    /// also updates the statistics. Every result is published as an event.
    ///
    /// # Errors
    ///
    /// Returns the resolver's [`TurnError`]; the board is unchanged.
    #[instrument(skip(self), fields(turn = %self.board.turn(), number = self.history.len() + 1))]
    pub async fn play_turn(&mut self) -> Result<TurnResult, TurnError> {
        let mark = self.board.turn();
        let seat = &mut self.seats[seat_index(mark)];

        let result = match resolve_turn(&mut self.board, seat.agent.as_mut(), self.turn_timeout).await
        {
            Ok(result) => result,
            Err(error) => {
                warn!(%mark, %error, "Turn rejected");
                self.emit(GameEvent::TurnRejected {
                    mark,
                    error: error.clone(),
                    grid: self.board.render(),
                    outcome: self.board.evaluate(),
                    history: self.history.clone(),
                });
                return Err(error);
            }
        };

        let record = MoveRecord::new(
            self.history.len() + 1,
            format!("Player {} ({})", mark.seat_number(), seat.label),
            mark,
            *result.mv(),
        );
        info!(%record, "Move recorded");
        self.history.push(record.clone());

        let outcome = *result.outcome();
        self.emit(GameEvent::MoveApplied {
            record,
            grid: result.grid_text().clone(),
            outcome,
            history: self.history.clone(),
        });

        if outcome.is_terminal() {
            let winner = outcome
                .winner()
                .map(|mark| self.seats[seat_index(mark)].label.clone());
            self.stats.record(outcome, winner.as_deref());
            info!(%outcome, ?winner, "Game over");
            self.emit(GameEvent::GameOver {
                outcome,
                winner,
                stats: self.stats.clone(),
            });
        }

        Ok(result)
    }

    /// Plays turns until the game ends or a pause is requested.
    ///
    /// Recoverable failures re-prompt the same side up to
    /// `max_attempts_per_turn` times (at least once).
    ///
    /// # Errors
    ///
    /// [`SessionError::Stalled`] when the attempts run out,
    /// [`SessionError::Turn`] for failures re-prompting cannot fix.
    #[instrument(skip(self))]
    pub async fn run(&mut self, max_attempts_per_turn: u32) -> Result<RunStatus, SessionError> {
        let max_attempts = max_attempts_per_turn.max(1);
        loop {
            let outcome = self.board.evaluate();
            if outcome.is_terminal() {
                return Ok(RunStatus::Finished(outcome));
            }
            if self.pause.is_paused() {
                info!("Session paused");
                return Ok(RunStatus::Paused);
            }

            let mark = self.board.turn();
            let mut attempts = 0;
            loop {
                attempts += 1;
                match self.play_turn().await {
                    Ok(_) => break,
                    Err(error) if !error.is_recoverable() => {
                        return Err(SessionError::Turn(error));
                    }
                    Err(last) if attempts >= max_attempts => {
                        warn!(%mark, attempts, "Giving up on turn");
                        return Err(SessionError::Stalled {
                            mark,
                            attempts,
                            last,
                        });
                    }
                    Err(_) => debug!(%mark, attempts, "Re-prompting"),
                }
            }
        }
    }

    /// Clears the board and history and publishes [`GameEvent::GameReset`];
    /// statistics are kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board.reset();
        self.history.clear();
        info!("New game started");
        self.emit(GameEvent::GameReset {
            grid: self.board.render(),
        });
    }

    /// Clears the statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn emit(&self, event: GameEvent) {
        if let Some(sender) = &self.events {
            if sender.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ScriptedAgent;

    fn session(x: &[&str], o: &[&str]) -> GameSession {
        GameSession::new(
            Seat::new(ScriptedAgent::new("Player X", x.to_vec()), "alpha"),
            Seat::new(ScriptedAgent::new("Player O", o.to_vec()), "beta"),
        )
    }

    #[tokio::test]
    async fn test_play_turn_records_history() {
        let mut session = session(&["1 1"], &["0 0"]);
        session.play_turn().await.expect("X moves");
        session.play_turn().await.expect("O moves");

        let parties: Vec<_> = session.history().iter().map(|r| r.party().as_str()).collect();
        assert_eq!(parties, vec!["Player 1 (alpha)", "Player 2 (beta)"]);
        assert_eq!(*session.history()[1].number(), 2);
    }

    #[tokio::test]
    async fn test_run_to_win_updates_stats_once() {
        let mut session = session(&["0 0", "1 1", "2 2"], &["0 1", "0 2"]);
        let status = session.run(1).await.expect("game finishes");

        assert_eq!(status, RunStatus::Finished(Outcome::Win(Mark::X)));
        assert_eq!(*session.stats().x_wins(), 1);
        assert_eq!(session.stats().leaderboard(3), vec![("alpha", 1)]);

        assert_eq!(
            session.run(1).await.expect("already finished"),
            RunStatus::Finished(Outcome::Win(Mark::X))
        );
        assert_eq!(*session.stats().total_games(), 1);
    }

    #[tokio::test]
    async fn test_run_retries_then_stalls() {
        let mut session = session(&["nope", "9 9", "still nope"], &[]);
        let err = session.run(3).await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::Stalled { mark: Mark::X, attempts: 3, .. }
        ));
        assert_eq!(session.board().occupied(), 0);
    }

    #[tokio::test]
    async fn test_pause_stops_at_turn_boundary() {
        let mut session = session(&["1 1"], &["0 0"]);
        let pause = session.pause_handle();
        pause.pause();
        assert_eq!(session.run(1).await.expect("paused"), RunStatus::Paused);
        assert!(session.history().is_empty());
        pause.resume();
        assert!(!session.pause_handle().is_paused());
    }

    #[test]
    fn test_second_interrupt_asks_to_stop() {
        let pause = PauseHandle::default();
        assert!(!pause.interrupt());
        assert!(pause.is_paused());
        assert!(pause.interrupt());
        assert!(pause.interrupt());
    }

    #[tokio::test]
    async fn test_new_game_keeps_stats() {
        let mut session = session(&["0 0", "1 1", "2 2"], &["0 1", "0 2"]);
        session.run(1).await.expect("finishes");
        session.new_game();

        assert!(session.history().is_empty());
        assert_eq!(session.board().evaluate(), Outcome::InProgress);
        assert_eq!(*session.stats().total_games(), 1);

        session.reset_stats();
        assert_eq!(*session.stats().total_games(), 0);
    }
}
