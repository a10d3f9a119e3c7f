//! Plain-text rendering of session events.

use crate::events::{GameEvent, MoveRecord};
use crate::games::tictactoe::Mark;
use crate::stats::SessionStats;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, instrument};

/// Formats one event for the terminal.
pub fn format_event(event: &GameEvent) -> String {
    match event {
        GameEvent::GameReset { grid } => format!("New game\n{}", grid),
        GameEvent::MoveApplied { record, grid, .. } => {
            format!("{} places {} at {}\n{}", record.party(), record.mark(), record.mv(), grid)
        }
        GameEvent::TurnRejected { mark, error, .. } => {
            format!("Player {} ({}): {}", mark.seat_number(), mark, error)
        }
        GameEvent::GameOver {
            outcome,
            winner,
            stats,
        } => {
            let headline = match winner {
                Some(label) => format!("{} ({})", outcome, label),
                None => outcome.to_string(),
            };
            format!("{}\n\n{}", headline, format_stats(stats))
        }
    }
}

/// Formats statistics with the top three models.
pub fn format_stats(stats: &SessionStats) -> String {
    let mut out = stats.to_string();
    let leaders = stats.leaderboard(3);
    if !leaders.is_empty() {
        out.push_str("\n\nTop Models:");
        for (rank, (label, wins)) in leaders.iter().enumerate() {
            out.push_str(&format!("\n{}. {}: {} wins", rank + 1, label, wins));
        }
    }
    out
}

/// Formats the move history of a game.
pub fn format_history<'a>(records: impl IntoIterator<Item = &'a MoveRecord>) -> String {
    let lines: Vec<String> = records.into_iter().map(ToString::to_string).collect();
    format!("Move History:\n{}", lines.join("\n"))
}

/// Turns events into terminal text, keeping the current game's history.
#[derive(Debug, Default)]
pub struct EventPrinter {
    history: Vec<MoveRecord>,
}

impl EventPrinter {
    /// Creates a printer with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History of the current game as last reported.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Formats `event`; a finished game is preceded by its move history.
    pub fn handle(&mut self, event: &GameEvent) -> String {
        match event {
            GameEvent::GameReset { .. } => self.history.clear(),
            GameEvent::MoveApplied { history, .. } | GameEvent::TurnRejected { history, .. } => {
                self.history.clone_from(history);
            }
            GameEvent::GameOver { .. } => {
                return format!("{}\n\n{}", format_history(&self.history), format_event(event));
            }
        }
        format_event(event)
    }
}

/// Prints events until every sender is dropped.
#[instrument(skip(events))]
pub async fn print_events(mut events: UnboundedReceiver<GameEvent>) {
    let mut printer = EventPrinter::new();
    while let Some(event) = events.recv().await {
        println!("{}\n", printer.handle(&event));
    }
    debug!("Event stream closed");
}

/// Names the seat for `mark` the way the CLI shows it.
pub fn seat_title(mark: Mark, label: &str) -> String {
    format!("Player {} ({}) as {}", mark.seat_number(), label, mark)
}
