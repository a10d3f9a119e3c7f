//! Session statistics: win counters, per-model wins and the current streak.

use crate::games::tictactoe::{Mark, Outcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Consecutive wins by the same mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Streak {
    /// Mark on the streak, `None` after a draw or reset.
    mark: Option<Mark>,
    /// Number of consecutive wins.
    count: u32,
}

/// Additive counters fed by terminal game events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionStats {
    total_games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    /// Wins per seat label (model preset key).
    model_wins: BTreeMap<String, u32>,
    streak: Streak,
}

impl SessionStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished game. `winner_label` is the label of the winning
    /// seat and is ignored for draws. In-progress outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome, winner_label: Option<&str>) {
        match outcome {
            Outcome::InProgress => return,
            Outcome::Win(mark) => {
                match mark {
                    Mark::X => self.x_wins += 1,
                    Mark::O => self.o_wins += 1,
                }
                if let Some(label) = winner_label {
                    *self.model_wins.entry(label.to_string()).or_default() += 1;
                }
                if self.streak.mark == Some(mark) {
                    self.streak.count += 1;
                } else {
                    self.streak = Streak {
                        mark: Some(mark),
                        count: 1,
                    };
                }
                info!(%mark, winner = ?winner_label, streak = self.streak.count, "Win recorded");
            }
            Outcome::Draw => {
                self.draws += 1;
                self.streak = Streak::default();
                info!("Draw recorded");
            }
        }
        self.total_games += 1;
    }

    /// Clears every counter.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Statistics reset");
    }

    /// Share of games won by `mark`, in percent.
    pub fn win_percentage(&self, mark: Mark) -> f64 {
        let wins = match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        };
        percentage(wins, self.total_games)
    }

    /// Share of drawn games, in percent.
    pub fn draw_percentage(&self) -> f64 {
        percentage(self.draws, self.total_games)
    }

    /// Top `n` labels by wins; ties are ordered by label.
    pub fn leaderboard(&self, n: usize) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .model_wins
            .iter()
            .map(|(label, wins)| (label.as_str(), *wins))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(total)
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games Played: {}", self.total_games)?;
        writeln!(
            f,
            "X Wins: {} ({:.1}%)",
            self.x_wins,
            self.win_percentage(Mark::X)
        )?;
        writeln!(
            f,
            "O Wins: {} ({:.1}%)",
            self.o_wins,
            self.win_percentage(Mark::O)
        )?;
        write!(f, "Draws: {} ({:.1}%)", self.draws, self.draw_percentage())?;
        if let (Some(mark), count) = (self.streak.mark, self.streak.count) {
            if count > 1 {
                write!(f, "\nCurrent Streak: {} x{}", mark, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_percentages() {
        let mut stats = SessionStats::new();
        stats.record(Outcome::Win(Mark::X), Some("llama-3.3-70b"));
        stats.record(Outcome::Draw, None);
        stats.record(Outcome::Win(Mark::O), Some("llama-3.1-8b"));
        stats.record(Outcome::Win(Mark::X), Some("llama-3.3-70b"));

        assert_eq!(*stats.total_games(), 4);
        assert_eq!(*stats.x_wins(), 2);
        assert_eq!(*stats.o_wins(), 1);
        assert_eq!(*stats.draws(), 1);
        assert!((stats.win_percentage(Mark::X) - 50.0).abs() < f64::EPSILON);
        assert!((stats.draw_percentage() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_in_progress_is_ignored() {
        let mut stats = SessionStats::new();
        stats.record(Outcome::InProgress, Some("x"));
        assert_eq!(stats, SessionStats::new());
        assert_eq!(stats.win_percentage(Mark::O), 0.0);
    }

    #[test]
    fn test_streak_extends_switches_and_clears() {
        let mut stats = SessionStats::new();
        stats.record(Outcome::Win(Mark::X), None);
        stats.record(Outcome::Win(Mark::X), None);
        assert_eq!(*stats.streak().count(), 2);
        assert_eq!(*stats.streak().mark(), Some(Mark::X));

        stats.record(Outcome::Win(Mark::O), None);
        assert_eq!(*stats.streak().count(), 1);
        assert_eq!(*stats.streak().mark(), Some(Mark::O));

        stats.record(Outcome::Draw, None);
        assert_eq!(*stats.streak(), Streak::default());
    }

    #[test]
    fn test_leaderboard_orders_by_wins_then_label() {
        let mut stats = SessionStats::new();
        for label in ["b", "a", "c", "c", "d", "d"] {
            stats.record(Outcome::Win(Mark::X), Some(label));
        }
        assert_eq!(stats.leaderboard(3), vec![("c", 2), ("d", 2), ("a", 1)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stats = SessionStats::new();
        stats.record(Outcome::Win(Mark::O), Some("m"));
        stats.reset();
        assert_eq!(stats, SessionStats::new());
    }

    #[test]
    fn test_display_shows_streak_only_above_one() {
        let mut stats = SessionStats::new();
        stats.record(Outcome::Win(Mark::O), None);
        assert!(!stats.to_string().contains("Streak"));
        stats.record(Outcome::Win(Mark::O), None);
        assert!(stats.to_string().contains("Current Streak: O x2"));
    }
}
