//! Tic-tac-toe board engine.

mod board;
pub mod invariants;
mod render;
pub mod rules;
mod types;

pub use board::{Board, BoardError, DEFAULT_SIZE};
pub use types::{Cell, Mark, Move, Outcome};

/// Reads cell contents back from the canonical rendering.
pub use render::parse as parse_rendered;
