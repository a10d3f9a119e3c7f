//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart
//! from grid storage so the board engine stays a mutation primitive.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Line, winning_line};
