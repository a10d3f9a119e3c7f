//! Prompt construction and reply parsing.
//!
//! Replies are free text. Parsing is best effort: the first two integers
//! found left to right are taken as `(row, col)` and anything after them
//! is ignored. Whether that coordinate is playable is decided by the
//! resolver against the legal-move list.

use crate::games::tictactoe::{Board, Mark, Move};
use tracing::{debug, instrument};

/// Builds the fixed system prompt for a seat.
#[instrument]
pub fn system_prompt(player_name: &str, mark: Mark) -> String {
    format!(
        "You are {player_name} in a Tic Tac Toe game. Your goal is to win by placing three \
{mark}'s in a row (horizontally, vertically, or diagonally).

BOARD LAYOUT:
- The board is a 3x3 grid with coordinates from (0,0) to (2,2)
- Top-left is (0,0), bottom-right is (2,2)

RULES:
- You can only place {mark} in empty spaces (shown as \"_\" on the board)
- Players take turns placing their marks
- First to get 3 marks in a row (horizontal, vertical, or diagonal) wins
- If all spaces are filled with no winner, the game is a draw

YOUR RESPONSE:
- Provide ONLY two numbers separated by a space (row column)
- Example: \"1 2\" places your {mark} in row 1, column 2
- Choose only from the valid moves list provided to you

STRATEGY TIPS:
- Study the board carefully and make strategic moves
- Block your opponent's potential winning moves
- Create opportunities for multiple winning paths
- Pay attention to the valid moves and avoid illegal moves
"
    )
}

/// Formats moves as `(r, c), (r, c), ...`.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the deterministic per-turn prompt.
///
/// Contains the rendered grid, the legal moves and the reply instruction.
/// Identical boards always produce identical prompts.
#[instrument(skip(board, legal))]
pub fn turn_prompt(board: &Board, legal: &[Move]) -> String {
    format!(
        "You are playing {mark}.\n\
         Current board state:\n{grid}\n\
         Available valid moves (row, col): {moves}\n\n\
         Choose your next move from the valid moves above.\n\
         Respond with ONLY two integers for row and column separated by a space, e.g. \"1 2\".",
        mark = board.turn(),
        grid = board.render(),
        moves = format_moves(legal),
    )
}

/// Extracts the first two integers in `text`, in order of occurrence.
///
/// A `-` directly before a digit run is its sign, so `"-1 0"` yields
/// `(-1, 0)` and is never played as `(1, 0)`. Values too large for `i64`
/// saturate. Returns `None` when fewer than two integers are present.
#[instrument(skip(text), fields(len = text.len()))]
pub fn extract_coordinates(text: &str) -> Option<(i64, i64)> {
    let mut numbers = integers(text);
    let row = numbers.next()?;
    let col = numbers.next()?;
    debug!(row, col, "Extracted coordinates");
    Some((row, col))
}

fn integers(text: &str) -> impl Iterator<Item = i64> + '_ {
    let bytes = text.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() {
            if !bytes[i].is_ascii_digit() {
                i += 1;
                continue;
            }
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let negative = start > 0 && bytes[start - 1] == b'-';
            let digits = &text[start..i];
            let value = match (digits.parse::<i64>(), negative) {
                (Ok(v), false) => v,
                (Ok(v), true) => -v,
                (Err(_), false) => i64::MAX,
                (Err(_), true) => i64::MIN,
            };
            return Some(value);
        }
        None
    })
}

/// Converts extracted integers to a move if both are non-negative.
pub fn to_move((row, col): (i64, i64)) -> Option<Move> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    Some(Move::new(row, col))
}
