//! Canonical text rendering of the grid.
//!
//! This is the only externally visible serialization of the board and is
//! embedded verbatim in agent prompts:
//!
//! ```text
//! -------------
//! | X | _ | _ |
//! -------------
//! | _ | O | _ |
//! -------------
//! | _ | _ | _ |
//! -------------
//! ```

use super::board::{Board, BoardError};
use super::types::Cell;

/// Renders `board` in the canonical format.
pub fn render(board: &Board) -> String {
    let separator = "-".repeat(4 * board.size() + 1);
    let mut out = String::with_capacity((separator.len() + 1) * (2 * board.size() + 1));
    out.push_str(&separator);
    out.push('\n');
    for row in board.rows() {
        let symbols: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
        out.push_str("| ");
        out.push_str(&symbols.join(" | "));
        out.push_str(" |\n");
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

/// Reads cell contents back from a canonical rendering, row by row.
///
/// Separator lines and blank lines are skipped. Every remaining line must
/// be a pipe-delimited row, and the rows must form a square.
pub fn parse(text: &str) -> Result<Vec<Vec<Cell>>, BoardError> {
    let mut rows = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.chars().all(|c| c == '-') {
            continue;
        }

        let inner = line
            .strip_prefix('|')
            .and_then(|l| l.strip_suffix('|'))
            .ok_or_else(|| BoardError::MalformedGrid(format!("not a grid row: {line:?}")))?;

        let row = inner
            .split('|')
            .map(|field| {
                let mut chars = field.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Cell::from_symbol(symbol).ok_or_else(|| {
                        BoardError::MalformedGrid(format!("unknown cell symbol {symbol:?}"))
                    }),
                    _ => Err(BoardError::MalformedGrid(format!(
                        "cell must be one symbol, got {field:?}"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(BoardError::MalformedGrid("no rows".to_string()));
    }
    if rows.iter().any(|row| row.len() != rows.len()) {
        return Err(BoardError::MalformedGrid(format!(
            "grid is not square ({} rows)",
            rows.len()
        )));
    }

    Ok(rows)
}
