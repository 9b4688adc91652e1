//! Text codec for saved boards.
//!
//! One line per row, top row first, one character per column:
//! `'0'` empty, `'1'` player one, `'2'` player two. The file carries no
//! dimension metadata; the expected dimensions come from the session's
//! current configuration and any mismatch is a decode error.

use crate::error::SaveError;
use crate::game::{Board, Cell, GameState, Player};

/// A decoded save: the grid plus the inferred next player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    pub board: Board,
    pub next_player: Player,
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '0',
        Cell::One => '1',
        Cell::Two => '2',
    }
}

fn char_cell(ch: char) -> Option<Cell> {
    match ch {
        '0' => Some(Cell::Empty),
        '1' => Some(Cell::One),
        '2' => Some(Cell::Two),
        _ => None,
    }
}

/// Serialize the board grid, one newline-terminated line per row.
pub fn encode(state: &GameState) -> String {
    let mut out = String::with_capacity(state.rows() * (state.cols() + 1));
    for row in 0..state.rows() {
        out.extend(state.board().row_cells(row).map(cell_char));
        out.push('\n');
    }
    out
}

/// Parse a saved board against the expected dimensions. Nothing is
/// applied anywhere on failure; the caller installs the result via
/// [`GameState::restore`].
///
/// The next player is inferred from disc counts: if player one holds more
/// discs it is player two's turn, otherwise player one's (ties mean a
/// full round has been played, so player one moves again).
pub fn decode(text: &str, rows: usize, cols: usize) -> Result<LoadedBoard, SaveError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != rows {
        return Err(SaveError::RowCountMismatch {
            expected: rows,
            found: lines.len(),
        });
    }

    let mut board = Board::new(rows, cols);
    for (row, line) in lines.iter().enumerate() {
        let width = line.chars().count();
        if width != cols {
            return Err(SaveError::RowWidthMismatch {
                row,
                expected: cols,
                found: width,
            });
        }
        for (col, ch) in line.chars().enumerate() {
            let cell = char_cell(ch).ok_or(SaveError::UnknownCell { row, col, ch })?;
            board.set(row, col, cell);
        }
    }

    let ones = board.count_of(Cell::One);
    let twos = board.count_of(Cell::Two);
    let next_player = if ones > twos { Player::Two } else { Player::One };

    Ok(LoadedBoard { board, next_player })
}
