//! Win detection centered on the most recently placed disc.
//!
//! Only the last move can create a new winning alignment, so a full-board
//! rescan is never needed: each axis through the last-placed cell is
//! examined in a window of `2 * win_length - 1` cells, and the window is
//! scanned for an unbroken run of the dropped disc's value.

use super::board::{Board, Cell};

/// The four axes a winning run can lie on, as (row, col) steps.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // down-diagonal
    (1, -1), // up-diagonal
];

/// True if a run of `win_length` cells equal to the disc at
/// `(row, col)` passes through that cell along any axis.
pub fn wins_through(board: &Board, row: usize, col: usize, win_length: usize) -> bool {
    let target = board.get(row, col);
    if target == Cell::Empty {
        return false;
    }

    AXES.iter().any(|&(dr, dc)| {
        let window = axis_window(board, row, col, win_length, dr, dc);
        contains_run(&window, target, win_length)
    })
}

/// The `2 * win_length - 1` cells centered on `(row, col)`, stepping
/// `(dr, dc)` per position. Positions outside the grid contribute a
/// sentinel `Empty`.
fn axis_window(
    board: &Board,
    row: usize,
    col: usize,
    win_length: usize,
    dr: isize,
    dc: isize,
) -> Vec<Cell> {
    let span = 2 * win_length - 1;
    let back = (win_length - 1) as isize;

    (0..span as isize)
        .map(|i| {
            let r = row as isize - back * dr + i * dr;
            let c = col as isize - back * dc + i * dc;
            if r >= 0 && (r as usize) < board.rows() && c >= 0 && (c as usize) < board.cols() {
                board.get(r as usize, c as usize)
            } else {
                Cell::Empty
            }
        })
        .collect()
}

/// True if `target` appears at least `len` times consecutively in
/// `window`.
pub fn contains_run(window: &[Cell], target: Cell, len: usize) -> bool {
    if len == 0 || window.len() < len {
        return false;
    }
    window.windows(len).any(|w| w.iter().all(|&c| c == target))
}
