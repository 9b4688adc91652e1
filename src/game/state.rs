use log::debug;

use super::board::{Board, Cell};
use super::player::Player;
use super::win;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {col} is out of range (board has {cols} columns)")]
    InvalidColumn { col: usize, cols: usize },

    #[error("column {0} has no disc to remove")]
    ColumnEmpty(usize),
}

/// The board-state engine: owns the grid, the turn, the win-length
/// parameter, and the piece count.
///
/// Dimension constraints (`rows >= win_length`, `cols >= win_length`) are
/// the caller's responsibility; the engine does not validate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    win_length: usize,
    piece_count: usize,
    current_player: Player,
}

impl GameState {
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Self {
        GameState {
            board: Board::new(rows, cols),
            win_length,
            piece_count: 0,
            current_player: Player::One,
        }
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn piece_count(&self) -> usize {
        self.piece_count
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Clear all cells and hand the turn back to Player 1, keeping the
    /// current dimensions and win length.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.rows(), self.board.cols());
        self.piece_count = 0;
        self.current_player = Player::One;
    }

    /// Change the board dimensions. The grid is reset: a stale grid under
    /// new dimensions is never observable.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.board = Board::new(rows, cols);
        self.piece_count = 0;
        self.current_player = Player::One;
    }

    pub fn set_win_length(&mut self, win_length: usize) {
        self.win_length = win_length;
    }

    /// True iff a disc can be dropped in `col`: in range and not full.
    pub fn is_move_valid(&self, col: usize) -> bool {
        col < self.board.cols() && !self.board.is_column_full(col)
    }

    /// Drop the current player's disc in `col`. On success the disc lands
    /// in the lowest empty cell, the piece count rises by one, the turn
    /// flips, and the landing row is returned. On error nothing changes —
    /// in particular the turn does not flip.
    pub fn make_move(&mut self, col: usize) -> Result<usize, MoveError> {
        if col >= self.board.cols() {
            return Err(MoveError::InvalidColumn {
                col,
                cols: self.board.cols(),
            });
        }
        let row = self
            .board
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull(col))?;

        self.board.set(row, col, self.current_player.to_cell());
        self.piece_count += 1;
        self.current_player = self.current_player.other();
        debug!("disc placed at row {row}, column {col}");
        Ok(row)
    }

    /// Remove the most recent disc in `col`, restoring the turn and piece
    /// count to their values before the matching `make_move`. On error
    /// nothing changes.
    pub fn undo_move(&mut self, col: usize) -> Result<(), MoveError> {
        if col >= self.board.cols() {
            return Err(MoveError::InvalidColumn {
                col,
                cols: self.board.cols(),
            });
        }
        let row = self
            .board
            .highest_disc(col)
            .ok_or(MoveError::ColumnEmpty(col))?;

        self.board.set(row, col, Cell::Empty);
        self.piece_count -= 1;
        self.current_player = self.current_player.other();
        Ok(())
    }

    pub fn is_board_full(&self) -> bool {
        self.piece_count == self.board.rows() * self.board.cols()
    }

    /// True iff the topmost disc of `col` completes a `win_length` run.
    /// Meaningful only when called right after a move to that column.
    pub fn is_game_won(&self, col: usize) -> bool {
        match self.board.highest_disc(col) {
            Some(row) => win::wins_through(&self.board, row, col, self.win_length),
            None => false,
        }
    }

    /// Flip whose turn it is without touching the grid. Lets a caller
    /// evaluate "what if it were the opponent's turn".
    pub fn reverse_turn(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Install a loaded grid and hand the turn to `next_player`. The
    /// piece count is recomputed from the grid.
    pub fn restore(&mut self, board: Board, next_player: Player) {
        self.piece_count = board.occupied_count();
        self.board = board;
        self.current_player = next_player;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_WIN_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::default();
        assert_eq!(state.rows(), 6);
        assert_eq!(state.cols(), 7);
        assert_eq!(state.win_length(), 4);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.piece_count(), 0);
        assert!(!state.is_board_full());
    }

    #[test]
    fn test_make_move_lands_at_bottom() {
        let mut state = GameState::default();
        assert_eq!(state.make_move(3), Ok(5));
        assert_eq!(state.board().get(5, 3), Cell::One);
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.piece_count(), 1);

        assert_eq!(state.make_move(3), Ok(4));
        assert_eq!(state.board().get(4, 3), Cell::Two);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.piece_count(), 2);
    }

    #[test]
    fn test_move_validity() {
        let mut state = GameState::default();
        assert!(state.is_move_valid(0));
        assert!(state.is_move_valid(6));
        assert!(!state.is_move_valid(7));
        assert!(!state.is_move_valid(100));

        for _ in 0..6 {
            state.make_move(2).unwrap();
        }
        assert!(!state.is_move_valid(2));
    }

    #[test]
    fn test_make_move_out_of_range() {
        let mut state = GameState::default();
        assert_eq!(
            state.make_move(9),
            Err(MoveError::InvalidColumn { col: 9, cols: 7 })
        );
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.piece_count(), 0);
    }

    #[test]
    fn test_full_column_move_leaves_turn_unflipped() {
        let mut state = GameState::default();
        for _ in 0..6 {
            state.make_move(0).unwrap();
        }
        let before = state.clone();
        assert_eq!(state.make_move(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_round_trip() {
        let mut state = GameState::default();
        state.make_move(3).unwrap();
        state.make_move(4).unwrap();

        let before = state.clone();
        state.make_move(3).unwrap();
        state.undo_move(3).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_removes_topmost_disc() {
        let mut state = GameState::default();
        state.make_move(0).unwrap(); // One at row 5
        state.make_move(0).unwrap(); // Two at row 4

        state.undo_move(0).unwrap();
        assert_eq!(state.board().get(4, 0), Cell::Empty);
        assert_eq!(state.board().get(5, 0), Cell::One);
        assert_eq!(state.piece_count(), 1);
        assert_eq!(state.current_player(), Player::Two);
    }

    #[test]
    fn test_undo_empty_column_is_error() {
        let mut state = GameState::default();
        let before = state.clone();
        assert_eq!(state.undo_move(2), Err(MoveError::ColumnEmpty(2)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_out_of_range() {
        let mut state = GameState::default();
        assert_eq!(
            state.undo_move(7),
            Err(MoveError::InvalidColumn { col: 7, cols: 7 })
        );
    }

    #[test]
    fn test_horizontal_win_scenario() {
        // Player 1 drops in columns 0..=2, Player 2 answering in column 6,
        // then Player 1 completes the bottom row at column 3.
        let mut state = GameState::default();
        for col in 0..3 {
            state.make_move(col).unwrap();
            state.make_move(6).unwrap();
        }
        state.make_move(3).unwrap();
        assert!(state.is_game_won(3));
    }

    #[test]
    fn test_vertical_win_scenario() {
        let mut state = GameState::default();
        for _ in 0..3 {
            state.make_move(0).unwrap();
            state.make_move(1).unwrap();
        }
        state.make_move(0).unwrap();
        assert!(state.is_game_won(0));
    }

    #[test]
    fn test_win_not_claimed_early() {
        let mut state = GameState::default();
        state.make_move(0).unwrap();
        state.make_move(6).unwrap();
        state.make_move(1).unwrap();
        state.make_move(6).unwrap();
        state.make_move(2).unwrap();
        assert!(!state.is_game_won(2));
    }

    #[test]
    fn test_is_game_won_on_empty_column() {
        let state = GameState::default();
        assert!(!state.is_game_won(0));
    }

    #[test]
    fn test_full_board_without_win() {
        // 3x2 board, win length 3: fill the two columns so that no run of
        // three ever forms.
        let mut state = GameState::new(3, 2, 3);
        //   One  Two      (top)
        //   Two  One
        //   One  Two      (bottom)
        state.make_move(0).unwrap(); // One, row 2
        state.make_move(1).unwrap(); // Two, row 2
        state.make_move(1).unwrap(); // One, row 1
        state.make_move(0).unwrap(); // Two, row 1
        state.make_move(0).unwrap(); // One, row 0
        state.make_move(1).unwrap(); // Two, row 0

        assert!(state.is_board_full());
        assert!(!state.is_game_won(0));
        assert!(!state.is_game_won(1));
    }

    #[test]
    fn test_configurable_win_length() {
        let mut state = GameState::new(6, 7, 3);
        state.make_move(0).unwrap();
        state.make_move(6).unwrap();
        state.make_move(1).unwrap();
        state.make_move(6).unwrap();
        state.make_move(2).unwrap();
        assert!(state.is_game_won(2));
    }

    #[test]
    fn test_reverse_turn() {
        let mut state = GameState::default();
        assert_eq!(state.current_player(), Player::One);
        state.reverse_turn();
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.piece_count(), 0);
        state.reverse_turn();
        assert_eq!(state.current_player(), Player::One);
    }

    #[test]
    fn test_reset_keeps_dimensions() {
        let mut state = GameState::new(8, 9, 5);
        state.make_move(0).unwrap();
        state.make_move(1).unwrap();
        state.reset();

        assert_eq!(state.rows(), 8);
        assert_eq!(state.cols(), 9);
        assert_eq!(state.win_length(), 5);
        assert_eq!(state.piece_count(), 0);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_resize_resets_board() {
        let mut state = GameState::default();
        state.make_move(0).unwrap();
        state.resize(5, 5);

        assert_eq!(state.rows(), 5);
        assert_eq!(state.cols(), 5);
        assert_eq!(state.piece_count(), 0);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_restore_recomputes_piece_count() {
        let mut state = GameState::default();
        let mut board = Board::new(6, 7);
        board.set(5, 0, Cell::One);
        board.set(5, 1, Cell::Two);
        board.set(4, 0, Cell::One);

        state.restore(board, Player::Two);
        assert_eq!(state.piece_count(), 3);
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.board().get(5, 0), Cell::One);
    }
}
