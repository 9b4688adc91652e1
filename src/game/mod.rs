//! Core game logic: board representation, player types, the board-state
//! engine, and win detection.

mod board;
mod player;
mod state;
pub mod win;

pub use board::{Board, Cell};
pub use player::Player;
pub use state::{GameState, MoveError, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_WIN_LENGTH};
