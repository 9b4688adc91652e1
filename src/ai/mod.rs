//! Computer opponent: a one-ply policy over the board-state engine.

mod computer;

pub use computer::ComputerPlayer;
