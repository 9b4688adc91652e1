use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::GameState;

/// One-ply lookahead computer player: take an immediate win, otherwise
/// block the opponent's immediate win, otherwise play a random column.
///
/// The policy holds no game state of its own; each trial move runs on a
/// clone of the caller's `GameState`, so the real board is never observed
/// mid-simulation.
pub struct ComputerPlayer {
    rng: StdRng,
}

impl ComputerPlayer {
    pub fn new() -> Self {
        ComputerPlayer {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic construction for tests.
    pub fn seeded(seed: u64) -> Self {
        ComputerPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick the column to play. Precondition: the board is not full.
    pub fn play_for_win(&mut self, state: &GameState) -> usize {
        if let Some(col) = self.winning_move(state) {
            debug!("taking winning move in column {col}");
            return col;
        }
        if let Some(col) = self.prevent_losing_move(state) {
            debug!("blocking opponent win in column {col}");
            return col;
        }
        let col = self.random_move(state);
        debug!("no forced move, playing random column {col}");
        col
    }

    /// Lowest column in which the current player wins immediately, if any.
    pub fn winning_move(&self, state: &GameState) -> Option<usize> {
        (0..state.cols()).find(|&col| {
            let mut trial = state.clone();
            trial.make_move(col).is_ok() && trial.is_game_won(col)
        })
    }

    /// Lowest column in which the opponent would win on their next turn,
    /// if any. Playing it first denies them the win.
    pub fn prevent_losing_move(&self, state: &GameState) -> Option<usize> {
        (0..state.cols()).find(|&col| {
            let mut trial = state.clone();
            trial.reverse_turn();
            trial.make_move(col).is_ok() && trial.is_game_won(col)
        })
    }

    /// Uniform-random playable column, drawn by rejection sampling.
    /// Precondition: at least one column is not full.
    pub fn random_move(&mut self, state: &GameState) -> usize {
        loop {
            let col = self.rng.random_range(0..state.cols());
            if state.board().highest_disc(col) != Some(0) {
                return col;
            }
        }
    }
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new()
    }
}
