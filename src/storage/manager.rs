use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::StorageConfig;
use crate::error::SaveError;
use crate::game::GameState;
use crate::storage::format;

/// Manages named save slots in a single directory. Each slot is a flat
/// `<name>.txt` file in the format of [`format`].
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(config: &StorageConfig) -> Self {
        fs::create_dir_all(&config.save_dir).ok();
        SaveManager {
            dir: config.save_dir.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save the board under `name`, overwriting any existing slot. The
    /// file is written to a temp path first and renamed into place.
    pub fn save(&self, name: &str, state: &GameState) -> Result<PathBuf, SaveError> {
        validate_name(name)?;

        let final_path = self.slot_path(name);
        let tmp_path = self.dir.join(format!("{name}.txt.tmp"));

        fs::write(&tmp_path, format::encode(state))?;
        fs::rename(&tmp_path, &final_path)?;

        info!("board saved to {}", final_path.display());
        Ok(final_path)
    }

    /// Load the slot `name` into `state`. The file is decoded against the
    /// state's current dimensions; on any error the state is untouched.
    pub fn load(&self, name: &str, state: &mut GameState) -> Result<(), SaveError> {
        validate_name(name)?;

        let path = self.slot_path(name);
        if !path.exists() {
            return Err(SaveError::SlotNotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path).map_err(|e| SaveError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        let loaded = format::decode(&text, state.rows(), state.cols())?;
        state.restore(loaded.board, loaded.next_player);

        info!("board loaded from {}", path.display());
        Ok(())
    }

    /// Names of all save slots, sorted.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }
}

/// Slot names are restricted so they can never traverse outside the save
/// directory.
fn validate_name(name: &str) -> Result<(), SaveError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(SaveError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};

    fn manager_in(dir: &Path) -> SaveManager {
        SaveManager::new(&StorageConfig {
            save_dir: dir.to_path_buf(),
        })
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());

        let mut state = GameState::default();
        for col in [3, 4, 3, 2] {
            state.make_move(col).unwrap();
        }
        manager.save("midgame", &state).unwrap();

        let mut restored = GameState::default();
        manager.load("midgame", &mut restored).unwrap();
        assert_eq!(restored.board(), state.board());
        assert_eq!(restored.current_player(), state.current_player());
        assert_eq!(restored.piece_count(), state.piece_count());
    }

    #[test]
    fn test_save_writes_expected_format() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());

        let mut state = GameState::new(2, 3, 2);
        state.make_move(0).unwrap();
        state.make_move(1).unwrap();

        let path = manager.save("tiny", &state).unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, "000\n120\n");
    }

    #[test]
    fn test_load_missing_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());

        let mut state = GameState::default();
        let err = manager.load("nothing", &mut state).unwrap_err();
        assert!(matches!(err, SaveError::SlotNotFound(name) if name == "nothing"));
    }

    #[test]
    fn test_load_dimension_mismatch_leaves_state_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());

        // Saved on the default 6x7 board.
        let saved = GameState::default();
        manager.save("default-size", &saved).unwrap();

        // Session since resized to 5x5.
        let mut state = GameState::new(5, 5, 4);
        state.make_move(2).unwrap();
        let snapshot = state.clone();

        let err = manager.load("default-size", &mut state).unwrap_err();
        assert!(matches!(err, SaveError::RowCountMismatch { .. }));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_load_corrupt_file_leaves_state_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());
        fs::write(tmp.path().join("bad.txt"), "0000000\nabcdefg\n0000000\n0000000\n0000000\n0000000\n").unwrap();

        let mut state = GameState::default();
        state.make_move(0).unwrap();
        let snapshot = state.clone();

        let err = manager.load("bad", &mut state).unwrap_err();
        assert!(matches!(err, SaveError::UnknownCell { row: 1, col: 0, ch: 'a' }));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_load_infers_turn() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());
        fs::write(
            tmp.path().join("one-up.txt"),
            "0000000\n0000000\n0000000\n0000000\n1000000\n1200000\n",
        )
        .unwrap();

        let mut state = GameState::default();
        manager.load("one-up", &mut state).unwrap();
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.piece_count(), 3);
        assert_eq!(state.board().get(5, 1), Cell::Two);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());
        let state = GameState::default();

        for name in ["", "../escape", "a/b", "dots.are.out", "sp ace"] {
            let err = manager.save(name, &state).unwrap_err();
            assert!(matches!(err, SaveError::InvalidName(_)), "accepted {name:?}");
        }
    }

    #[test]
    fn test_list_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());
        let state = GameState::default();

        manager.save("zeta", &state).unwrap();
        manager.save("alpha", &state).unwrap();
        fs::write(tmp.path().join("notes.md"), "ignored").unwrap();

        assert_eq!(manager.list().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_save_overwrites_existing_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = manager_in(tmp.path());

        let mut state = GameState::new(2, 2, 2);
        manager.save("slot", &state).unwrap();
        state.make_move(0).unwrap();
        manager.save("slot", &state).unwrap();

        let mut restored = GameState::new(2, 2, 2);
        manager.load("slot", &mut restored).unwrap();
        assert_eq!(restored.piece_count(), 1);
    }
}
