use std::path::PathBuf;

/// Errors that can occur while saving or loading a board.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("invalid slot name '{0}' (use letters, digits, '-' and '_')")]
    InvalidName(String),

    #[error("no saved board named '{0}'")]
    SlotNotFound(String),

    #[error("saved board has {found} rows, expected {expected}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("row {row} of saved board has {found} columns, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized cell character '{ch}' at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
