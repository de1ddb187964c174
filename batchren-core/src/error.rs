use std::path::PathBuf;
use thiserror::Error;

/// Invalid input detected before any planning runs.
///
/// A validation error blocks the whole batch: nothing is planned and nothing
/// is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no files selected")]
    NoSelection,

    #[error("search text must not be empty")]
    EmptySearch,

    #[error("prefix must not be empty")]
    EmptyPrefix,

    #[error("suffix must not be empty")]
    EmptySuffix,

    #[error("{field} must be at least 1")]
    ZeroValue { field: &'static str },

    #[error("{field} must not contain a path separator: {value:?}")]
    PathSeparator { field: &'static str, value: String },

    #[error("number width must be between 1 and 4, got {0}")]
    InvalidWidth(u8),

    #[error("directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("file not found in directory: {0}")]
    UnknownFile(String),

    #[error("invalid glob pattern {pattern:?}: {message}")]
    InvalidGlob { pattern: String, message: String },
}

/// The plan contains conflicts and execution was not forced past them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rename plan has {count} conflict(s); change the parameters or pass --skip-conflicts")]
pub struct ConflictError {
    pub count: usize,
}

/// Some renames of an executed batch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{failed} of {attempted} rename(s) failed")]
pub struct PartialFailure {
    pub failed: usize,
    pub attempted: usize,
}

/// Why a single planned rename could not be carried out.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("file '{name}' already exists")]
    TargetExists { name: String },

    #[error("rename failed and the file was left at '{}': {source}", .temp.display())]
    Stranded {
        temp: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
