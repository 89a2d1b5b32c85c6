use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Invalid tree document in {path}: {reason}")]
    InvalidFormat {
        path: PathBuf,
        reason: String,
    },

    #[error("Irreducible tree: no reduction rule applies to non-terminal '{label}'")]
    Irreducible {
        label: String,
    },

    #[error("Internal tree operation failed: {0}")]
    InternalError(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
