use std::path::PathBuf;
use thiserror::Error;

/// Failure of the harness itself, as opposed to a failed check.
#[derive(Debug, Error)]
pub enum TestError {
    #[error("cannot read {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        source: regionalize_io::IoError,
    },

    #[error("cannot write {}: {source}", .path.display())]
    ImageWrite {
        path: PathBuf,
        source: regionalize_io::IoError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TestResult<T> = Result<T, TestError>;
