//! Error types for matrix-store operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {source}")]
    Parse {
        line: usize,
        source: std::num::ParseIntError,
    },

    #[error("unknown matrix size {0:?}, expected small, middle, big or a positive integer")]
    UnknownSize(String),
}
