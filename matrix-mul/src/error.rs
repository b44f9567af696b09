//! Error types for matrix-mul operations.

use thiserror::Error;

use crate::matrix::Operand;

#[derive(Debug, Error)]
pub enum Error {
    #[error("number of workers must be greater than zero, got {0}")]
    InvalidWorkerCount(isize),

    #[error("matrix {0} is missing")]
    NilMatrix(Operand),

    #[error("matrix {0} is empty")]
    EmptyMatrix(Operand),

    #[error("matrix dimension mismatch: A is {0}x{1}, B is {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("matrix {operand} is not rectangular: row {row} has {len} columns, expected {expected}")]
    JaggedMatrix {
        operand: Operand,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("integer overflow computing C[{row}][{col}]")]
    Overflow { row: usize, col: usize },

    #[error("worker {worker} panicked on row {row}: {message}")]
    WorkerPanicked {
        worker: usize,
        row: usize,
        message: String,
    },

    #[error("worker {worker} exited abnormally: {message}")]
    WorkerLost { worker: usize, message: String },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors raised before any work was scheduled.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidWorkerCount(_)
                | Error::NilMatrix(_)
                | Error::EmptyMatrix(_)
                | Error::DimensionMismatch(..)
                | Error::JaggedMatrix { .. }
        )
    }
}
