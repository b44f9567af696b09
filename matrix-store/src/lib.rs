//! Persistence for matrix-mul operands.
//!
//! `matrix-store` generates random square matrices, reads and writes them
//! as whitespace-delimited text, and reports generation timings through
//! the same [`matrix_mul::TimingSink`] the engine uses.
//!
//! # File Format
//!
//! - One matrix row per line
//! - Elements are base-10 `i64` values separated by whitespace
//! - Blank lines are ignored when reading

mod error;
mod size;
mod store;

pub use error::Error;
pub use size::MatrixSize;
pub use store::MatrixStore;
