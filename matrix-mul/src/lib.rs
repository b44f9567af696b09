//! Parallel integer matrix multiplication.
//!
//! `matrix-mul` computes `C = A × B` for dense `i64` matrices using a
//! fixed pool of worker threads. Rows of `C` are handed out one at a time
//! through a shared queue, so a worker that finishes early simply takes
//! the next row instead of idling on a precomputed chunk.
//!
//! # Pipeline
//!
//! - **Validate**: worker count, missing or empty operands, inner
//!   dimensions and rectangular rows are checked before anything else.
//! - **Allocate**: `C` is created zero-filled with shape `rows(A) × cols(B)`.
//! - **Schedule**: row indices `0..rows(A)` are queued in order; each
//!   worker owns the row it dequeued until it is written.
//! - **Barrier**: the caller waits for every worker, then receives `C`
//!   or the first worker failure.
//! - **Report**: one [`TimingRecord`] goes to the engine's [`TimingSink`].
//!
//! # Example
//!
//! ```
//! let a = vec![vec![1]];
//! let b = vec![vec![2]];
//!
//! let c = matrix_mul::multiply(&a, &b, 4).unwrap();
//! assert!(matrix_mul::equal(&c, &[vec![2]]));
//! ```

mod barrier;
mod error;
mod matrix;
mod matrix_mul;
mod scheduler;
mod timing;
mod validate;

pub use error::Error;
pub use matrix::{Matrix, Operand, allocate, equal, shape};
pub use matrix_mul::{MatrixMul, multiply};
pub use timing::{FileSink, Stopwatch, TimingRecord, TimingSink, TracingSink};
pub use validate::validate;
