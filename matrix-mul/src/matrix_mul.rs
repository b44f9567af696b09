//! Multiplication entry point.

use tracing::{debug, info, warn};

use crate::matrix::{Matrix, allocate, shape};
use crate::scheduler;
use crate::timing::{TimingRecord, TimingSink, TracingSink};
use crate::validate::{Checked, checked};
use crate::Error;

const TIMING_LABEL: &str = "Matrix multiplication";

/// Parallel matrix multiplication engine.
///
/// `MatrixMul` validates its operands, spreads the output rows over a
/// pool of worker threads through a shared queue, waits for every worker
/// and hands one [`TimingRecord`] per successful product to its sink.
///
/// # Example
///
/// ```
/// use matrix_mul::MatrixMul;
///
/// let mm = MatrixMul::new();
/// let a = vec![vec![1, 2, 3], vec![4, 5, 6]];
/// let b = vec![vec![7, 8], vec![9, 10], vec![11, 12]];
///
/// let c = mm.multiply(&a, &b, 4).unwrap();
/// assert_eq!(c, vec![vec![58, 64], vec![139, 154]]);
/// ```
#[derive(Debug, Default)]
pub struct MatrixMul<S = TracingSink> {
    sink: S,
}

impl MatrixMul {
    /// Creates an engine that reports timings through `tracing`.
    pub fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: TimingSink> MatrixMul<S> {
    /// Creates an engine that reports timings to `sink`.
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Computes `a × b` with `workers` threads.
    pub fn multiply(&self, a: &[Vec<i64>], b: &[Vec<i64>], workers: isize) -> Result<Matrix, Error> {
        self.try_multiply(Some(a), Some(b), workers)
    }

    /// Computes `a × b`, treating `None` as a missing operand.
    ///
    /// A rejected call allocates nothing, starts no threads and records
    /// no timing.
    pub fn try_multiply(
        &self,
        a: Option<&[Vec<i64>]>,
        b: Option<&[Vec<i64>]>,
        workers: isize,
    ) -> Result<Matrix, Error> {
        let Checked { a, b, workers } = match checked(a, b, workers) {
            Ok(operands) => operands,
            Err(e) => {
                debug!(error = %e, "operands rejected");
                return Err(e);
            }
        };
        debug!(workers, "operands validated");

        let stopwatch = TimingRecord::start(TIMING_LABEL);

        let (m, n) = shape(a);
        let p = shape(b).1;
        let mut result = allocate(m, p);
        debug!(m, n, p, "result allocated");

        let counts = scheduler::run(a, b, &mut result, workers, scheduler::dot_rows)?;
        debug!(?counts, "all workers finished");

        let record = stopwatch.stop();
        info!(m, n, p, workers, duration = ?record.duration, "matrix multiplication completed");
        if let Err(e) = self.sink.record(&record) {
            warn!(error = %e, "failed to report timing");
        }

        Ok(result)
    }
}

/// Computes `a × b` with `workers` threads, logging the timing through
/// `tracing`.
pub fn multiply(a: &[Vec<i64>], b: &[Vec<i64>], workers: isize) -> Result<Matrix, Error> {
    MatrixMul::new().multiply(a, b, workers)
}
