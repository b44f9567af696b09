//! Row queue and worker pool.
//!
//! The calling thread enqueues every output row exactly once into a
//! bounded multi-consumer channel and then closes it. Each queued task
//! carries the row index together with the mutable slice for that row,
//! so a worker that receives the task is the only code able to write
//! it. Workers pull the next row as soon as they finish the current
//! one and exit when the queue is empty and closed.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::Receiver;
use tracing::debug;

use crate::Error;
use crate::barrier;

/// One unit of work: compute output row `row` into `out`.
struct RowTask<'r> {
    row: usize,
    out: &'r mut [i64],
}

/// Per-row kernel: fills `out` with row `row` of the product.
pub(crate) type Kernel = fn(usize, &[i64], &[Vec<i64>], &mut [i64]) -> Result<(), Error>;

/// Textbook dot-product kernel with checked arithmetic.
pub(crate) fn dot_rows(
    row: usize,
    a_row: &[i64],
    b: &[Vec<i64>],
    out: &mut [i64],
) -> Result<(), Error> {
    for (col, cell) in out.iter_mut().enumerate() {
        let mut sum: i64 = 0;
        for (k, &a) in a_row.iter().enumerate() {
            sum = a
                .checked_mul(b[k][col])
                .and_then(|product| sum.checked_add(product))
                .ok_or(Error::Overflow { row, col })?;
        }
        *cell = sum;
    }
    Ok(())
}

/// Runs `workers` threads over the rows of `result`, blocking until all
/// of them have exited.
///
/// Returns the number of rows each worker computed, indexed by worker.
pub(crate) fn run(
    a: &[Vec<i64>],
    b: &[Vec<i64>],
    result: &mut [Vec<i64>],
    workers: usize,
    kernel: Kernel,
) -> Result<Vec<usize>, Error> {
    let rows = result.len();

    thread::scope(|s| {
        let (tx, rx) = crossbeam_channel::bounded(rows);

        let mut handles = Vec::new();
        if let Err(e) = handles.try_reserve_exact(workers) {
            return Err(Error::Spawn(io::Error::new(io::ErrorKind::OutOfMemory, e)));
        }
        for id in 0..workers {
            let tasks = rx.clone();
            let spawned = thread::Builder::new()
                .name(format!("matrix-mul-worker-{id}"))
                .spawn_scoped(s, move || work(id, tasks, a, b, kernel));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    drop(tx);
                    // Started workers see a closed queue and exit; join them
                    // before reporting.
                    if let Err(worker_err) = barrier::wait(handles) {
                        debug!(error = %worker_err, "worker failed while pool was starting");
                    }
                    return Err(Error::Spawn(e));
                }
            }
        }
        drop(rx);
        debug!(workers, rows, "workers started");

        for (row, out) in result.iter_mut().enumerate() {
            // Capacity equals the row count, so a send only fails once every
            // worker has exited with an error, which the barrier reports.
            let task = RowTask {
                row,
                out: out.as_mut_slice(),
            };
            if tx.send(task).is_err() {
                debug!(row, "row queue has no receivers left");
                break;
            }
        }
        drop(tx);
        debug!("row queue closed");

        barrier::wait(handles)
    })
}

fn work(
    id: usize,
    tasks: Receiver<RowTask<'_>>,
    a: &[Vec<i64>],
    b: &[Vec<i64>],
    kernel: Kernel,
) -> Result<usize, Error> {
    let mut computed = 0;
    for RowTask { row, out } in tasks.iter() {
        panic::catch_unwind(AssertUnwindSafe(|| kernel(row, &a[row], b, out))).map_err(
            |payload| Error::WorkerPanicked {
                worker: id,
                row,
                message: barrier::panic_message(&*payload),
            },
        )??;
        computed += 1;
    }
    debug!(worker = id, rows = computed, "worker drained queue");
    Ok(computed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::allocate;

    fn panics_on_row_three(
        row: usize,
        a_row: &[i64],
        b: &[Vec<i64>],
        out: &mut [i64],
    ) -> Result<(), Error> {
        if row == 3 {
            panic!("boom on row {row}");
        }
        dot_rows(row, a_row, b, out)
    }

    fn fails_on_every_row(
        row: usize,
        _a_row: &[i64],
        _b: &[Vec<i64>],
        _out: &mut [i64],
    ) -> Result<(), Error> {
        Err(Error::Overflow { row, col: 0 })
    }

    fn slow_on_row_zero(
        row: usize,
        a_row: &[i64],
        b: &[Vec<i64>],
        out: &mut [i64],
    ) -> Result<(), Error> {
        if row == 0 {
            std::thread::sleep(std::time::Duration::from_millis(500));
        }
        dot_rows(row, a_row, b, out)
    }

    #[test]
    fn dot_rows_computes_one_output_row() {
        let b = vec![vec![7, 8], vec![9, 10], vec![11, 12]];
        let mut out = vec![0; 2];
        dot_rows(0, &[1, 2, 3], &b, &mut out).unwrap();
        assert_eq!(out, vec![58, 64]);
    }

    #[test]
    fn dot_rows_reports_overflow_position() {
        let b = vec![vec![1, 2]];
        let mut out = vec![0; 2];
        let err = dot_rows(5, &[i64::MAX], &b, &mut out).unwrap_err();
        assert!(matches!(err, Error::Overflow { row: 5, col: 1 }));
    }

    #[test]
    fn every_row_is_computed_exactly_once() {
        let a: Vec<Vec<i64>> = (0..17).map(|i| vec![i, 1]).collect();
        let b = vec![vec![1, 0], vec![0, 1]];
        let mut result = allocate(17, 2);

        let counts = run(&a, &b, &mut result, 4, dot_rows).unwrap();

        assert_eq!(counts.len(), 4);
        assert_eq!(counts.iter().sum::<usize>(), 17);
        assert_eq!(result, a);
    }

    #[test]
    fn idle_workers_exit_without_work() {
        let a = vec![vec![2]];
        let b = vec![vec![3]];
        let mut result = allocate(1, 1);

        let counts = run(&a, &b, &mut result, 8, dot_rows).unwrap();

        assert_eq!(counts.len(), 8);
        assert_eq!(counts.iter().sum::<usize>(), 1);
        assert_eq!(result, vec![vec![6]]);
    }

    #[test]
    fn panicking_worker_does_not_block_the_barrier() {
        let a = vec![vec![1]; 10];
        let b = vec![vec![1]];
        let mut result = allocate(10, 1);

        let err = run(&a, &b, &mut result, 3, panics_on_row_three).unwrap_err();

        match err {
            Error::WorkerPanicked { row, message, .. } => {
                assert_eq!(row, 3);
                assert!(message.contains("boom on row 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn kernel_error_is_surfaced_after_all_workers_exit() {
        let a = vec![vec![1]; 6];
        let b = vec![vec![1]];
        let mut result = allocate(6, 1);

        let err = run(&a, &b, &mut result, 6, fails_on_every_row).unwrap_err();
        assert!(matches!(err, Error::Overflow { col: 0, .. }));
    }

    #[test]
    fn free_worker_takes_rows_while_another_is_busy() {
        let a: Vec<Vec<i64>> = (0..20).map(|i| vec![i]).collect();
        let b = vec![vec![2]];
        let mut result = allocate(20, 1);

        let mut counts = run(&a, &b, &mut result, 2, slow_on_row_zero).unwrap();
        counts.sort_unstable();

        assert_eq!(counts, vec![1, 19]);
        let expected: Vec<Vec<i64>> = (0..20).map(|i| vec![i * 2]).collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn unreachable_worker_count_is_a_spawn_error() {
        let a = vec![vec![1]];
        let b = vec![vec![2]];
        let mut result = allocate(1, 1);

        let err = run(&a, &b, &mut result, isize::MAX as usize, dot_rows).unwrap_err();

        assert!(matches!(err, Error::Spawn(_)));
        assert_eq!(result, vec![vec![0]]);
    }
}
