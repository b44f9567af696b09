//! Completion barrier for the worker pool.

use std::any::Any;
use std::thread::ScopedJoinHandle;

use crate::Error;

/// Joins every worker, then reports the first failure in worker order.
///
/// All handles are joined even after a failure is seen, so the caller
/// never resumes while a worker still holds a row.
pub(crate) fn wait(
    handles: Vec<ScopedJoinHandle<'_, Result<usize, Error>>>,
) -> Result<Vec<usize>, Error> {
    let mut counts = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for (worker, handle) in handles.into_iter().enumerate() {
        let outcome = handle.join().unwrap_or_else(|payload| {
            Err(Error::WorkerLost {
                worker,
                message: panic_message(&*payload),
            })
        });
        match outcome {
            Ok(count) => counts.push(count),
            Err(e) => {
                counts.push(0);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(counts),
    }
}

/// Extracts the message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
