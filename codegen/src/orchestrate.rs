use crate::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Runs `job` over every input on at most `concurrency` threads and returns the results in input
/// order. Every input is processed even after a failure; the error returned is the one from the
/// job that failed first in time, and all successful results are discarded with it.
pub fn run_all<J, T, F>(inputs: &[J], concurrency: usize, job: F) -> Result<Vec<T>, Error>
where
    J: Sync,
    T: Send + Sync,
    F: Fn(&J) -> Result<T, Error> + Sync,
{
    let slots: Vec<OnceLock<Result<T, Error>>> = inputs.iter().map(|_| OnceLock::new()).collect();
    let next = AtomicUsize::new(0);
    let first_failure = OnceLock::new();
    let worker_count = concurrency.max(1).min(inputs.len());

    std::thread::scope(|scope| {
        for _ in 0..worker_count {
            scope.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(input) = inputs.get(index) else {
                    break;
                };
                let result = job(input);
                if result.is_err() {
                    let _ = first_failure.set(index);
                }
                let _ = slots[index].set(result);
            });
        }
    });

    let mut results: Vec<Option<Result<T, Error>>> =
        slots.into_iter().map(OnceLock::into_inner).collect();
    if let Some(&index) = first_failure.get() {
        if let Some(Err(error)) = results[index].take() {
            return Err(error);
        }
    }
    Ok(results.into_iter().flatten().flatten().collect())
}
