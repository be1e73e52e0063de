use crate::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Runs `job` for every index in `0..jobs` on up to `max_workers` threads and
/// returns the results in index order.
///
/// Workers pull the next index off a shared counter until none are left. Once
/// any job fails, workers stop picking up new ones and the error of the
/// lowest failing index is returned. A panicking job is resumed on the
/// calling thread after every worker has stopped.
pub(crate) fn fan_out<T, F>(jobs: usize, max_workers: usize, job: F) -> Result<Vec<T>, Error>
where
    T: Send,
    F: Fn(usize) -> Result<T, Error> + Sync,
{
    let next_job = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);

    let worker_fn = || {
        let mut finished = Vec::new();

        while !failed.load(Ordering::Relaxed) {
            let index = next_job.fetch_add(1, Ordering::Relaxed);
            if index >= jobs {
                break;
            }

            let result = job(index);
            if result.is_err() {
                failed.store(true, Ordering::Relaxed);
            }
            finished.push((index, result));
        }

        finished
    };

    let n_workers = max_workers.min(jobs).max(1);

    // for WASM we do not have threads and crossbeam panics,
    // so the calling thread does all of the work
    #[cfg(target_arch = "wasm32")]
    let per_worker = {
        let _ = n_workers;
        vec![(worker_fn)()]
    };

    #[cfg(not(target_arch = "wasm32"))]
    let per_worker = if n_workers == 1 {
        vec![(worker_fn)()]
    } else {
        log::trace!("spreading {} jobs over {} workers", jobs, n_workers);

        crossbeam_utils::thread::scope(|scope| {
            let handles: Vec<_> = (0..n_workers)
                .map(|_| scope.spawn(|_| (worker_fn)()))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
    };

    let mut results: Vec<_> = per_worker.into_iter().flatten().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
