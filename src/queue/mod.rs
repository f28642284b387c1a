pub mod rate;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::{AppError, Result};

use rate::RateLimiter;

/// Bounded fan-out: one spawned job per item, with at most `concurrency`
/// running at once and an optional minimum spacing between job starts.
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    limiter: Option<Arc<RateLimiter>>,
}

impl WorkerPool {
    pub fn new(concurrency: usize, min_interval: Option<Duration>) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(
                concurrency.clamp(1, Semaphore::MAX_PERMITS),
            )),
            limiter: min_interval.map(|interval| Arc::new(RateLimiter::new(interval))),
        }
    }

    /// Run `job` for every item and wait for all of them to settle.
    ///
    /// Results are returned in input order. A job that panics yields
    /// `AppError::Internal` in its slot without affecting the others.
    pub async fn run_all<T, O, F, Fut>(&self, items: Vec<T>, job: F) -> Vec<Result<O>>
    where
        T: Send + 'static,
        O: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
    {
        let job = Arc::new(job);

        let handles: Vec<_> = items
            .into_iter()
            .map(|item| {
                let job = Arc::clone(&job);
                let sem = Arc::clone(&self.semaphore);
                let limiter = self.limiter.clone();

                tokio::spawn(async move {
                    let _permit = sem.acquire_owned().await.ok();
                    if let Some(limiter) = limiter {
                        limiter.acquire().await;
                    }
                    job(item).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(
                handle
                    .await
                    .map_err(|e| AppError::Internal(format!("Worker task failed: {e}"))),
            );
        }
        results
    }
}
