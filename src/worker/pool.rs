use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::core::{ImageTask, TransformResult};
use crate::processing::libvips;
use crate::processing::BatchConfig;
use crate::utils::{ConverterError, ConverterResult, TransformError};

/// Bounded pool for CPU-bound transforms.
///
/// At most `worker_count` transforms run at once across every request; the
/// rest wait for a permit. Each admitted transform runs on tokio's blocking
/// thread pool and holds its permit until the blocking work really ends, even
/// when the caller has already given up on it.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
    file_timeout: Option<Duration>,
}

impl WorkerPool {
    pub fn new(config: &BatchConfig) -> Self {
        let worker_count = config.workers.max(1);
        debug!("Creating WorkerPool with {} workers", worker_count);
        Self {
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            worker_count,
            file_timeout: config.file_timeout,
        }
    }

    /// Runs one task and returns its result tagged with the task's index.
    pub async fn process(&self, task: ImageTask) -> ConverterResult<(usize, TransformResult)> {
        let permit = self.semaphore.clone().acquire_owned().await.map_err(|e| {
            warn!("Failed to acquire semaphore: {}", e);
            ConverterError::worker(format!("Failed to acquire worker: {e}"))
        })?;

        let index = task.index;
        let file_name = task.file.name.clone();
        let slot = WorkerSlot::occupy(permit, self.active_workers.clone());
        debug!(
            "Worker started - Active: {}/{}, Task: {}",
            slot.current, self.worker_count, file_name
        );

        let handle = tokio::task::spawn_blocking(move || {
            let _slot = slot;
            libvips::apply(&task.file, &task.operation)
        });

        let joined = match self.file_timeout {
            Some(limit) => tokio::time::timeout(limit, handle).await.map_err(|_| {
                TransformError::TimedOut {
                    file: file_name.clone(),
                    secs: limit.as_secs(),
                }
            })?,
            None => handle.await,
        };

        let result = joined.map_err(|e| TransformError::Aborted {
            file: file_name,
            message: e.to_string(),
        })??;

        Ok((index, result))
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    #[cfg(test)]
    pub(crate) fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// A running transform's hold on the pool.
///
/// Releases the active count and then the permit when the blocking work
/// ends, whether it returned or panicked.
struct WorkerSlot {
    active: Arc<AtomicUsize>,
    current: usize,
    _permit: OwnedSemaphorePermit,
}

impl WorkerSlot {
    fn occupy(permit: OwnedSemaphorePermit, active: Arc<AtomicUsize>) -> Self {
        let current = active.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            active,
            current,
            _permit: permit,
        }
    }
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
