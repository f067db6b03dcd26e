//! Application state shared by the HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::config::Config;
use crate::processing::libvips::runtime;
use crate::processing::{BatchConfig, BatchProcessor};
use crate::utils::ConverterResult;
use crate::worker::WorkerPool;

/// State handed to every request.
///
/// Cloning is cheap; all clones share one worker pool, so the transform
/// bound holds across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    processor: Arc<BatchProcessor>,
    config: Arc<Config>,
    started_at: Instant,
}

impl AppState {
    /// Creates the state, starting libvips first if this process has not yet.
    pub fn new(config: Config) -> ConverterResult<Self> {
        runtime::ensure_started(config.processing.vips_concurrency)?;

        let batch = BatchConfig::from_processing(&config.processing);
        debug!(
            "Batch processing: {} workers, file timeout {:?}",
            batch.workers, batch.file_timeout
        );

        Ok(Self {
            processor: Arc::new(BatchProcessor::new(WorkerPool::new(&batch))),
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }

    pub fn processor(&self) -> &BatchProcessor {
        &self.processor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
