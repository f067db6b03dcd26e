use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::{ImageTask, OperationSpec, TransformResult, UploadedFile};
use crate::processing::archive;
use crate::utils::{validate_batch, ConverterError, ConverterResult};
use crate::worker::WorkerPool;

/// Runs one batch: validate, transform every file, zip the results.
///
/// A batch is all-or-nothing. The first failed transform fails the batch and
/// drops the remaining tasks; no archive is produced.
#[derive(Clone)]
pub struct BatchProcessor {
    pool: WorkerPool,
}

impl BatchProcessor {
    pub fn new(pool: WorkerPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Transforms `files` with `operation` and returns the serialised archive.
    pub async fn run(
        &self,
        files: Vec<UploadedFile>,
        operation: &OperationSpec,
    ) -> ConverterResult<Vec<u8>> {
        let started = Instant::now();
        let total = files.len();

        let results = self.transform_all(files, operation).await?;

        let archive = tokio::task::spawn_blocking(move || archive::build(&results))
            .await
            .map_err(|e| ConverterError::worker(format!("Archive task failed: {e}")))??;

        info!(
            "Batch {} completed: {} files, {} byte archive in {:?}",
            operation.kind(),
            total,
            archive.len(),
            started.elapsed()
        );
        Ok(archive)
    }

    /// Transforms every file concurrently and returns results in input order.
    pub async fn transform_all(
        &self,
        files: Vec<UploadedFile>,
        operation: &OperationSpec,
    ) -> ConverterResult<Vec<TransformResult>> {
        validate_batch(&files, operation)?;

        let total = files.len();
        debug!("Processing batch of {} tasks ({})", total, operation.kind());

        let mut tasks = JoinSet::new();
        for task in ImageTask::for_batch(files, operation) {
            let pool = self.pool.clone();
            tasks.spawn(async move { pool.process(task).await });
        }

        let mut slots: Vec<Option<TransformResult>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| ConverterError::worker(format!("Transform task failed: {e}")))
                .and_then(|outcome| outcome);

            match outcome {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    warn!("Batch {} aborted: {}", operation.kind(), e);
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| ConverterError::worker(format!("No result for file #{index}")))
            })
            .collect()
    }
}
