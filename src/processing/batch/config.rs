use std::time::Duration;

use crate::config::ProcessingConfig;

/// Sizing of the transform worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Transforms allowed to run at once across all requests
    pub workers: usize,
    /// Upper bound for a single file's transform
    pub file_timeout: Option<Duration>,
}

impl BatchConfig {
    pub fn from_processing(processing: &ProcessingConfig) -> Self {
        Self {
            workers: processing.workers.unwrap_or_else(available_cores).max(1),
            file_timeout: processing.file_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: available_cores(),
            file_timeout: None,
        }
    }
}

fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let processing = ProcessingConfig {
            workers: Some(3),
            file_timeout_secs: Some(10),
            vips_concurrency: 0,
        };
        let config = BatchConfig::from_processing(&processing);
        assert_eq!(config.workers, 3);
        assert_eq!(config.file_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn defaults_to_core_count() {
        let config = BatchConfig::from_processing(&ProcessingConfig::default());
        assert!(config.workers >= 1);
        assert_eq!(config.file_timeout, None);
    }
}
