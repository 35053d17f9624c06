//! Errors raised while running a batch.

use cosmac_core::ConfigError;
use thiserror::Error;

/// Failures of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The embedded run configuration was rejected by the core.
    #[error("invalid run configuration: {0}")]
    InvalidRunConfig(#[from] ConfigError),
    /// A batch must contain at least one run.
    #[error("run count must be non-zero")]
    ZeroRuns,
    /// A batch needs at least one worker thread.
    #[error("worker count must be non-zero")]
    ZeroWorkers,
    /// Genomes must contain at least one byte.
    #[error("genome length must be non-zero")]
    ZeroGenomeLength,
    /// One or more worker threads panicked mid-batch.
    #[error("{count} worker thread(s) panicked")]
    WorkerPanicked {
        /// Number of workers that did not return.
        count: usize,
    },
    /// Fewer results arrived than jobs were dispatched.
    #[error("expected {expected} run results, received {received}")]
    ResultLost {
        /// Number of dispatched runs.
        expected: usize,
        /// Number of results collected.
        received: usize,
    },
}
