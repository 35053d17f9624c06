//! Batch driver for the COSMAC-subset VM: generates random genomes, scores
//! each in its own world on a pool of worker threads and reports the best.

use tracing_subscriber as _;

/// Driver configuration.
pub mod config;
pub use config::{default_workers, DriverConfig, DEFAULT_GENOME_LEN, DEFAULT_RUNS};

/// Driver error types.
pub mod error;
pub use error::DriverError;

/// Random genome generation.
pub mod genome;
pub use genome::{random_genome, GenomeBatch};

/// Worker pool and batch results.
pub mod pool;
pub use pool::{evaluate, run_batch, BatchSummary, Job, RunResult};

#[cfg(test)]
use rstest as _;
