//! Batch configuration and its defaults.

use std::num::NonZeroUsize;
use std::thread;

use cosmac_core::RunConfig;

use crate::error::DriverError;

/// Runs per batch when none is requested.
pub const DEFAULT_RUNS: usize = 100;
/// Genome length in bytes when none is requested.
pub const DEFAULT_GENOME_LEN: usize = 64;

/// Configuration of one batch of independent runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Number of genomes generated and scored.
    pub runs: usize,
    /// Number of worker threads.
    pub workers: usize,
    /// Length of every random genome.
    pub genome_len: usize,
    /// Seed for genome generation; fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Configuration handed to every simulation run.
    pub run: RunConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            workers: default_workers(),
            genome_len: DEFAULT_GENOME_LEN,
            seed: None,
            run: RunConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Checks batch sizes and the embedded run configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`DriverError`] found, checking the run
    /// configuration last.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.runs == 0 {
            return Err(DriverError::ZeroRuns);
        }
        if self.workers == 0 {
            return Err(DriverError::ZeroWorkers);
        }
        if self.genome_len == 0 {
            return Err(DriverError::ZeroGenomeLength);
        }
        self.run.validate()?;
        Ok(())
    }

    /// Worker threads actually worth spawning for this batch.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.workers.min(self.runs).max(1)
    }
}

/// Available hardware parallelism, or one thread when it cannot be queried.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
