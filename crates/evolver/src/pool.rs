//! Worker pool that scores a batch of random genomes.
//!
//! The orchestrator feeds jobs through a bounded channel shared by every
//! worker and collects one [`RunResult`] per job over an unbounded results
//! channel. Runs share nothing: each job builds its own world and machine.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use cosmac_core::{run_simulation_with_config, RunConfig, World, PORT_COUNT};
use tracing::{debug, info, warn};

use crate::config::DriverConfig;
use crate::error::DriverError;
use crate::genome::GenomeBatch;

/// One genome queued for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Position of the genome in its batch.
    pub index: usize,
    /// Bytes loaded at address 0.
    pub genome: Vec<u8>,
}

/// Score and final state summary of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Position of the genome in its batch.
    pub index: usize,
    /// `true` when the run used its full step budget.
    pub completed: bool,
    /// Number of the last executed step.
    pub steps: u32,
    /// Score assigned by the world.
    pub fitness: f64,
    /// Digest of the final machine state.
    pub fingerprint: u64,
    /// Output ports at the end of the run.
    pub out_ports: [u8; PORT_COUNT],
}

/// Collected results of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// One result per run, ordered by index.
    pub results: Vec<RunResult>,
    /// First run reaching `max_fitness`, if any run scored above zero.
    pub best: Option<RunResult>,
    /// Highest fitness seen; `0.0` when no run scored above zero.
    pub max_fitness: f64,
}

impl BatchSummary {
    /// Orders `results` by index and picks the best one.
    #[must_use]
    pub fn from_results(mut results: Vec<RunResult>) -> Self {
        results.sort_by_key(|result| result.index);

        let mut max_fitness = 0.0;
        let mut best = None;
        for result in &results {
            if max_fitness < result.fitness {
                max_fitness = result.fitness;
                best = Some(result.clone());
            }
        }

        Self {
            results,
            best,
            max_fitness,
        }
    }

    /// Results whose fitness is strictly positive.
    pub fn scored(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(|result| result.fitness > 0.0)
    }
}

/// Runs one genome in a world of its own and scores it.
///
/// # Errors
///
/// Returns [`DriverError::InvalidRunConfig`] when `run_config` is rejected.
pub fn evaluate<W: World>(
    job: &Job,
    world: &mut W,
    run_config: &RunConfig,
) -> Result<RunResult, DriverError> {
    let outcome = run_simulation_with_config(&job.genome, world, run_config)?;
    let fitness = world.fitness(&outcome.simulation);
    let sim = &outcome.simulation;

    Ok(RunResult {
        index: job.index,
        completed: outcome.completed(),
        steps: sim.step_count(),
        fitness,
        fingerprint: sim.machine.fingerprint(),
        out_ports: sim.machine.ports.out_ports,
    })
}

/// Generates and scores `config.runs` random genomes on a pool of threads.
///
/// `make_world` is called once per run, on the worker executing it.
///
/// # Errors
///
/// Returns a [`DriverError`] when `config` is invalid, a worker panics, or
/// fewer results arrive than jobs were dispatched.
pub fn run_batch<W, F>(config: &DriverConfig, make_world: F) -> Result<BatchSummary, DriverError>
where
    W: World,
    F: Fn() -> W + Sync,
{
    config.validate()?;

    let workers = config.effective_workers();
    info!(
        runs = config.runs,
        workers,
        genome_len = config.genome_len,
        seed = ?config.seed,
        "dispatching batch"
    );

    let (job_tx, job_rx) = mpsc::sync_channel::<Job>(workers);
    // Workers hold the only handles, so the queue closes once all of them exit.
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (result_tx, result_rx) = mpsc::channel::<RunResult>();

    let (results, panicked, failure) = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let jobs = Arc::clone(&job_rx);
                let results = result_tx.clone();
                let make_world = &make_world;
                let run_config = &config.run;
                scope.spawn(move || work(worker, &jobs, &results, make_world, run_config))
            })
            .collect();
        drop(job_rx);
        drop(result_tx);

        let genomes = GenomeBatch::new(config.seed, config.runs, config.genome_len);
        for (index, genome) in genomes.enumerate() {
            if job_tx.send(Job { index, genome }).is_err() {
                warn!(index, "job queue closed before dispatch finished");
                break;
            }
        }
        drop(job_tx);

        let results: Vec<RunResult> = result_rx.iter().collect();

        let mut panicked = 0;
        let mut failure = None;
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    warn!(%error, "worker stopped early");
                    failure.get_or_insert(error);
                }
                Err(_) => panicked += 1,
            }
        }
        (results, panicked, failure)
    });

    if panicked > 0 {
        warn!(count = panicked, "worker threads panicked");
        return Err(DriverError::WorkerPanicked { count: panicked });
    }
    if let Some(error) = failure {
        return Err(error);
    }
    if results.len() != config.runs {
        return Err(DriverError::ResultLost {
            expected: config.runs,
            received: results.len(),
        });
    }

    let summary = BatchSummary::from_results(results);
    info!(
        max_fitness = summary.max_fitness,
        best = ?summary.best.as_ref().map(|best| best.index),
        "batch finished"
    );
    Ok(summary)
}

fn work<W, F>(
    worker: usize,
    jobs: &Mutex<Receiver<Job>>,
    results: &Sender<RunResult>,
    make_world: &F,
    run_config: &RunConfig,
) -> Result<(), DriverError>
where
    W: World,
    F: Fn() -> W,
{
    let mut handled = 0_usize;
    loop {
        let job = {
            let Ok(queue) = jobs.lock() else {
                break;
            };
            let Ok(job) = queue.recv() else {
                break;
            };
            job
        };

        let mut world = make_world();
        let result = evaluate(&job, &mut world, run_config)?;
        debug!(
            worker,
            index = result.index,
            completed = result.completed,
            steps = result.steps,
            fitness = result.fitness,
            fingerprint = result.fingerprint,
            "run scored"
        );

        if results.send(result).is_err() {
            break;
        }
        handled += 1;
    }

    debug!(worker, jobs = handled, "worker drained job queue");
    Ok(())
}
