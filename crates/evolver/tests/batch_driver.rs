//! End-to-end batch runs against the core scheduler.

#![allow(clippy::pedantic, clippy::nursery)]

use cosmac_core::{
    run_simulation_with_config, ProductWorld, RunConfig, Simulation, StopReason, World,
};
use evolver::{run_batch, DriverConfig, DriverError, GenomeBatch};
use rand as _;
use rstest::rstest;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

/// Vetoes the first tick and scores the number of steps taken.
struct ImpatientWorld;

impl World for ImpatientWorld {
    fn tick(&mut self, _sim: &mut Simulation) -> bool {
        false
    }

    fn fitness(&self, sim: &Simulation) -> f64 {
        f64::from(sim.step_count())
    }
}

fn small_batch(runs: usize, workers: usize) -> DriverConfig {
    DriverConfig {
        runs,
        workers,
        genome_len: 64,
        seed: Some(2024),
        run: RunConfig {
            max_steps: 5_000,
            ..RunConfig::default()
        },
    }
}

#[test]
fn batch_results_match_direct_runs_of_the_same_genomes() {
    let config = small_batch(10, 4);
    let summary = run_batch(&config, || ProductWorld).expect("batch succeeds");

    let genomes = GenomeBatch::new(config.seed, config.runs, config.genome_len);
    for (genome, result) in genomes.zip(&summary.results) {
        let mut world = ProductWorld;
        let outcome = run_simulation_with_config(&genome, &mut world, &config.run)
            .expect("config is valid");

        assert_eq!(result.completed, outcome.completed());
        assert_eq!(result.steps, outcome.simulation.step_count());
        assert_eq!(result.fingerprint, outcome.simulation.machine.fingerprint());
        assert_eq!(result.out_ports, outcome.simulation.machine.ports.out_ports);
    }
}

#[test]
fn every_run_gets_a_fresh_world() {
    let config = small_batch(6, 2);
    let summary = run_batch(&config, || ImpatientWorld).expect("batch succeeds");

    for result in &summary.results {
        assert!(!result.completed);
        // Either halted early or stopped by the veto on the first tick.
        assert!(result.steps <= 16, "run {} took {} steps", result.index, result.steps);
    }
    assert!(summary.max_fitness <= 16.0);
}

#[rstest]
#[case::serial(1)]
#[case::pair(2)]
#[case::more_workers_than_runs(32)]
fn worker_count_does_not_change_the_outcome(#[case] workers: usize) {
    let reference = run_batch(&small_batch(8, 1), || ProductWorld).expect("batch succeeds");
    let summary = run_batch(&small_batch(8, workers), || ProductWorld).expect("batch succeeds");

    assert_eq!(summary, reference);
}

#[test]
fn invalid_run_config_surfaces_as_driver_error() {
    let mut config = small_batch(2, 1);
    config.run.cadence.steps_per_tick = 0;

    let error = run_batch(&config, || ProductWorld).expect_err("config rejected");
    assert!(matches!(error, DriverError::InvalidRunConfig(_)));
}

#[test]
fn halting_genomes_are_scored_too() {
    let mut world = ProductWorld;
    let outcome = run_simulation_with_config(&[0x68], &mut world, &RunConfig::default())
        .expect("config is valid");
    assert_eq!(outcome.stop_reason, StopReason::Halted);
    assert!((world.fitness(&outcome.simulation) - 1.0).abs() < f64::EPSILON);
}
