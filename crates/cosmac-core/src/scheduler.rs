//! Deterministic execution scheduler.
//!
//! Drives [`step_one`] through the step/tick/tock cadence and reports whether
//! the run used its full step budget or stopped early.

use tracing::debug;

use crate::api::{RunConfig, StopReason};
use crate::error::ConfigError;
use crate::execute::step_one;
use crate::state::MachineState;
use crate::world::World;

/// One simulation run: the owned machine plus its progress counters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Simulation {
    step_count: u32,
    tick_count: u32,
    tock_count: u32,
    /// Machine state mutated by every step.
    pub machine: MachineState,
}

impl Simulation {
    /// Wraps a machine with all counters at zero.
    #[must_use]
    pub const fn new(machine: MachineState) -> Self {
        Self {
            step_count: 0,
            tick_count: 0,
            tock_count: 0,
            machine,
        }
    }

    /// Number of the step executed last (1-based); `0` before the first step.
    #[must_use]
    pub const fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Number of `tick` callbacks issued so far.
    #[must_use]
    pub const fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Number of `tock` callbacks issued so far.
    #[must_use]
    pub const fn tock_count(&self) -> u32 {
        self.tock_count
    }
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Final run state.
    pub simulation: Simulation,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

impl RunOutcome {
    /// Returns `true` when the full step budget was used without halt or veto.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.stop_reason.is_completed()
    }

    /// Splits into `(final run state, completed)`.
    #[must_use]
    pub fn into_parts(self) -> (Simulation, bool) {
        let completed = self.completed();
        (self.simulation, completed)
    }
}

/// Runs `genome` under the reference cadence and step budget.
pub fn run_simulation<W: World + ?Sized>(genome: &[u8], world: &mut W) -> RunOutcome {
    drive(genome, world, &RunConfig::default())
}

/// Runs `genome` under an explicit configuration.
///
/// # Errors
///
/// Returns a [`ConfigError`] when `config` fails [`RunConfig::validate`].
pub fn run_simulation_with_config<W: World + ?Sized>(
    genome: &[u8],
    world: &mut W,
    config: &RunConfig,
) -> Result<RunOutcome, ConfigError> {
    config.validate()?;
    Ok(drive(genome, world, config))
}

fn drive<W: World + ?Sized>(genome: &[u8], world: &mut W, config: &RunConfig) -> RunOutcome {
    let mut sim = Simulation::new(MachineState::from_genome(genome));
    let cadence = config.cadence;

    let stop_reason = 'run: {
        for step in 1..=config.max_steps {
            sim.step_count = step;

            if !step_one(&mut sim.machine, config.arithmetic).should_continue() {
                break 'run StopReason::Halted;
            }

            if cadence.is_tick(step) {
                sim.tick_count += 1;
                if !world.tick(&mut sim) {
                    break 'run StopReason::TickVeto;
                }

                if cadence.is_tock(step) {
                    sim.tock_count += 1;
                    if !world.tock(&mut sim) {
                        break 'run StopReason::TockVeto;
                    }
                }
            }
        }
        StopReason::BudgetExhausted
    };

    debug!(
        steps = sim.step_count,
        ticks = sim.tick_count,
        tocks = sim.tock_count,
        reason = ?stop_reason,
        "simulation finished"
    );

    RunOutcome {
        simulation: sim,
        stop_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::{run_simulation, run_simulation_with_config, Simulation};
    use crate::api::{RunConfig, StopReason};
    use crate::encoding::HALT_OPCODE;
    use crate::error::ConfigError;
    use crate::timing::{Cadence, MAX_STEPS};
    use crate::world::{ProductWorld, World};

    #[derive(Default)]
    struct CountingWorld {
        ticks: Vec<u32>,
        tocks: Vec<u32>,
        veto_tick_at: Option<u32>,
        veto_tock_at: Option<u32>,
    }

    impl World for CountingWorld {
        fn tick(&mut self, sim: &mut Simulation) -> bool {
            self.ticks.push(sim.step_count());
            self.veto_tick_at != Some(sim.tick_count())
        }

        fn tock(&mut self, sim: &mut Simulation) -> bool {
            self.tocks.push(sim.step_count());
            self.veto_tock_at != Some(sim.tock_count())
        }

        fn fitness(&self, _sim: &Simulation) -> f64 {
            0.0
        }
    }

    #[test]
    fn load_then_halt_scenario() {
        let outcome = run_simulation(&[0xF8, 0x05, HALT_OPCODE], &mut ProductWorld);
        assert!(!outcome.completed());
        assert_eq!(outcome.stop_reason, StopReason::Halted);
        assert_eq!(outcome.simulation.step_count(), 2);
        assert_eq!(outcome.simulation.machine.regs.d(), 5);
        assert_eq!(outcome.simulation.machine.ports.out_ports, [0; 8]);
    }

    #[test]
    fn all_halt_memory_stops_on_first_step() {
        let outcome = run_simulation(&[HALT_OPCODE; 256], &mut ProductWorld);
        let (sim, completed) = outcome.into_parts();
        assert!(!completed);
        assert_eq!(sim.step_count(), 1);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn all_nop_memory_runs_the_full_budget() {
        let mut world = CountingWorld::default();
        let outcome = run_simulation(&[], &mut world);
        assert!(outcome.completed());
        assert_eq!(outcome.simulation.step_count(), MAX_STEPS);
        assert_eq!(outcome.simulation.tick_count(), 3125);
        assert_eq!(outcome.simulation.tock_count(), 195);
        assert_eq!(world.ticks.first(), Some(&16));
        assert_eq!(world.tocks.first(), Some(&256));
        // 50000 increments of R0 from zero.
        assert_eq!(outcome.simulation.machine.regs.program_counter(), 50_000);
    }

    #[test]
    fn tick_veto_stops_the_run_early() {
        let mut world = CountingWorld {
            veto_tick_at: Some(3),
            ..CountingWorld::default()
        };
        let outcome = run_simulation(&[], &mut world);
        assert_eq!(outcome.stop_reason, StopReason::TickVeto);
        assert_eq!(outcome.simulation.step_count(), 48);
        assert!(world.tocks.is_empty());
    }

    #[test]
    fn tock_veto_follows_the_tick_of_the_same_step() {
        let mut world = CountingWorld {
            veto_tock_at: Some(2),
            ..CountingWorld::default()
        };
        let outcome = run_simulation(&[], &mut world);
        assert_eq!(outcome.stop_reason, StopReason::TockVeto);
        assert_eq!(outcome.simulation.step_count(), 512);
        assert_eq!(outcome.simulation.tick_count(), 32);
        assert_eq!(world.ticks.last(), Some(&512));
    }

    #[test]
    fn custom_budget_and_cadence_are_honored() {
        let config = RunConfig {
            cadence: Cadence {
                steps_per_tick: 4,
                ticks_per_tock: 2,
            },
            max_steps: 20,
            ..RunConfig::default()
        };
        let mut world = CountingWorld::default();
        let outcome =
            run_simulation_with_config(&[], &mut world, &config).expect("config is valid");
        assert!(outcome.completed());
        assert_eq!(world.ticks, vec![4, 8, 12, 16, 20]);
        assert_eq!(world.tocks, vec![8, 16]);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = RunConfig {
            max_steps: 0,
            ..RunConfig::default()
        };
        let error = run_simulation_with_config(&[], &mut ProductWorld, &config)
            .expect_err("zero budget must be rejected");
        assert_eq!(error, ConfigError::ZeroStepBudget);
    }

    #[test]
    fn world_can_drive_inputs_between_ticks() {
        struct Feeder;

        impl World for Feeder {
            fn tick(&mut self, sim: &mut Simulation) -> bool {
                sim.machine.ports.in_ports[1] = 0x2A;
                true
            }

            fn fitness(&self, sim: &Simulation) -> f64 {
                f64::from(sim.machine.ports.out_ports[2])
            }
        }

        // 16 NOPs, then INP 1 / OUT 2 / halt.
        let mut genome = vec![0x00; 16];
        genome.extend_from_slice(&[0x69, 0x62, HALT_OPCODE]);
        let mut world = Feeder;
        let outcome = run_simulation(&genome, &mut world);
        assert_eq!(outcome.stop_reason, StopReason::Halted);
        assert!((world.fitness(&outcome.simulation) - 42.0).abs() < f64::EPSILON);
    }
}
