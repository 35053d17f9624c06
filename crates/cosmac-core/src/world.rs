//! Capability contract for the environment a genome runs in.

use crate::scheduler::Simulation;

/// Periodic observer and scorer of a simulation run.
///
/// The scheduler only ever calls [`World::tick`] and [`World::tock`]; the
/// experiment driver calls [`World::fitness`] once the run is over. Both
/// callbacks get mutable access to the run so a world can feed
/// `in_ports`/EF lines between checkpoints.
pub trait World {
    /// Called every `steps_per_tick` steps. Returning `false` stops the run.
    fn tick(&mut self, _sim: &mut Simulation) -> bool {
        true
    }

    /// Called every `steps_per_tick * ticks_per_tock` steps, right after that
    /// step's tick. Returning `false` stops the run.
    fn tock(&mut self, _sim: &mut Simulation) -> bool {
        true
    }

    /// Scores a finished run. Must tolerate runs that never wrote an output port.
    fn fitness(&self, sim: &Simulation) -> f64;
}

/// Reference world: never vetoes, scores the product of `1 + out_port` over all ports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductWorld;

impl World for ProductWorld {
    fn fitness(&self, sim: &Simulation) -> f64 {
        sim.machine
            .ports
            .out_ports
            .iter()
            .map(|value| 1.0 + f64::from(*value))
            .product()
    }
}
