/// Instruction steps between two `Tick` callbacks.
pub const STEPS_PER_TICK: u32 = 16;

/// `Tick` callbacks between two `Tock` callbacks.
pub const TICKS_PER_TOCK: u32 = 16;

/// Step budget of one run.
pub const MAX_STEPS: u32 = 50_000;

/// Periodic checkpoint cadence of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Cadence {
    /// Steps per tick.
    pub steps_per_tick: u32,
    /// Ticks per tock.
    pub ticks_per_tock: u32,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            steps_per_tick: STEPS_PER_TICK,
            ticks_per_tock: TICKS_PER_TOCK,
        }
    }
}

impl Cadence {
    /// Steps per tock, or `None` if the product overflows.
    #[must_use]
    pub const fn steps_per_tock(self) -> Option<u32> {
        self.steps_per_tick.checked_mul(self.ticks_per_tock)
    }

    /// Returns `true` when step number `step` (1-based) ends a tick.
    ///
    /// A zero cadence never reaches a boundary.
    #[must_use]
    pub const fn is_tick(self, step: u32) -> bool {
        self.steps_per_tick != 0 && step % self.steps_per_tick == 0
    }

    /// Returns `true` when step number `step` (1-based) ends a tock.
    #[must_use]
    pub const fn is_tock(self, step: u32) -> bool {
        match self.steps_per_tock() {
            Some(period) if period != 0 => step % period == 0,
            _ => false,
        }
    }
}
