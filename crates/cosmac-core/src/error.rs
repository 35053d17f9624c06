use thiserror::Error;

/// Rejected [`RunConfig`](crate::RunConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// Tick cadence of zero steps would never reach a boundary.
    #[error("steps per tick must be non-zero")]
    ZeroStepsPerTick,
    /// Tock cadence of zero ticks would never reach a boundary.
    #[error("ticks per tock must be non-zero")]
    ZeroTicksPerTock,
    /// A run must be allowed at least one step.
    #[error("step budget must be non-zero")]
    ZeroStepBudget,
    /// `steps_per_tick * ticks_per_tock` does not fit in a step counter.
    #[error("tock cadence of {steps_per_tick} x {ticks_per_tock} steps overflows")]
    CadenceOverflow {
        /// Configured steps per tick.
        steps_per_tick: u32,
        /// Configured ticks per tock.
        ticks_per_tock: u32,
    },
}

/// Rejected memory image imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MemoryImageError {
    /// Image length differs from the fixed address-space size.
    #[error("memory image must be {expected} bytes, got {actual}")]
    WrongLength {
        /// Required image length.
        expected: usize,
        /// Supplied image length.
        actual: usize,
    },
}
