//! Public host-facing configuration and outcome types.

use crate::error::ConfigError;
use crate::timing::{Cadence, MAX_STEPS};

/// Carry/borrow convention used by the arithmetic opcodes.
///
/// Only `DF` computation and a handful of carry-chained opcodes differ; all
/// other opcodes behave identically under both conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ArithmeticConvention {
    /// Bit-for-bit compatible with genomes scored by earlier experiments,
    /// including their 8-bit-truncated flag comparisons.
    #[default]
    Legacy,
    /// Internally consistent: `DF` is a borrow flag for every subtraction,
    /// borrow-in is subtracted, flags use wide arithmetic and `SHRC` rotates
    /// through `DF`.
    Consistent,
}

/// Top-level configuration of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RunConfig {
    /// Tick/tock checkpoint cadence.
    pub cadence: Cadence,
    /// Maximum number of steps executed before the run counts as completed.
    pub max_steps: u32,
    /// Carry/borrow convention.
    pub arithmetic: ArithmeticConvention,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cadence: Cadence::default(),
            max_steps: MAX_STEPS,
            arithmetic: ArithmeticConvention::Legacy,
        }
    }
}

impl RunConfig {
    /// Checks that the cadence and step budget can drive a run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first zero or overflowing value.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let Cadence {
            steps_per_tick,
            ticks_per_tock,
        } = self.cadence;

        if steps_per_tick == 0 {
            return Err(ConfigError::ZeroStepsPerTick);
        }
        if ticks_per_tock == 0 {
            return Err(ConfigError::ZeroTicksPerTock);
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }
        if self.cadence.steps_per_tock().is_none() {
            return Err(ConfigError::CadenceOverflow {
                steps_per_tick,
                ticks_per_tock,
            });
        }
        Ok(())
    }
}

/// Output status from one instruction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Instruction retired and the program counter advanced.
    Retired,
    /// The halt opcode was fetched; the program counter was left on it.
    Halted,
}

impl StepOutcome {
    /// Returns `true` when execution may continue.
    #[must_use]
    pub const fn should_continue(self) -> bool {
        matches!(self, Self::Retired)
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StopReason {
    /// The halt opcode was executed.
    Halted,
    /// The world's `tick` callback returned `false`.
    TickVeto,
    /// The world's `tock` callback returned `false`.
    TockVeto,
    /// The full step budget ran out; the only completed outcome.
    BudgetExhausted,
}

impl StopReason {
    /// Returns `true` only when the run used its whole step budget.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::BudgetExhausted)
    }
}
