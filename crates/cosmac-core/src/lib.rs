//! Deterministic virtual machine for a subset of the COSMAC 8-bit architecture.
//!
//! Genomes (arbitrary byte strings) are loaded at address 0 and executed as
//! machine code; the output ports they leave behind are scored by a
//! [`World`].

/// Memory model primitives for the wraparound address space.
pub mod memory;
pub use memory::{address_of, Memory, MEMORY_BYTES};

/// Configuration and memory-image error types.
pub mod error;
pub use error::{ConfigError, MemoryImageError};

/// Public host-facing configuration and outcome types.
pub mod api;
pub use api::{ArithmeticConvention, RunConfig, StepOutcome, StopReason};

/// Machine state model primitives.
pub mod state;
pub use state::{
    ExternalFlag, MachineState, PortBank, Register, RegisterFile, EF_MASK, PORT_COUNT,
    REGISTER_COUNT,
};

/// Opcode group classification.
pub mod encoding;
pub use encoding::{split_opcode, OpcodeGroup, HALT_OPCODE, NOP_OPCODE};

/// Total byte-to-instruction decoder.
pub mod decoder;
pub use decoder::{AluOp, BranchCondition, Decoder, Instruction, Operand, Shift, DECODE_TABLE};

/// Tick/tock cadence and step budget.
pub mod timing;
pub use timing::{Cadence, MAX_STEPS, STEPS_PER_TICK, TICKS_PER_TOCK};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{execute_instruction, step_one, ExecuteOutcome};

/// World capability contract and the reference product world.
pub mod world;
pub use world::{ProductWorld, World};

/// Step/tick/tock scheduler.
pub mod scheduler;
pub use scheduler::{run_simulation, run_simulation_with_config, RunOutcome, Simulation};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
