//! Helper functions for instruction execution.

use crate::decoder::{BranchCondition, Operand};
use crate::state::MachineState;

/// Reads the second ALU operand, consuming the immediate byte when needed.
pub fn read_operand(state: &mut MachineState, source: Operand) -> u8 {
    match source {
        Operand::MemoryX => state.read_at_x(),
        Operand::Immediate => state.fetch_immediate(),
    }
}

/// Evaluates a short-branch predicate against the current machine state.
#[must_use]
pub const fn branch_taken(condition: BranchCondition, state: &MachineState) -> bool {
    let regs = &state.regs;
    match condition {
        BranchCondition::Always => true,
        BranchCondition::Never => false,
        BranchCondition::QClear => !regs.q(),
        BranchCondition::QSet => regs.q(),
        BranchCondition::DZero => regs.d() == 0,
        BranchCondition::DNonZero => regs.d() != 0,
        BranchCondition::DfSet => regs.df(),
        BranchCondition::DfClear => !regs.df(),
        BranchCondition::EfSet(flag) => state.ports.ef_is_set(flag),
        BranchCondition::EfClear(flag) => !state.ports.ef_is_set(flag),
    }
}
