//! Instruction execution pipeline.
//!
//! One step is:
//! 1. Fetch the opcode at `M(R(P))`
//! 2. Decode it through the precomputed table
//! 3. Apply its effect (immediate operands pre-increment `R(P)`)
//! 4. Increment `R(P)`, where `P` is read after the effect so `SEP` takes hold
//!
//! Only the halt opcode skips step 4.

mod alu;
mod flags;
mod helpers;

pub use alu::{apply_alu, apply_shift};
pub use flags::{AluResult, FlagsUpdate};
pub use helpers::{branch_taken, read_operand};

use crate::api::{ArithmeticConvention, StepOutcome};
use crate::decoder::{Instruction, DECODE_TABLE};
use crate::state::MachineState;

/// Outcome of applying one decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Effect applied; the program counter still needs its final increment.
    Continue,
    /// The halt opcode; nothing was changed.
    Halt,
}

/// Applies the effect of `instr` to `state`, excluding the final `R(P)` increment.
pub fn execute_instruction(
    instr: Instruction,
    state: &mut MachineState,
    convention: ArithmeticConvention,
) -> ExecuteOutcome {
    match instr {
        Instruction::Nop
        | Instruction::Return
        | Instruction::Disable
        | Instruction::LongBranch(_) => {}
        Instruction::LoadVia(reg) => {
            let value = state.memory.read(state.regs.get(reg));
            state.regs.set_d(value);
        }
        Instruction::Increment(reg) => state.regs.increment(reg),
        Instruction::Decrement(reg) => state.regs.decrement(reg),
        Instruction::Branch(condition) => {
            let taken = branch_taken(condition, state);
            state.short_branch(taken);
        }
        Instruction::LoadAdvance(reg) => {
            let value = state.memory.read(state.regs.get(reg));
            state.regs.set_d(value);
            state.regs.increment(reg);
        }
        Instruction::Store(reg) => {
            state.memory.write(state.regs.get(reg), state.regs.d());
        }
        Instruction::IncrementX => {
            let x = state.regs.x();
            state.regs.increment(x);
            if convention == ArithmeticConvention::Legacy {
                state.ports.out_ports[0] = state.regs.d();
            }
        }
        Instruction::Output(port) => {
            state.ports.out_ports[usize::from(port)] = state.regs.d();
        }
        Instruction::Halt => return ExecuteOutcome::Halt,
        Instruction::Input(port) => {
            let value = state.ports.in_ports[usize::from(port)];
            state.regs.set_d(value);
        }
        Instruction::LoadXAdvance => {
            let value = state.read_at_x();
            state.regs.set_d(value);
            let x = state.regs.x();
            state.regs.increment(x);
        }
        Instruction::StoreXDecrement => {
            state.memory.write(state.regs.data_pointer(), state.regs.d());
            let x = state.regs.x();
            state.regs.decrement(x);
        }
        Instruction::Alu { op, source } => {
            let operand = read_operand(state, source);
            let result = apply_alu(
                op,
                source,
                state.regs.d(),
                operand,
                state.regs.df(),
                convention,
            );
            commit_alu(state, result);
        }
        Instruction::Shift(shift) => {
            let result = apply_shift(shift, state.regs.d(), state.regs.df(), convention);
            commit_alu(state, result);
        }
        Instruction::ResetQ => state.regs.set_q(false),
        Instruction::SetQ => state.regs.set_q(true),
        Instruction::GetLow(reg) => {
            let [low, _] = state.regs.get(reg).to_le_bytes();
            state.regs.set_d(low);
        }
        Instruction::GetHigh(reg) => {
            let [_, high] = state.regs.get(reg).to_le_bytes();
            state.regs.set_d(high);
        }
        Instruction::PutLow(reg) => {
            let d = state.regs.d();
            state.regs.set_low(reg, d);
        }
        Instruction::PutHigh(reg) => {
            let d = state.regs.d();
            state.regs.set_high(reg, d);
        }
        Instruction::SetP(reg) => state.regs.set_p(reg),
        Instruction::SetX(reg) => state.regs.set_x(reg),
    }

    ExecuteOutcome::Continue
}

/// Writes an ALU result back into `D` and `DF`.
pub fn commit_alu(state: &mut MachineState, result: AluResult) {
    state.regs.set_d(result.d);
    let df = result.flags.apply(state.regs.df());
    state.regs.set_df(df);
}

/// Fetches, decodes and executes one instruction.
///
/// Never fails: every opcode byte has a defined effect and every address wraps.
pub fn step_one(state: &mut MachineState, convention: ArithmeticConvention) -> StepOutcome {
    let instr = DECODE_TABLE[usize::from(state.current_opcode())];

    match execute_instruction(instr, state, convention) {
        ExecuteOutcome::Halt => StepOutcome::Halted,
        ExecuteOutcome::Continue => {
            let p = state.regs.p();
            state.regs.increment(p);
            StepOutcome::Retired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{execute_instruction, step_one, ExecuteOutcome};
    use crate::api::{ArithmeticConvention, StepOutcome};
    use crate::decoder::Instruction;
    use crate::encoding::HALT_OPCODE;
    use crate::state::{MachineState, Register};

    const LEGACY: ArithmeticConvention = ArithmeticConvention::Legacy;

    #[test]
    fn halt_leaves_the_program_counter_on_the_opcode() {
        let mut state = MachineState::from_genome(&[HALT_OPCODE]);
        assert_eq!(step_one(&mut state, LEGACY), StepOutcome::Halted);
        assert_eq!(state.regs.program_counter(), 0);
    }

    #[test]
    fn nop_only_advances_the_program_counter() {
        let mut state = MachineState::from_genome(&[0x00]);
        let before = state.clone();
        assert_eq!(step_one(&mut state, LEGACY), StepOutcome::Retired);
        assert_eq!(state.regs.program_counter(), 1);
        state.regs.set(Register::R0, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn load_immediate_consumes_its_operand() {
        let mut state = MachineState::from_genome(&[0xF8, 0x05, HALT_OPCODE]);
        assert_eq!(step_one(&mut state, LEGACY), StepOutcome::Retired);
        assert_eq!(state.regs.d(), 5);
        assert_eq!(state.regs.program_counter(), 2);
        assert_eq!(step_one(&mut state, LEGACY), StepOutcome::Halted);
    }

    #[test]
    fn set_p_moves_the_final_increment_to_the_new_counter() {
        let mut state = MachineState::from_genome(&[0xD3]);
        state.regs.set(Register::R3, 0x0040);
        step_one(&mut state, LEGACY);
        assert_eq!(state.regs.p(), Register::R3);
        assert_eq!(state.regs.get(Register::R3), 0x0041);
        assert_eq!(state.regs.get(Register::R0), 0x0000);
    }

    #[test]
    fn increment_x_writes_port_zero_only_under_legacy() {
        let mut legacy = MachineState::from_genome(&[0x60]);
        legacy.regs.set_d(9);
        legacy.regs.set_x(Register::R2);
        execute_instruction(Instruction::IncrementX, &mut legacy, LEGACY);
        assert_eq!(legacy.regs.get(Register::R2), 1);
        assert_eq!(legacy.ports.out_ports[0], 9);

        let mut consistent = MachineState::from_genome(&[0x60]);
        consistent.regs.set_d(9);
        consistent.regs.set_x(Register::R2);
        execute_instruction(
            Instruction::IncrementX,
            &mut consistent,
            ArithmeticConvention::Consistent,
        );
        assert_eq!(consistent.regs.get(Register::R2), 1);
        assert_eq!(consistent.ports.out_ports[0], 0);
    }

    #[test]
    fn halt_instruction_reports_halt_without_side_effects() {
        let mut state = MachineState::from_genome(&[HALT_OPCODE]);
        let before = state.clone();
        assert_eq!(
            execute_instruction(Instruction::Halt, &mut state, LEGACY),
            ExecuteOutcome::Halt
        );
        assert_eq!(state, before);
    }
}
