//! Instruction decoder.
//!
//! Decoding is a total function: each of the 256 opcode bytes maps to exactly
//! one [`Instruction`], so there is no decode fault path.

use crate::encoding::{split_opcode, OpcodeGroup};
use crate::state::{ExternalFlag, Register};

/// Predicate tested by the `3N` short-branch family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchCondition {
    /// `30 BR`: always taken.
    Always,
    /// `31`: taken when `Q` is clear.
    QClear,
    /// `32 BZ`: taken when `D == 0`.
    DZero,
    /// `33 BDF`: taken when `DF` is set.
    DfSet,
    /// `34..37 B1..B4`: taken when the EF line is asserted.
    EfSet(ExternalFlag),
    /// `38 SKP`: never taken; skips the target byte.
    Never,
    /// `39`: taken when `Q` is set.
    QSet,
    /// `3A BNZ`: taken when `D != 0`.
    DNonZero,
    /// `3B BNF`: taken when `DF` is clear.
    DfClear,
    /// `3C..3F BN1..BN4`: taken when the EF line is released.
    EfClear(ExternalFlag),
}

impl BranchCondition {
    /// Decodes the `N` nibble of a `3N` opcode.
    #[must_use]
    pub const fn from_u4(n: u8) -> Self {
        match n & 0x0F {
            0x0 => Self::Always,
            0x1 => Self::QClear,
            0x2 => Self::DZero,
            0x3 => Self::DfSet,
            0x4..=0x7 => Self::EfSet(ExternalFlag::from_u2(n)),
            0x8 => Self::Never,
            0x9 => Self::QSet,
            0xA => Self::DNonZero,
            0xB => Self::DfClear,
            _ => Self::EfClear(ExternalFlag::from_u2(n)),
        }
    }
}

/// Second operand of an ALU instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Byte at `M(R(X))`.
    MemoryX,
    /// Byte following the opcode.
    Immediate,
}

/// Accumulator operations that combine `D` with an [`Operand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `D = operand`.
    Load,
    /// `D |= operand`.
    Or,
    /// `D &= operand`.
    And,
    /// `D ^= operand`.
    Xor,
    /// `D += operand`, carry out into `DF`.
    Add,
    /// `D = operand - D`, borrow into `DF`.
    SubtractD,
    /// `D = D - operand`, borrow into `DF`.
    SubtractM,
    /// `D += operand + DF`, carry out into `DF`.
    AddCarry,
    /// `operand - D` with `DF` as carry-in.
    SubtractDBorrow,
    /// `D - operand` with `DF` as carry-in.
    SubtractMBorrow,
}

/// Accumulator shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    /// `F6 SHR`: logical shift right, `DF` untouched.
    Right,
    /// `FE SHL`: logical shift left, `DF` untouched.
    Left,
    /// `76 SHRC`: shift right through `DF`.
    RightCarry,
    /// `7E SHLC`: shift left through `DF`.
    LeftCarry,
}

/// Fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `00`: no operation.
    Nop,
    /// `0N LDN`: `D = M(R(N))`.
    LoadVia(Register),
    /// `1N INC`.
    Increment(Register),
    /// `2N DEC`.
    Decrement(Register),
    /// `3N`: short branch.
    Branch(BranchCondition),
    /// `4N LDA`: `D = M(R(N))`, then increment `R(N)`.
    LoadAdvance(Register),
    /// `5N STR`: `M(R(N)) = D`.
    Store(Register),
    /// `60 IRX`: increment `R(X)`.
    IncrementX,
    /// `61..67 OUT`: latch `D` into the output port.
    Output(u8),
    /// `68`: stop the run.
    Halt,
    /// `69..6F INP`: load `D` from the input port.
    Input(u8),
    /// `70 RET`: executed as a no-op.
    Return,
    /// `71 DIS`: executed as a no-op.
    Disable,
    /// `72 LDXA`: `D = M(R(X))`, then increment `R(X)`.
    LoadXAdvance,
    /// `73 STXD`: `M(R(X)) = D`, then decrement `R(X)`.
    StoreXDecrement,
    /// Accumulator ALU operation.
    Alu {
        /// Operation applied to `D`.
        op: AluOp,
        /// Where the second operand comes from.
        source: Operand,
    },
    /// Accumulator shift.
    Shift(Shift),
    /// `7A REQ`.
    ResetQ,
    /// `7B SEQ`.
    SetQ,
    /// `8N GLO`: `D = low byte of R(N)`.
    GetLow(Register),
    /// `9N GHI`: `D = high byte of R(N)`.
    GetHigh(Register),
    /// `AN PLO`: low byte of `R(N)` = `D`.
    PutLow(Register),
    /// `BN PHI`: high byte of `R(N)` = `D`.
    PutHigh(Register),
    /// `CN`: reserved long-branch slot, executed as a no-op. Carries `N`.
    LongBranch(u8),
    /// `DN SEP`: `P = N`.
    SetP(Register),
    /// `EN SEX`: `X = N`.
    SetX(Register),
}

/// Stateless byte-to-instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Decodes one opcode byte.
    #[must_use]
    pub const fn decode(byte: u8) -> Instruction {
        let (op, n) = split_opcode(byte);
        let reg = Register::from_low_nibble(n);

        match OpcodeGroup::from_u4(op) {
            OpcodeGroup::LoadVia => {
                if n == 0 {
                    Instruction::Nop
                } else {
                    Instruction::LoadVia(reg)
                }
            }
            OpcodeGroup::Increment => Instruction::Increment(reg),
            OpcodeGroup::Decrement => Instruction::Decrement(reg),
            OpcodeGroup::ShortBranch => Instruction::Branch(BranchCondition::from_u4(n)),
            OpcodeGroup::LoadAdvance => Instruction::LoadAdvance(reg),
            OpcodeGroup::Store => Instruction::Store(reg),
            OpcodeGroup::InputOutput => match n {
                0x0 => Instruction::IncrementX,
                0x1..=0x7 => Instruction::Output(n),
                0x8 => Instruction::Halt,
                _ => Instruction::Input(n & 0x07),
            },
            OpcodeGroup::Extended => decode_extended(n),
            OpcodeGroup::GetLow => Instruction::GetLow(reg),
            OpcodeGroup::GetHigh => Instruction::GetHigh(reg),
            OpcodeGroup::PutLow => Instruction::PutLow(reg),
            OpcodeGroup::PutHigh => Instruction::PutHigh(reg),
            OpcodeGroup::LongBranch => Instruction::LongBranch(n),
            OpcodeGroup::SetP => Instruction::SetP(reg),
            OpcodeGroup::SetX => Instruction::SetX(reg),
            OpcodeGroup::Arithmetic => decode_arithmetic(n),
        }
    }
}

const fn alu(op: AluOp, source: Operand) -> Instruction {
    Instruction::Alu { op, source }
}

const fn decode_extended(n: u8) -> Instruction {
    match n {
        0x0 => Instruction::Return,
        0x1 => Instruction::Disable,
        0x2 => Instruction::LoadXAdvance,
        0x3 => Instruction::StoreXDecrement,
        0x4 => alu(AluOp::AddCarry, Operand::MemoryX),
        0x5 => alu(AluOp::SubtractDBorrow, Operand::MemoryX),
        0x6 => Instruction::Shift(Shift::RightCarry),
        0x7 => alu(AluOp::SubtractMBorrow, Operand::MemoryX),
        0x8 => alu(AluOp::Load, Operand::Immediate),
        0x9 => alu(AluOp::Or, Operand::Immediate),
        0xA => Instruction::ResetQ,
        0xB => Instruction::SetQ,
        0xC => alu(AluOp::AddCarry, Operand::Immediate),
        0xD => alu(AluOp::SubtractDBorrow, Operand::Immediate),
        0xE => Instruction::Shift(Shift::LeftCarry),
        _ => alu(AluOp::SubtractMBorrow, Operand::Immediate),
    }
}

const fn decode_arithmetic(n: u8) -> Instruction {
    let source = if n & 0x08 == 0 {
        Operand::MemoryX
    } else {
        Operand::Immediate
    };

    match n & 0x07 {
        0x0 => alu(AluOp::Load, source),
        0x1 => alu(AluOp::Or, source),
        0x2 => alu(AluOp::And, source),
        0x3 => alu(AluOp::Xor, source),
        0x4 => alu(AluOp::Add, source),
        0x5 => alu(AluOp::SubtractD, source),
        0x6 => {
            if n & 0x08 == 0 {
                Instruction::Shift(Shift::Right)
            } else {
                Instruction::Shift(Shift::Left)
            }
        }
        _ => alu(AluOp::SubtractM, source),
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn build_decode_table() -> [Instruction; 256] {
    let mut table = [Instruction::Nop; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = Decoder::decode(byte as u8);
        byte += 1;
    }
    table
}

/// Precomputed decode of every opcode byte, indexed by the byte value.
pub const DECODE_TABLE: [Instruction; 256] = build_decode_table();
