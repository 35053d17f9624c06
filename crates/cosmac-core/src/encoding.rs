/// Instruction groups selected by the high nibble of an opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpcodeGroup {
    /// `0N`: load via `R(N)`; `00` is a no-op.
    LoadVia = 0x0,
    /// `1N`: increment `R(N)`.
    Increment = 0x1,
    /// `2N`: decrement `R(N)`.
    Decrement = 0x2,
    /// `3N`: short branch family.
    ShortBranch = 0x3,
    /// `4N`: load via `R(N)` and advance.
    LoadAdvance = 0x4,
    /// `5N`: store via `R(N)`.
    Store = 0x5,
    /// `6N`: I/O group, including the halt opcode `68`.
    InputOutput = 0x6,
    /// `7N`: carry arithmetic and control.
    Extended = 0x7,
    /// `8N`: get low byte of `R(N)`.
    GetLow = 0x8,
    /// `9N`: get high byte of `R(N)`.
    GetHigh = 0x9,
    /// `AN`: put low byte of `R(N)`.
    PutLow = 0xA,
    /// `BN`: put high byte of `R(N)`.
    PutHigh = 0xB,
    /// `CN`: long branch family, reserved and executed as a no-op.
    LongBranch = 0xC,
    /// `DN`: select `R(N)` as program counter.
    SetP = 0xD,
    /// `EN`: select `R(N)` as data pointer.
    SetX = 0xE,
    /// `FN`: logic and arithmetic via `R(X)` or immediate.
    Arithmetic = 0xF,
}

impl OpcodeGroup {
    /// Ordered list of all sixteen groups.
    pub const ALL: [Self; 16] = [
        Self::LoadVia,
        Self::Increment,
        Self::Decrement,
        Self::ShortBranch,
        Self::LoadAdvance,
        Self::Store,
        Self::InputOutput,
        Self::Extended,
        Self::GetLow,
        Self::GetHigh,
        Self::PutLow,
        Self::PutHigh,
        Self::LongBranch,
        Self::SetP,
        Self::SetX,
        Self::Arithmetic,
    ];

    /// Converts a 4-bit value into its group; only the low nibble is used.
    #[must_use]
    pub const fn from_u4(op: u8) -> Self {
        Self::ALL[(op & 0x0F) as usize]
    }
}

/// Opcode that stops a run (the unused `68` slot repurposed as idle).
pub const HALT_OPCODE: u8 = 0x68;

/// Opcode that does nothing (`IDL` on real hardware, which waits for DMA).
pub const NOP_OPCODE: u8 = 0x00;

/// Splits an opcode byte into `(group nibble, N nibble)`.
#[must_use]
pub const fn split_opcode(byte: u8) -> (u8, u8) {
    ((byte >> 4) & 0x0F, byte & 0x0F)
}

#[cfg(test)]
mod tests {
    use super::{split_opcode, OpcodeGroup, HALT_OPCODE, NOP_OPCODE};

    #[test]
    fn every_nibble_names_a_distinct_group() {
        for op in 0_u8..16 {
            assert_eq!(OpcodeGroup::from_u4(op) as u8, op);
        }
    }

    #[test]
    fn from_u4_ignores_high_bits() {
        assert_eq!(OpcodeGroup::from_u4(0xF6), OpcodeGroup::InputOutput);
    }

    #[test]
    fn split_extracts_group_and_operand_nibbles() {
        assert_eq!(split_opcode(HALT_OPCODE), (0x6, 0x8));
        assert_eq!(split_opcode(NOP_OPCODE), (0x0, 0x0));
        assert_eq!(split_opcode(0xA7), (0xA, 0x7));
    }
}
