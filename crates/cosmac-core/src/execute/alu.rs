//! Accumulator arithmetic for both carry/borrow conventions.
//!
//! Every function here is pure: it takes `D`, the second operand and the
//! incoming `DF`, and returns the new `D` with its `DF` effect. Results are
//! truncated to 8 bits; flags are computed before truncation unless the
//! legacy convention says otherwise.

use super::flags::AluResult;
use crate::api::ArithmeticConvention;
use crate::decoder::{AluOp, Operand, Shift};

/// Applies an ALU operation to `D`.
///
/// `source` only matters for the legacy convention, whose immediate forms of
/// `ADI`, `SDBI` and `SMBI` compare in 8 bits.
#[must_use]
pub fn apply_alu(
    op: AluOp,
    source: Operand,
    d: u8,
    operand: u8,
    df: bool,
    convention: ArithmeticConvention,
) -> AluResult {
    let carry = u8::from(df);
    let wide_d = u16::from(d);
    let wide_m = u16::from(operand);
    let wide_c = u16::from(carry);

    match op {
        AluOp::Load => AluResult::value(operand),
        AluOp::Or => AluResult::value(d | operand),
        AluOp::And => AluResult::value(d & operand),
        AluOp::Xor => AluResult::value(d ^ operand),
        AluOp::Add => {
            let overflow = match (convention, source) {
                (ArithmeticConvention::Legacy, Operand::Immediate) => {
                    // Compared after truncation, so never set.
                    u16::from(d.wrapping_add(operand)) > 0xFF
                }
                _ => wide_d + wide_m > 0xFF,
            };
            AluResult::with_df(d.wrapping_add(operand), overflow)
        }
        AluOp::SubtractD => AluResult::with_df(operand.wrapping_sub(d), d > operand),
        AluOp::SubtractM => AluResult::with_df(d.wrapping_sub(operand), d < operand),
        AluOp::AddCarry => AluResult::with_df(
            d.wrapping_add(carry).wrapping_add(operand),
            wide_c + wide_d + wide_m > 0xFF,
        ),
        AluOp::SubtractDBorrow => match convention {
            ArithmeticConvention::Legacy => {
                let borrow = match source {
                    Operand::MemoryX => wide_d > wide_m + wide_c,
                    Operand::Immediate => d > carry.wrapping_add(operand),
                };
                AluResult::with_df(carry.wrapping_add(operand).wrapping_sub(d), borrow)
            }
            ArithmeticConvention::Consistent => AluResult::with_df(
                operand.wrapping_sub(d).wrapping_sub(carry),
                wide_d + wide_c > wide_m,
            ),
        },
        AluOp::SubtractMBorrow => match convention {
            ArithmeticConvention::Legacy => {
                let borrow = match source {
                    Operand::MemoryX => wide_d + wide_c < wide_m,
                    Operand::Immediate => carry.wrapping_add(d) < operand,
                };
                AluResult::with_df(carry.wrapping_add(d).wrapping_sub(operand), borrow)
            }
            ArithmeticConvention::Consistent => AluResult::with_df(
                d.wrapping_sub(operand).wrapping_sub(carry),
                wide_m + wide_c > wide_d,
            ),
        },
    }
}

/// Applies a shift to `D`.
#[must_use]
pub const fn apply_shift(
    shift: Shift,
    d: u8,
    df: bool,
    convention: ArithmeticConvention,
) -> AluResult {
    match shift {
        Shift::Right => AluResult::value(d >> 1),
        Shift::Left => AluResult::value(d << 1),
        Shift::RightCarry => match convention {
            // The carry-in lands in bit 8 and is lost; the old-bit-0 test never matches.
            ArithmeticConvention::Legacy => AluResult::with_df(d >> 1, false),
            ArithmeticConvention::Consistent => {
                AluResult::with_df((d >> 1) | ((df as u8) << 7), d & 0x01 != 0)
            }
        },
        Shift::LeftCarry => AluResult::with_df((d << 1) | df as u8, d & 0x80 != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_alu, apply_shift};
    use crate::api::ArithmeticConvention::{Consistent, Legacy};
    use crate::decoder::{AluOp, Operand, Shift};
    use crate::execute::flags::{AluResult, FlagsUpdate};

    #[test]
    fn logic_ops_leave_df_untouched() {
        for convention in [Legacy, Consistent] {
            let or = apply_alu(AluOp::Or, Operand::MemoryX, 0xF0, 0x0F, true, convention);
            assert_eq!(or, AluResult::value(0xFF));
            let and = apply_alu(AluOp::And, Operand::Immediate, 0xF0, 0x3C, true, convention);
            assert_eq!(and, AluResult::value(0x30));
            let xor = apply_alu(AluOp::Xor, Operand::MemoryX, 0xFF, 0x0F, false, convention);
            assert_eq!(xor, AluResult::value(0xF0));
        }
    }

    #[test]
    fn add_via_memory_sets_carry_on_overflow() {
        let result = apply_alu(AluOp::Add, Operand::MemoryX, 0xF0, 0x20, false, Legacy);
        assert_eq!(result, AluResult::with_df(0x10, true));
    }

    #[test]
    fn legacy_add_immediate_never_reports_carry() {
        let result = apply_alu(AluOp::Add, Operand::Immediate, 0xF0, 0x20, true, Legacy);
        assert_eq!(result, AluResult::with_df(0x10, false));

        let fixed = apply_alu(AluOp::Add, Operand::Immediate, 0xF0, 0x20, true, Consistent);
        assert_eq!(fixed, AluResult::with_df(0x10, true));
    }

    #[test]
    fn add_with_carry_includes_carry_in() {
        for convention in [Legacy, Consistent] {
            let result = apply_alu(AluOp::AddCarry, Operand::MemoryX, 0xFF, 0x00, true, convention);
            assert_eq!(result, AluResult::with_df(0x00, true));
            let result = apply_alu(AluOp::AddCarry, Operand::Immediate, 1, 2, true, convention);
            assert_eq!(result, AluResult::with_df(4, false));
        }
    }

    #[test]
    fn plain_subtractions_borrow_the_same_way_in_both_conventions() {
        for convention in [Legacy, Consistent] {
            let sd = apply_alu(AluOp::SubtractD, Operand::MemoryX, 5, 3, false, convention);
            assert_eq!(sd, AluResult::with_df(0xFE, true));
            let sm = apply_alu(AluOp::SubtractM, Operand::Immediate, 5, 3, false, convention);
            assert_eq!(sm, AluResult::with_df(2, false));
            let sm = apply_alu(AluOp::SubtractM, Operand::MemoryX, 3, 5, false, convention);
            assert_eq!(sm, AluResult::with_df(0xFE, true));
        }
    }

    #[test]
    fn legacy_subtract_d_borrow_adds_carry_in() {
        // D = DF + M - D = 1 + 10 - 4.
        let result = apply_alu(AluOp::SubtractDBorrow, Operand::MemoryX, 4, 10, true, Legacy);
        assert_eq!(result, AluResult::with_df(7, false));
    }

    #[test]
    fn legacy_subtract_d_borrow_immediate_compares_in_eight_bits() {
        // DF + imm wraps to 0, so any non-zero D reports a borrow.
        let result = apply_alu(AluOp::SubtractDBorrow, Operand::Immediate, 1, 0xFF, true, Legacy);
        assert_eq!(result, AluResult::with_df(0xFF, true));

        let wide = apply_alu(AluOp::SubtractDBorrow, Operand::MemoryX, 1, 0xFF, true, Legacy);
        assert_eq!(wide, AluResult::with_df(0xFF, false));
    }

    #[test]
    fn legacy_subtract_m_borrow_immediate_compares_in_eight_bits() {
        let result = apply_alu(AluOp::SubtractMBorrow, Operand::Immediate, 0xFF, 0x10, true, Legacy);
        assert_eq!(result, AluResult::with_df(0xF0, true));

        let wide = apply_alu(AluOp::SubtractMBorrow, Operand::MemoryX, 0xFF, 0x10, true, Legacy);
        assert_eq!(wide, AluResult::with_df(0xF0, false));
    }

    #[test]
    fn consistent_borrow_variants_subtract_borrow_in() {
        let sdb = apply_alu(AluOp::SubtractDBorrow, Operand::MemoryX, 4, 10, true, Consistent);
        assert_eq!(sdb, AluResult::with_df(5, false));

        let smb = apply_alu(AluOp::SubtractMBorrow, Operand::Immediate, 10, 4, true, Consistent);
        assert_eq!(smb, AluResult::with_df(5, false));

        let under = apply_alu(AluOp::SubtractMBorrow, Operand::MemoryX, 4, 4, true, Consistent);
        assert_eq!(under, AluResult::with_df(0xFF, true));
    }

    #[test]
    fn plain_shifts_discard_the_outgoing_bit() {
        assert_eq!(apply_shift(Shift::Right, 0x81, true, Legacy), AluResult::value(0x40));
        assert_eq!(apply_shift(Shift::Left, 0x81, true, Legacy), AluResult::value(0x02));
    }

    #[test]
    fn shift_left_with_carry_rotates_through_df() {
        for convention in [Legacy, Consistent] {
            let result = apply_shift(Shift::LeftCarry, 0x81, true, convention);
            assert_eq!(result, AluResult::with_df(0x03, true));
        }
    }

    #[test]
    fn shift_right_with_carry_differs_by_convention() {
        let legacy = apply_shift(Shift::RightCarry, 0x81, true, Legacy);
        assert_eq!(legacy, AluResult::with_df(0x40, false));

        let consistent = apply_shift(Shift::RightCarry, 0x81, true, Consistent);
        assert_eq!(consistent, AluResult::with_df(0xC0, true));
    }

    #[test]
    fn flags_update_resolves_against_previous_value() {
        assert!(FlagsUpdate::None.apply(true));
        assert!(!FlagsUpdate::Set(false).apply(true));
    }
}
