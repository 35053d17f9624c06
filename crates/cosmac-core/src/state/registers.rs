/// Number of wide general-purpose registers (`R0..RF`).
pub const REGISTER_COUNT: usize = 16;

/// General-purpose register selector decoded from a 4-bit instruction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    #[default]
    R0 = 0x0,
    R1 = 0x1,
    R2 = 0x2,
    R3 = 0x3,
    R4 = 0x4,
    R5 = 0x5,
    R6 = 0x6,
    R7 = 0x7,
    R8 = 0x8,
    R9 = 0x9,
    RA = 0xA,
    RB = 0xB,
    RC = 0xC,
    RD = 0xD,
    RE = 0xE,
    RF = 0xF,
}

impl Register {
    /// Ordered list of all general-purpose registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::RA,
        Self::RB,
        Self::RC,
        Self::RD,
        Self::RE,
        Self::RF,
    ];

    /// Returns the array index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Selects a register from the low nibble of `bits`; the high nibble is ignored.
    #[must_use]
    pub const fn from_low_nibble(bits: u8) -> Self {
        Self::ALL[(bits & 0x0F) as usize]
    }
}

/// Register file of the machine: sixteen wide registers plus the D/X/P/DF/Q latches.
///
/// `X` and `P` are stored as [`Register`] selectors, so they can only ever name
/// one of the sixteen registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    regs: [u16; REGISTER_COUNT],
    d: u8,
    x: Register,
    p: Register,
    df: bool,
    q: bool,
}

impl RegisterFile {
    /// Reads a wide register.
    #[must_use]
    pub const fn get(&self, reg: Register) -> u16 {
        self.regs[reg.index()]
    }

    /// Writes a wide register.
    pub const fn set(&mut self, reg: Register, value: u16) {
        self.regs[reg.index()] = value;
    }

    /// Increments a wide register, wrapping at 16 bits.
    pub const fn increment(&mut self, reg: Register) {
        self.regs[reg.index()] = self.regs[reg.index()].wrapping_add(1);
    }

    /// Decrements a wide register, wrapping at 16 bits.
    pub const fn decrement(&mut self, reg: Register) {
        self.regs[reg.index()] = self.regs[reg.index()].wrapping_sub(1);
    }

    /// Replaces only the low byte of a wide register.
    pub const fn set_low(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = (self.regs[reg.index()] & 0xFF00) | value as u16;
    }

    /// Replaces only the high byte of a wide register.
    pub const fn set_high(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = (self.regs[reg.index()] & 0x00FF) | ((value as u16) << 8);
    }

    /// All sixteen wide registers in index order.
    #[must_use]
    pub const fn all(&self) -> &[u16; REGISTER_COUNT] {
        &self.regs
    }

    /// Reads the accumulator `D`.
    #[must_use]
    pub const fn d(&self) -> u8 {
        self.d
    }

    /// Writes the accumulator `D`.
    pub const fn set_d(&mut self, value: u8) {
        self.d = value;
    }

    /// Register currently acting as data pointer.
    #[must_use]
    pub const fn x(&self) -> Register {
        self.x
    }

    /// Selects the data-pointer register.
    pub const fn set_x(&mut self, reg: Register) {
        self.x = reg;
    }

    /// Register currently acting as program counter.
    #[must_use]
    pub const fn p(&self) -> Register {
        self.p
    }

    /// Selects the program-counter register.
    pub const fn set_p(&mut self, reg: Register) {
        self.p = reg;
    }

    /// Value of the register selected by `P`.
    #[must_use]
    pub const fn program_counter(&self) -> u16 {
        self.get(self.p)
    }

    /// Value of the register selected by `X`.
    #[must_use]
    pub const fn data_pointer(&self) -> u16 {
        self.get(self.x)
    }

    /// Reads the carry/borrow flag `DF`.
    #[must_use]
    pub const fn df(&self) -> bool {
        self.df
    }

    /// `DF` as `0` or `1` for use as an arithmetic operand.
    #[must_use]
    pub const fn df_bit(&self) -> u8 {
        self.df as u8
    }

    /// Writes the carry/borrow flag `DF`.
    pub const fn set_df(&mut self, value: bool) {
        self.df = value;
    }

    /// Reads the `Q` output latch.
    #[must_use]
    pub const fn q(&self) -> bool {
        self.q
    }

    /// Writes the `Q` output latch.
    pub const fn set_q(&mut self, value: bool) {
        self.q = value;
    }
}
