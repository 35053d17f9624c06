/// Number of I/O port slots; slot 0 is reserved and only `1..=7` are addressable by `OUT`/`INP`.
pub const PORT_COUNT: usize = 8;

/// Mask of the four external flag lines.
pub const EF_MASK: u8 = 0x0F;

/// One of the four external flag input lines, `EF1..EF4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ExternalFlag {
    Ef1,
    Ef2,
    Ef3,
    Ef4,
}

impl ExternalFlag {
    /// Ordered list of all external flag lines.
    pub const ALL: [Self; 4] = [Self::Ef1, Self::Ef2, Self::Ef3, Self::Ef4];

    /// Selects a line from the low two bits of `bits`.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Self {
        Self::ALL[(bits & 0x03) as usize]
    }

    /// Bit mask of this line inside the EF nibble: `EFi` lives at `16 >> i`.
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Self::Ef1 => 0x08,
            Self::Ef2 => 0x04,
            Self::Ef3 => 0x02,
            Self::Ef4 => 0x01,
        }
    }
}

/// Externally observable I/O surface: output ports, input ports and EF inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PortBank {
    /// Output latches written by `OUT n`. This is the result vector a fitness
    /// evaluator reads.
    pub out_ports: [u8; PORT_COUNT],
    /// Input values read by `INP n`, supplied by the world.
    pub in_ports: [u8; PORT_COUNT],
    ef_flags: u8,
}

impl PortBank {
    /// Reads the EF nibble.
    #[must_use]
    pub const fn ef_flags(&self) -> u8 {
        self.ef_flags
    }

    /// Writes the EF nibble; bits above the low nibble are dropped.
    pub const fn set_ef_flags(&mut self, value: u8) {
        self.ef_flags = value & EF_MASK;
    }

    /// Returns `true` when the given EF line is asserted.
    #[must_use]
    pub const fn ef_is_set(&self, flag: ExternalFlag) -> bool {
        (self.ef_flags & flag.mask()) != 0
    }

    /// Asserts or releases a single EF line.
    pub const fn set_ef(&mut self, flag: ExternalFlag, asserted: bool) {
        if asserted {
            self.ef_flags |= flag.mask();
        } else {
            self.ef_flags &= !flag.mask();
        }
    }
}
