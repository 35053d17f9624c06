use crate::memory::Memory;
use crate::state::{PortBank, RegisterFile};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Complete machine state of one simulation run.
///
/// Owned by exactly one run; nothing in it is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineState {
    /// Wide registers and the D/X/P/DF/Q latches.
    pub regs: RegisterFile,
    /// 256-byte wraparound memory.
    pub memory: Memory,
    /// Output, input and external-flag ports.
    pub ports: PortBank,
}

impl MachineState {
    /// Zero-initialized machine with `genome` copied to address 0.
    #[must_use]
    pub fn from_genome(genome: &[u8]) -> Self {
        Self {
            memory: Memory::with_genome(genome),
            ..Self::default()
        }
    }

    /// Byte at the current program counter.
    #[must_use]
    pub fn current_opcode(&self) -> u8 {
        self.memory.read(self.regs.program_counter())
    }

    /// Byte at the current data pointer `R(X)`.
    #[must_use]
    pub fn read_at_x(&self) -> u8 {
        self.memory.read(self.regs.data_pointer())
    }

    /// Advances the program counter and reads the immediate byte it now points at.
    pub fn fetch_immediate(&mut self) -> u8 {
        let p = self.regs.p();
        self.regs.increment(p);
        self.memory.read(self.regs.get(p))
    }

    /// Short branch within the current 256-byte page.
    ///
    /// The program counter always steps onto the target byte. When `taken`,
    /// its low byte is replaced by that target and the counter is pulled back
    /// by one, since every step ends with an unconditional increment.
    pub fn short_branch(&mut self, taken: bool) {
        let p = self.regs.p();
        self.regs.increment(p);
        if taken {
            let target = self.memory.read(self.regs.get(p));
            self.regs.set_low(p, target);
            self.regs.decrement(p);
        }
    }

    /// FNV-1a digest over every architecturally visible field.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hash = FNV_OFFSET_BASIS;
        let mut absorb = |bytes: &[u8]| {
            for byte in bytes {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        };

        absorb(self.memory.as_slice());
        for value in self.regs.all() {
            absorb(&value.to_le_bytes());
        }
        absorb(&[
            self.regs.d(),
            self.regs.x() as u8,
            self.regs.p() as u8,
            u8::from(self.regs.df()),
            u8::from(self.regs.q()),
        ]);
        absorb(&self.ports.out_ports);
        absorb(&[self.ports.ef_flags()]);
        absorb(&self.ports.in_ports);

        hash
    }
}
