//! Memory model primitives for the 256-byte wraparound address space.

use crate::error::MemoryImageError;

/// Size in bytes of the flat architectural address space.
pub const MEMORY_BYTES: usize = 256;

/// Reduces a 16-bit register value to a memory index (`value % 256`).
#[must_use]
pub fn address_of(value: u16) -> usize {
    usize::from(value) % MEMORY_BYTES
}

/// Flat 256-byte memory image. Every access wraps, so no index can fall outside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Memory {
    cells: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: vec![0; MEMORY_BYTES].into_boxed_slice(),
        }
    }
}

impl Memory {
    /// Builds a zeroed image and copies `genome` into its low end.
    ///
    /// Bytes past the end of the address space are ignored, matching a plain
    /// slice copy into a fixed buffer.
    #[must_use]
    pub fn with_genome(genome: &[u8]) -> Self {
        let mut memory = Self::default();
        let len = genome.len().min(MEMORY_BYTES);
        memory.cells[..len].copy_from_slice(&genome[..len]);
        memory
    }

    /// Reads the byte addressed by a 16-bit register value.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.cells[address_of(addr)]
    }

    /// Writes the byte addressed by a 16-bit register value.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cells[address_of(addr)] = value;
    }

    /// Returns the full image as a slice of exactly [`MEMORY_BYTES`] bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl TryFrom<Vec<u8>> for Memory {
    type Error = MemoryImageError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.len() != MEMORY_BYTES {
            return Err(MemoryImageError::WrongLength {
                expected: MEMORY_BYTES,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            cells: bytes.into_boxed_slice(),
        })
    }
}

impl From<Memory> for Vec<u8> {
    fn from(memory: Memory) -> Self {
        memory.cells.into_vec()
    }
}
