//! Machine state model: register file, I/O ports and the owning machine.

/// Machine state aggregate and its fetch/branch primitives.
pub mod machine;
/// Output/input ports and external flag lines.
pub mod ports;
/// Wide register file and pointer latches.
pub mod registers;

pub use machine::MachineState;
pub use ports::{ExternalFlag, PortBank, EF_MASK, PORT_COUNT};
pub use registers::{Register, RegisterFile, REGISTER_COUNT};
