//! Replay fingerprint of a fixed reference genome, for cross-host comparison.

use cosmac_core::{run_simulation, ProductWorld, StopReason, World};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

/// LDI 3; OUT 1; SHL; OUT 2; ADI 5; OUT 3; BR 02
const REFERENCE_GENOME: [u8; 11] = [
    0xF8, 0x03, 0x61, 0xFE, 0x62, 0xFC, 0x05, 0x63, 0x30, 0x02, 0x00,
];

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x0100_0000_01B3);
    }
}

fn fingerprint() -> String {
    let mut world = ProductWorld;
    let outcome = run_simulation(&REFERENCE_GENOME, &mut world);
    let sim = &outcome.simulation;

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    hash_bytes(&mut hash, &sim.step_count().to_le_bytes());
    hash_bytes(&mut hash, &sim.tick_count().to_le_bytes());
    hash_bytes(&mut hash, &sim.tock_count().to_le_bytes());

    let reason = match outcome.stop_reason {
        StopReason::Halted => 0x10,
        StopReason::TickVeto => 0x11,
        StopReason::TockVeto => 0x12,
        StopReason::BudgetExhausted => 0x13,
    };
    hash_bytes(&mut hash, &[reason]);
    hash_bytes(&mut hash, &world.fitness(sim).to_le_bytes());
    hash_bytes(&mut hash, &sim.machine.fingerprint().to_le_bytes());

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
