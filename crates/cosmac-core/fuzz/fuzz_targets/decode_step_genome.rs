#![no_main]

use cosmac_core::{
    run_simulation_with_config, step_one, ArithmeticConvention, Cadence, Decoder, MachineState,
    ProductWorld, RunConfig, StepOutcome, World,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let _ = Decoder::decode(data[0]);

    let convention = if data[0] & 0x01 == 0 {
        ArithmeticConvention::Legacy
    } else {
        ArithmeticConvention::Consistent
    };

    let mut state = MachineState::from_genome(data);
    for _ in 0..data.len() {
        if step_one(&mut state, convention) == StepOutcome::Halted {
            break;
        }
    }

    let config = RunConfig {
        cadence: Cadence::default(),
        max_steps: 4_096,
        arithmetic: convention,
    };
    let mut world = ProductWorld;
    if let Ok(outcome) = run_simulation_with_config(data, &mut world, &config) {
        assert!(outcome.simulation.step_count() <= config.max_steps);
        assert!(world.fitness(&outcome.simulation) >= 1.0);
    }
});
