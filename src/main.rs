//! Runs the fpcore conformance checks and accuracy harness and prints a report.
//!
//! Usage: `fpcore [SAMPLES]` (default 1,000,000). Exits non-zero on any
//! contract violation.

use std::process::ExitCode;

use fpcore::validation::{measure_all, verify_classification, verify_round_trip, ValidationConfig};
use fpcore::{FpError, SqrtTier};

// Largest finite values, both infinities, every NaN and the negative
// zero/subnormal region.
const SPECIAL_START: u32 = 0x7F00_0000;
const SPECIAL_END: u32 = 0x807F_FFFF;

fn run(config: &ValidationConfig) -> fpcore::Result<bool> {
    let checked = verify_round_trip(SPECIAL_START, SPECIAL_END)?;
    println!("Round trip: {checked} bit patterns ok");

    let checked = verify_classification(SPECIAL_START, SPECIAL_END)?;
    println!("Classification: {checked} bit patterns ok");

    println!(
        "Sampling {} inputs in [{:e}, {:e}), seed {}, tiers: {}",
        config.samples,
        config.lower,
        config.upper,
        config.seed,
        SqrtTier::ALL
            .iter()
            .map(|tier| tier.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut passed = true;
    for report in measure_all(config)? {
        println!("{report}");
        passed &= report.passed();
    }
    Ok(passed)
}

fn main() -> ExitCode {
    let mut config = ValidationConfig::default();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse::<usize>() {
            Ok(samples) => config = config.with_samples(samples),
            Err(e) => {
                eprintln!("invalid sample count {arg:?}: {e}");
                return ExitCode::from(2);
            }
        }
    }

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("accuracy ceiling exceeded");
            ExitCode::FAILURE
        }
        Err(e @ FpError::InvalidConfig { .. }) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
