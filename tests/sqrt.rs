//! Precision tests for the square-root tiers against the reference `sqrt`.
//!
//! Every tier is compared with `fpcore::sqrt`; the reference itself is
//! compared with a square root computed in double precision.

use fpcore::validation::relative_error;
use fpcore::{sqrt, sqrt_fast, sqrt_refined, SqrtTier};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rel(reference: f32, estimate: f32) -> f64 {
    relative_error(reference as f64, estimate as f64)
}

/// Sampling 1,000,000 values uniformly in [0, 1e20), every tier stays under its
/// ceiling at every sample.
#[test]
fn test_sqrt_accuracy_bounds_random_inputs() {
    let mut rng = StdRng::seed_from_u64(12345);

    let mut max_rel_reference = 0.0f64;
    let mut max_rel_fast = 0.0f64;
    let mut max_rel_refined = 0.0f64;

    for _ in 0..1_000_000 {
        let f: f32 = rng.random_range(0.0..1e20);
        // Best precision of the sqrt.
        let oracle = (f as f64).sqrt() as f32;
        let reference = sqrt(f);

        max_rel_reference = max_rel_reference.max(rel(oracle, reference));
        max_rel_fast = max_rel_fast.max(rel(reference, sqrt_fast(f)));
        max_rel_refined = max_rel_refined.max(rel(reference, sqrt_refined(f)));
    }

    println!("Max relative error with sqrt: {max_rel_reference:e}");
    println!("Max relative error with sqrt_fast: {max_rel_fast:e}");
    println!("Max relative error with sqrt_refined: {max_rel_refined:e}");

    assert!(max_rel_reference < 1e-9);
    assert!(max_rel_fast < 1e-3);
    assert!(max_rel_refined < 1e-6);
}

/// Test edge cases with known exact roots.
#[test]
fn test_sqrt_edge_cases() {
    let edge_cases = vec![
        (0.0f32, 0.0f32),
        (1.0f32, 1.0f32),
        (4.0f32, 2.0f32),
        (9.0f32, 3.0f32),
        (16.0f32, 4.0f32),
        (25.0f32, 5.0f32),
        (100.0f32, 10.0f32),
    ];

    for (input, expected) in edge_cases {
        let reference = sqrt(input);
        let fast = sqrt_fast(input);
        let refined = sqrt_refined(input);

        println!("sqrt({input}) = {reference} fast: {fast:.8} refined: {refined:.8}");

        assert_eq!(reference, expected);
        assert!(rel(expected, fast) < 1e-3, "sqrt_fast({input}) = {fast}");
        assert!(rel(expected, refined) < 1e-6, "sqrt_refined({input}) = {refined}");
    }
}

/// Test precision with small positive values near zero.
#[test]
fn test_sqrt_precision_near_zero() {
    let small_values: Vec<f32> = vec![
        1e-30, 1e-20, 1e-10, 1e-8, 1e-6, 1e-4, 1e-3, 1e-2, 1e-1, 0.25, 0.5,
    ];

    for x in small_values {
        let reference = sqrt(x);
        let fast_err = rel(reference, sqrt_fast(x));
        let refined_err = rel(reference, sqrt_refined(x));

        println!("sqrt({x:.2e}): fast {fast_err:.2e}, refined {refined_err:.2e}");

        assert!(fast_err < 1e-3, "sqrt_fast({x}) error {fast_err:.2e}");
        assert!(refined_err < 1e-6, "sqrt_refined({x}) error {refined_err:.2e}");
    }
}

/// The single Newton-Raphson step must improve the worst case over a large
/// sample, even where it does not improve every single input.
#[test]
fn test_refinement_improves_aggregate_accuracy() {
    let mut rng = StdRng::seed_from_u64(7);
    let inputs: Vec<f32> = (0..200_000).map(|_| rng.random_range(0.0..1e20)).collect();

    let max_error = |tier: SqrtTier| {
        inputs
            .iter()
            .map(|&x| rel(sqrt(x), tier.apply(x)))
            .fold(0.0f64, f64::max)
    };

    let fast = max_error(SqrtTier::Fast);
    let refined = max_error(SqrtTier::Refined);
    println!("fast {fast:e} -> refined {refined:e}");

    assert!(refined <= fast);
    assert!(refined * 100.0 < fast);
}

/// Every compiled tier honours its own ceiling on the default domain.
#[test]
fn test_every_tier_meets_its_ceiling() {
    let mut rng = StdRng::seed_from_u64(99);

    for &tier in SqrtTier::ALL {
        let mut max = 0.0f64;
        for _ in 0..100_000 {
            let x: f32 = rng.random_range(0.0..1e20);
            let reference = match tier {
                SqrtTier::Reference => (x as f64).sqrt() as f32,
                _ => sqrt(x),
            };
            max = max.max(rel(reference, tier.apply(x)));
        }
        println!("{tier}: {max:e} (ceiling {:e})", tier.ceiling());
        assert!(max < tier.ceiling(), "{tier} exceeded its ceiling: {max:e}");
    }
}

/// The largest finite inputs stay positive and within each ceiling, and
/// `+inf` comes back as `+inf`, for every compiled tier.
#[test]
fn test_top_of_range_inputs() {
    let inputs = [
        3e38f32,
        f32::MAX,
        f32::from_bits(f32::MAX.to_bits() - 1),
        f32::from_bits(0x7F00_0000),
    ];

    for &tier in SqrtTier::ALL {
        for x in inputs {
            let value = tier.apply(x);
            let error = rel(sqrt(x), value);
            println!("{tier}({x:e}) = {value:e}, error {error:e}");

            assert!(value >= 0.0 && value.is_finite(), "{tier}({x:e}) = {value}");
            assert!(error < tier.ceiling(), "{tier}({x:e}) error {error:e}");
        }
        assert_eq!(tier.apply(f32::INFINITY), f32::INFINITY, "{tier}(inf)");
    }
}

/// Negative inputs are outside the domain: any value is acceptable, but the
/// call must return.
#[test]
fn test_negative_inputs_return() {
    for &tier in SqrtTier::ALL {
        for x in [-0.5f32, -4.0, -1e20, f32::NEG_INFINITY] {
            let _ = tier.apply(x);
        }
    }
}
