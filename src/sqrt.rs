//! Square-root tiers trading accuracy for throughput.
//!
//! | Tier | Function | Max relative error on `[0, 1e20)` |
//! |------|----------|-----------------------------------|
//! | Reference | [`sqrt`] | `< 1e-9` (correctly rounded) |
//! | Fast | [`sqrt_fast`] | `< 1e-3` |
//! | Refined | [`sqrt_refined`] | `< 1e-6` |
//! | HardwareRefined | `simd::sse::sqrt_refined_sse` | `< 1e-6` |
//!
//! Errors are measured against [`sqrt`], which is the oracle for the other
//! tiers. The Refined tiers apply exactly one Newton-Raphson step: a second
//! step would cost about as much as [`sqrt`] itself.
//!
//! The domain is `x >= 0`, up to and including `f32::MAX` and `+inf`. Every
//! tier maps `+inf` to `+inf`. Negative inputs give an unspecified value (NaN
//! or garbage) but never panic.

use std::fmt;

use crate::bits::{reinterpret_as_float, reinterpret_as_int};
use crate::classify::is_finite;

/// Magic constant for the reciprocal-square-root bit trick.
///
/// Paired with [`RSQRT_SCALE`] and [`RSQRT_OFFSET`] it bounds the relative
/// error of [`rsqrt_fast`] by about `6.5e-4` (Walczyk, Moroz et al., 2021).
const RSQRT_MAGIC: u32 = 0x5F1F_FFF9;

#[allow(clippy::excessive_precision)]
const RSQRT_SCALE: f32 = 0.703_952_253;

#[allow(clippy::excessive_precision)]
const RSQRT_OFFSET: f32 = 2.389_244_56;

/// Reference square root: IEEE-754 correctly rounded.
#[inline(always)]
pub fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

/// Approximate `1/√x` from the bit pattern of `x`.
///
/// Halving the bit pattern halves the exponent field; subtracting it from the
/// magic constant negates it and yields a piecewise-linear first guess. A
/// single tuned correction polynomial then brings the relative error below
/// `6.6e-4` for every normal input.
///
/// `rsqrt_fast(0.0)` is a large finite value, not `inf`.
#[inline(always)]
pub fn rsqrt_fast(x: f32) -> f32 {
    let y = reinterpret_as_float(RSQRT_MAGIC.wrapping_sub(reinterpret_as_int(x) >> 1));
    RSQRT_SCALE * y * (RSQRT_OFFSET - x * y * y)
}

/// Fast square root, `x · rsqrt_fast(x)`, without refinement.
///
/// `+inf` is passed through: the correction polynomial turns it into `-inf`.
///
/// ```rust
/// use fpcore::sqrt_fast;
///
/// let approx = sqrt_fast(10.0);
/// assert!((approx - 10f32.sqrt()).abs() / 10f32.sqrt() < 1e-3);
/// assert_eq!(sqrt_fast(0.0), 0.0);
/// ```
#[inline(always)]
pub fn sqrt_fast(x: f32) -> f32 {
    if x == f32::INFINITY {
        return x;
    }
    x * rsqrt_fast(x)
}

/// One Newton-Raphson step towards `√x`:
/// `estimate − (estimate − x / estimate) · 0.5`.
///
/// This is `estimate − (estimate² − x) · 0.5 / estimate` without the square,
/// so it stays finite up to `x = f32::MAX`. An estimate that is not positive
/// and finite is returned as is, so a zero input stays zero instead of
/// becoming `0/0`.
#[inline(always)]
pub fn newton_raphson_step(estimate: f32, x: f32) -> f32 {
    if estimate > 0.0 && is_finite(estimate) {
        estimate - (estimate - x / estimate) * 0.5
    } else {
        estimate
    }
}

/// [`sqrt_fast`] followed by exactly one [`newton_raphson_step`].
///
/// ```rust
/// use fpcore::sqrt_refined;
///
/// let refined = sqrt_refined(10.0);
/// assert!((refined - 10f32.sqrt()).abs() / 10f32.sqrt() < 1e-6);
/// ```
#[inline(always)]
pub fn sqrt_refined(x: f32) -> f32 {
    newton_raphson_step(sqrt_fast(x), x)
}

/// The square-root strategies, picked explicitly by the caller.
///
/// `HardwareRefined` only exists when the build targets SSE.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SqrtTier {
    Reference,
    Fast,
    Refined,
    #[cfg(sse)]
    HardwareRefined,
}

impl SqrtTier {
    /// Every tier compiled into this build, most accurate first.
    pub const ALL: &'static [SqrtTier] = &[
        SqrtTier::Reference,
        SqrtTier::Refined,
        #[cfg(sse)]
        SqrtTier::HardwareRefined,
        SqrtTier::Fast,
    ];

    /// Computes `√x` with this tier.
    #[inline(always)]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            SqrtTier::Reference => sqrt(x),
            SqrtTier::Fast => sqrt_fast(x),
            SqrtTier::Refined => sqrt_refined(x),
            #[cfg(sse)]
            SqrtTier::HardwareRefined => crate::simd::sse::sqrt_refined_sse(x),
        }
    }

    /// Contracted maximum relative error over `[0, 1e20)`.
    ///
    /// Reference is measured against an f64 oracle, the others against
    /// Reference.
    pub fn ceiling(self) -> f64 {
        match self {
            SqrtTier::Reference => 1e-9,
            SqrtTier::Fast => 1e-3,
            SqrtTier::Refined => 1e-6,
            #[cfg(sse)]
            SqrtTier::HardwareRefined => 1e-6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SqrtTier::Reference => "reference",
            SqrtTier::Fast => "fast",
            SqrtTier::Refined => "refined",
            #[cfg(sse)]
            SqrtTier::HardwareRefined => "hardware-refined",
        }
    }
}

impl fmt::Display for SqrtTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_error(reference: f32, estimate: f32) -> f64 {
        ((estimate as f64 - reference as f64) / reference as f64).abs()
    }

    // The bit trick is exact under scaling by 4, so the two binades of [1, 4)
    // cover every normal input.
    fn two_binades(step: usize) -> impl Iterator<Item = f32> {
        (0x3F80_0000u32..0x4080_0000).step_by(step).map(f32::from_bits)
    }

    #[test]
    fn test_reference_perfect_squares() {
        for (input, expected) in [(0.0, 0.0), (1.0, 1.0), (4.0, 2.0), (9.0, 3.0), (1e20, 1e10)] {
            assert_eq!(sqrt(input), expected);
        }
    }

    #[test]
    fn test_rsqrt_fast_error_bound() {
        let max = two_binades(7)
            .map(|x| rel_error(1.0 / x.sqrt(), rsqrt_fast(x)))
            .fold(0.0, f64::max);
        assert!(max < 6.6e-4, "rsqrt_fast max relative error {max:e}");
    }

    #[test]
    fn test_fast_error_bound() {
        let max = two_binades(7)
            .map(|x| rel_error(sqrt(x), sqrt_fast(x)))
            .fold(0.0, f64::max);
        assert!(max < 1e-3, "sqrt_fast max relative error {max:e}");
    }

    #[test]
    fn test_refined_error_bound() {
        let max = two_binades(7)
            .map(|x| rel_error(sqrt(x), sqrt_refined(x)))
            .fold(0.0, f64::max);
        assert!(max < 1e-6, "sqrt_refined max relative error {max:e}");
    }

    #[test]
    fn test_zero_stays_zero() {
        assert_eq!(sqrt_fast(0.0), 0.0);
        assert_eq!(sqrt_refined(0.0), 0.0);
        assert_eq!(newton_raphson_step(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_single_newton_step() {
        // From 1.5 towards √2
        let step = newton_raphson_step(1.5, 2.0);
        assert_eq!(step, 1.5 - (1.5 - 2.0 / 1.5) * 0.5);
        assert!((step as f64 - 17.0 / 12.0).abs() < 1e-6);
        assert_eq!(sqrt_refined(7.0), newton_raphson_step(sqrt_fast(7.0), 7.0));
    }

    #[test]
    fn test_top_of_range() {
        for x in [3e38f32, f32::MAX] {
            let reference = sqrt(x);
            for (tier, value) in [(SqrtTier::Fast, sqrt_fast(x)), (SqrtTier::Refined, sqrt_refined(x))] {
                assert!(value >= 0.0 && value.is_finite(), "{tier}({x:e}) = {value}");
                let error = rel_error(reference, value);
                assert!(error < tier.ceiling(), "{tier}({x:e}) error {error:e}");
            }
        }

        assert_eq!(sqrt_fast(f32::INFINITY), f32::INFINITY);
        assert_eq!(sqrt_refined(f32::INFINITY), f32::INFINITY);
        assert_eq!(newton_raphson_step(f32::INFINITY, f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn test_negative_input_does_not_panic() {
        for x in [-1.0f32, -0.0, -1e20, f32::NEG_INFINITY, f32::NAN] {
            let _ = sqrt(x);
            let _ = sqrt_fast(x);
            let _ = sqrt_refined(x);
            let _ = rsqrt_fast(x);
        }
        assert!(sqrt(-1.0).is_nan());
    }

    #[test]
    fn test_tier_dispatch() {
        for &x in &[0.5f32, 2.0, 12345.0, 9.9e19] {
            assert_eq!(SqrtTier::Reference.apply(x), sqrt(x));
            assert_eq!(SqrtTier::Fast.apply(x), sqrt_fast(x));
            assert_eq!(SqrtTier::Refined.apply(x), sqrt_refined(x));
        }
    }

    #[test]
    fn test_tier_ceilings_are_ordered() {
        assert!(SqrtTier::Reference.ceiling() < SqrtTier::Refined.ceiling());
        assert!(SqrtTier::Refined.ceiling() < SqrtTier::Fast.ceiling());
        assert_eq!(SqrtTier::ALL[0], SqrtTier::Reference);
        assert!(SqrtTier::ALL.contains(&SqrtTier::Fast));
        assert_eq!(SqrtTier::Refined.to_string(), "refined");
    }
}
