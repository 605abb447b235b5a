//! SSE scalar reciprocal estimates and the hardware-refined square root.
//!
//! # Function Reference
//!
//! | Function | Intrinsic | Domain | Accuracy |
//! |----------|-----------|--------|----------|
//! | [`rsqrt_estimate`] | `_mm_rsqrt_ss` | (0, +∞) | ≤ 1.5 · 2⁻¹² relative |
//! | [`rcp_estimate`] | `_mm_rcp_ss` | ℝ\{0} | ≤ 1.5 · 2⁻¹² relative |
//! | [`sqrt_fast_sse`] | `rcp(rsqrt(x))` | [0, +∞) | < 1e-3 relative |
//! | [`sqrt_refined_sse`] | + one Newton-Raphson step | [0, +∞) | < 1e-6 relative |
//!
//! The refinement mirrors [`newton_raphson_step`](crate::newton_raphson_step)
//! with `rcp(estimate)` standing in for the division. Both square roots map
//! `+inf` to `+inf`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Hardware approximation of `1/√x`.
#[inline(always)]
pub fn rsqrt_estimate(x: f32) -> f32 {
    // SAFETY: this module only exists when the target enables SSE.
    unsafe { _mm_cvtss_f32(_mm_rsqrt_ss(_mm_set_ss(x))) }
}

/// Hardware approximation of `1/x`.
#[inline(always)]
pub fn rcp_estimate(x: f32) -> f32 {
    // SAFETY: this module only exists when the target enables SSE.
    unsafe { _mm_cvtss_f32(_mm_rcp_ss(_mm_set_ss(x))) }
}

/// Unrefined hardware square root, `rcp(rsqrt(x))`.
///
/// Zero maps to zero: `rsqrt(0)` is `+inf` and `rcp(+inf)` is `0`.
#[inline(always)]
pub fn sqrt_fast_sse(x: f32) -> f32 {
    // SAFETY: this module only exists when the target enables SSE.
    unsafe { _mm_cvtss_f32(_mm_rcp_ss(_mm_rsqrt_ss(_mm_set_ss(x)))) }
}

/// [`sqrt_fast_sse`] followed by exactly one Newton-Raphson step, using the
/// hardware reciprocal estimate instead of a division.
///
/// The correction `(e² − x) · rcp(e)` is evaluated as `e · (e · rcp(e)) −
/// x · rcp(e)`, which never squares `e` and so stays finite up to `f32::MAX`.
/// The reciprocal error still only scales the small difference.
#[inline(always)]
pub fn sqrt_refined_sse(x: f32) -> f32 {
    // SAFETY: this module only exists when the target enables SSE.
    unsafe {
        let x_v = _mm_set_ss(x);
        let estimate = _mm_rcp_ss(_mm_rsqrt_ss(x_v));

        let e = _mm_cvtss_f32(estimate);
        if e > 0.0 && e < f32::INFINITY {
            let half = _mm_set_ss(0.5);
            let recip_estimate = _mm_rcp_ss(estimate);
            let scaled_square = _mm_mul_ss(estimate, _mm_mul_ss(estimate, recip_estimate));
            let scaled_x = _mm_mul_ss(x_v, recip_estimate);
            let correction = _mm_mul_ss(_mm_sub_ss(scaled_square, scaled_x), half);

            _mm_cvtss_f32(_mm_sub_ss(estimate, correction))
        } else {
            e
        }
    }
}
