//! Floating-point primitives: IEEE-754 classification, bit reinterpretation
//! and a tiered square-root family with hard relative-error ceilings.
//!
//! # Modules
//!
//! - [`bits`]: reinterpret a float as its raw bit pattern and back.
//! - [`classify`](mod@classify): `is_finite` / `is_nan` / `is_inf`, generic over width.
//! - [`sqrt`](mod@sqrt): Reference, Fast and Refined square roots plus [`SqrtTier`].
//! - `simd`: hardware `rsqrt`-based refined square root (x86 with SSE only).
//! - [`validation`]: randomized accuracy harness that enforces the ceilings.
//!
//! # Capabilities
//!
//! The build script resolves two capabilities at compile time:
//!
//! - `extended_precision`: `f128` support, enabled by the `f128` cargo feature
//!   on a nightly compiler.
//! - `sse`: the SSE reciprocal estimates used by
//!   [`SqrtTier::HardwareRefined`](sqrt::SqrtTier).
//!
//! A missing capability removes the corresponding items; nothing silently
//! falls back to a different width or algorithm at runtime.
//!
//! # Example
//!
//! ```rust
//! use fpcore::{is_nan, reinterpret_as_float, sqrt_fast, sqrt_refined};
//!
//! assert!(is_nan(reinterpret_as_float(0x7F80_0001)));
//!
//! let x = 2.0f32;
//! let exact = x.sqrt();
//! assert!(((sqrt_fast(x) - exact) / exact).abs() < 1e-3);
//! assert!(((sqrt_refined(x) - exact) / exact).abs() < 1e-6);
//! ```

#![cfg_attr(extended_precision, feature(f128))]

pub mod bits;
pub mod classify;
pub mod error;
pub mod sqrt;
pub mod validation;

#[cfg(sse)]
pub mod simd;

pub use bits::{
    reinterpret_as_f64, reinterpret_as_float, reinterpret_as_int, reinterpret_as_u64, FloatBits,
};
pub use classify::{classify, is_finite, is_inf, is_nan, FloatClass};
pub use error::{FpError, Result};
pub use sqrt::{newton_raphson_step, rsqrt_fast, sqrt, sqrt_fast, sqrt_refined, SqrtTier};
