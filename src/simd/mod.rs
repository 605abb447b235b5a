//! Hardware-estimate square roots.
//!
//! # Conditional Compilation
//!
//! This module is only compiled when the build script reports the `sse`
//! capability, i.e. the target is x86/x86_64 and SSE is enabled for it.
//! Other targets have no hardware tier; [`SqrtTier::ALL`](crate::SqrtTier)
//! then lists only the portable tiers.
//!
//! ARM NEON is not wired in: `vrsqrteq_f32` gives ~8 bits, and a single
//! refinement step from there cannot reach the 1e-6 ceiling.

pub mod sse;
