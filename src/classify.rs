//! IEEE-754 classification predicates, generic over float width.
//!
//! One implementation serves every width: a value is non-finite exactly when
//! all exponent bits are set, and among non-finite values it is NaN exactly
//! when the mantissa is non-zero. Classification never traps and never fails;
//! NaN and infinities are ordinary inputs.

use crate::bits::FloatBits;

/// The three disjoint states every float pattern falls into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloatClass {
    /// Zero, subnormal or normal, up to the largest magnitude of the width.
    Finite,
    /// Any NaN, quiet or signaling, with any sign and payload.
    Nan,
    /// `+inf` or `-inf`.
    Infinite,
}

/// Classifies `x` by inspecting its bit pattern.
///
/// ```rust
/// use fpcore::{classify, FloatClass};
///
/// assert_eq!(classify(1.5f32), FloatClass::Finite);
/// assert_eq!(classify(f64::NEG_INFINITY), FloatClass::Infinite);
/// assert_eq!(classify(-f32::NAN), FloatClass::Nan);
/// ```
#[inline(always)]
pub fn classify<T: FloatBits>(x: T) -> FloatClass {
    let bits = x.to_bit_pattern();

    if bits & T::EXPONENT_MASK != T::EXPONENT_MASK {
        FloatClass::Finite
    } else if bits & T::MANTISSA_MASK == T::ZERO_BITS {
        FloatClass::Infinite
    } else {
        FloatClass::Nan
    }
}

/// `true` for zeros, subnormals and normals, including the largest finite
/// magnitude; `false` for NaN and both infinities.
#[inline(always)]
pub fn is_finite<T: FloatBits>(x: T) -> bool {
    classify(x) == FloatClass::Finite
}

/// `true` iff `x` encodes a NaN, whatever its payload or sign.
#[inline(always)]
pub fn is_nan<T: FloatBits>(x: T) -> bool {
    classify(x) == FloatClass::Nan
}

/// `true` iff `x` is `+inf` or `-inf`.
#[inline(always)]
pub fn is_inf<T: FloatBits>(x: T) -> bool {
    classify(x) == FloatClass::Infinite
}
