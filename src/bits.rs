//! Bit-level reinterpretation between floats and their raw bit patterns.
//!
//! These are aliasing operations, not numeric conversions:
//! `reinterpret_as_int(1.0)` is `0x3F80_0000`, not `1`. Every bit pattern is a
//! valid float and the mapping is a bijection, NaN payloads and signs included.
//!
//! The implementation goes through `to_bits`/`from_bits`, which the language
//! defines for every pattern, so there is no `unsafe` and no pointer cast.

/// A floating-point width together with its same-sized unsigned bit pattern.
///
/// Implemented for `f32`/`u32`, `f64`/`u64` and, with the
/// `extended_precision` capability, `f128`/`u128`.
pub trait FloatBits: Copy {
    /// Unsigned integer with the same size as `Self`.
    type Bits: Copy
        + Eq
        + core::fmt::Debug
        + core::fmt::LowerHex
        + core::ops::BitAnd<Output = Self::Bits>;

    /// Total width in bits.
    const WIDTH: u32;
    /// Only the sign bit set.
    const SIGN_MASK: Self::Bits;
    /// All exponent bits set.
    const EXPONENT_MASK: Self::Bits;
    /// All mantissa (significand) bits set.
    const MANTISSA_MASK: Self::Bits;
    /// The all-zero pattern, i.e. `+0.0`.
    const ZERO_BITS: Self::Bits;

    /// Reads the storage of `self` as an unsigned integer.
    fn to_bit_pattern(self) -> Self::Bits;

    /// Reads `bits` as a float of this width.
    fn from_bit_pattern(bits: Self::Bits) -> Self;
}

macro_rules! impl_float_bits {
    ($float:ty, $bits:ty, $mantissa_bits:expr) => {
        impl FloatBits for $float {
            type Bits = $bits;

            const WIDTH: u32 = <$bits>::BITS;
            const SIGN_MASK: $bits = 1 << (<$bits>::BITS - 1);
            const EXPONENT_MASK: $bits = !Self::SIGN_MASK & !Self::MANTISSA_MASK;
            const MANTISSA_MASK: $bits = (1 << $mantissa_bits) - 1;
            const ZERO_BITS: $bits = 0;

            #[inline(always)]
            fn to_bit_pattern(self) -> $bits {
                self.to_bits()
            }

            #[inline(always)]
            fn from_bit_pattern(bits: $bits) -> Self {
                <$float>::from_bits(bits)
            }
        }
    };
}

impl_float_bits!(f32, u32, 23);
impl_float_bits!(f64, u64, 52);
#[cfg(extended_precision)]
impl_float_bits!(f128, u128, 112);

/// Returns the bit pattern of a single-precision value.
///
/// ```rust
/// use fpcore::reinterpret_as_int;
///
/// assert_eq!(reinterpret_as_int(1.0), 0x3F80_0000);
/// assert_eq!(reinterpret_as_int(-1.0), 0xBF80_0000);
/// ```
#[inline(always)]
pub fn reinterpret_as_int(x: f32) -> u32 {
    x.to_bit_pattern()
}

/// Returns the single-precision value stored in `bits`.
///
/// ```rust
/// use fpcore::{is_nan, reinterpret_as_float};
///
/// assert_eq!(reinterpret_as_float(0x4000_0000), 2.0);
/// assert!(is_nan(reinterpret_as_float(0x7F80_0001)));
/// ```
#[inline(always)]
pub fn reinterpret_as_float(bits: u32) -> f32 {
    f32::from_bit_pattern(bits)
}

/// 64-bit analog of [`reinterpret_as_int`].
#[inline(always)]
pub fn reinterpret_as_u64(x: f64) -> u64 {
    x.to_bit_pattern()
}

/// 64-bit analog of [`reinterpret_as_float`].
#[inline(always)]
pub fn reinterpret_as_f64(bits: u64) -> f64 {
    f64::from_bit_pattern(bits)
}

/// Canonical IEEE-754 bit patterns used as conformance inputs and outputs.
pub mod consts {
    pub const F32_ONE_BITS: u32 = 0x3F80_0000;
    pub const F32_TWO_BITS: u32 = 0x4000_0000;
    pub const F32_NEG_ONE_BITS: u32 = 0xBF80_0000;
    pub const F32_INFINITY_BITS: u32 = 0x7F80_0000;
    pub const F32_NEG_INFINITY_BITS: u32 = 0xFF80_0000;
    /// Quiet NaN with an empty payload.
    pub const F32_QUIET_NAN_BITS: u32 = 0x7FC0_0000;
    /// Smallest signaling NaN: one above `+inf`.
    pub const F32_SIGNALING_NAN_BITS: u32 = F32_INFINITY_BITS + 1;
    pub const F32_MAX_BITS: u32 = 0x7F7F_FFFF;

    pub const F64_ONE_BITS: u64 = 0x3FF0_0000_0000_0000;
    pub const F64_INFINITY_BITS: u64 = 0x7FF0_0000_0000_0000;
    pub const F64_NEG_INFINITY_BITS: u64 = 0xFFF0_0000_0000_0000;
    pub const F64_QUIET_NAN_BITS: u64 = 0x7FF8_0000_0000_0000;
    pub const F64_SIGNALING_NAN_BITS: u64 = F64_INFINITY_BITS + 1;
    pub const F64_MAX_BITS: u64 = 0x7FEF_FFFF_FFFF_FFFF;
}
