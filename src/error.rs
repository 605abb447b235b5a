//! Error types for fpcore validation.
//!
//! The numeric primitives are total functions and never fail. These errors
//! describe contract violations found by the [`validation`](crate::validation)
//! harness, and invalid harness configurations.

use std::fmt;

use crate::classify::FloatClass;
use crate::sqrt::SqrtTier;

/// Contract violations reported by the validation harness.
#[derive(Debug, Clone, PartialEq)]
pub enum FpError {
    /// A square-root tier exceeded its relative-error ceiling.
    CeilingExceeded {
        /// The tier that was measured.
        tier: SqrtTier,
        /// Largest relative error observed over the sample.
        max_relative_error: f64,
        /// The contracted bound.
        ceiling: f64,
        /// Input that produced `max_relative_error`.
        worst_input: f32,
    },
    /// A bit pattern did not survive a float round trip.
    RoundTrip {
        /// The original pattern.
        bits: u32,
        /// The pattern read back after going through `f32`.
        decoded: u32,
    },
    /// The classifier disagreed with the IEEE-754 category of a pattern.
    Misclassified {
        /// The offending pattern.
        bits: u32,
        /// What the classifier returned.
        class: FloatClass,
    },
    /// The harness configuration cannot be run.
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for FpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FpError::CeilingExceeded {
                tier,
                max_relative_error,
                ceiling,
                worst_input,
            } => write!(
                f,
                "Accuracy ceiling exceeded by {}: max relative error {:e} >= {:e} (worst input {:e})",
                tier, max_relative_error, ceiling, worst_input
            ),
            FpError::RoundTrip { bits, decoded } => write!(
                f,
                "Bit pattern round trip failed: {:#010x} came back as {:#010x}",
                bits, decoded
            ),
            FpError::Misclassified { bits, class } => write!(
                f,
                "Bit pattern {:#010x} misclassified as {:?}",
                bits, class
            ),
            FpError::InvalidConfig { message } => {
                write!(f, "Invalid validation config: {}", message)
            }
        }
    }
}

impl std::error::Error for FpError {}

/// Result type alias for fpcore validation.
pub type Result<T> = std::result::Result<T, FpError>;

/// Creates a ceiling violation error.
pub fn ceiling_exceeded(
    tier: SqrtTier,
    max_relative_error: f64,
    ceiling: f64,
    worst_input: f32,
) -> FpError {
    FpError::CeilingExceeded {
        tier,
        max_relative_error,
        ceiling,
        worst_input,
    }
}

/// Creates a round-trip error.
pub fn round_trip_error(bits: u32, decoded: u32) -> FpError {
    FpError::RoundTrip { bits, decoded }
}

/// Creates a misclassification error.
pub fn misclassified(bits: u32, class: FloatClass) -> FpError {
    FpError::Misclassified { bits, class }
}

/// Creates a configuration error.
pub fn config_error(message: impl Into<String>) -> FpError {
    FpError::InvalidConfig {
        message: message.into(),
    }
}
