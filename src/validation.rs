//! Randomized accuracy harness for the square-root tiers and bit-level
//! conformance sweeps for the classifier and reinterpretation.
//!
//! Sampling is split into fixed-size chunks, each with its own seeded RNG, and
//! processed in parallel with rayon. The per-chunk statistics are merged in
//! chunk order afterwards, so a given [`ValidationConfig`] always produces the same inputs
//! and the same report, whatever the thread count.
//!
//! # Example
//!
//! ```rust
//! use fpcore::validation::{validate_tier, ValidationConfig};
//! use fpcore::SqrtTier;
//!
//! let config = ValidationConfig::default().with_samples(10_000);
//! let report = validate_tier(SqrtTier::Refined, &config).unwrap();
//! assert!(report.max_relative_error < 1e-6);
//! ```

use std::fmt;
use std::num::FpCategory;

use num::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::bits::{reinterpret_as_float, reinterpret_as_int};
use crate::classify::{classify, is_nan, FloatClass};
use crate::error::{ceiling_exceeded, config_error, misclassified, round_trip_error, Result};
use crate::sqrt::{sqrt, SqrtTier};

pub const DEFAULT_SAMPLES: usize = 1_000_000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_LOWER: f32 = 0.0;
pub const DEFAULT_UPPER: f32 = 1e20;
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// `|estimate − reference| / |reference|`.
///
/// Zero when both values are zero. A zero reference with a non-zero estimate
/// gives `+inf`.
///
/// ```rust
/// use fpcore::validation::relative_error;
///
/// assert_eq!(relative_error(2.0f64, 2.5), 0.25);
/// assert_eq!(relative_error(0.0f32, 0.0), 0.0);
/// assert!(relative_error(0.0f32, 1e-30).is_infinite());
/// ```
pub fn relative_error<T: Float>(reference: T, estimate: T) -> T {
    if reference.is_zero() {
        if estimate.is_zero() {
            T::zero()
        } else {
            T::infinity()
        }
    } else {
        ((estimate - reference) / reference).abs()
    }
}

/// Square root computed in double precision and rounded once to `f32`.
///
/// The double rounding is innocuous for square roots (53 ≥ 2·24 + 2), so this
/// is the correctly rounded `f32` result and the oracle for
/// [`SqrtTier::Reference`].
#[inline(always)]
pub fn oracle_sqrt(x: f32) -> f32 {
    (x as f64).sqrt() as f32
}

/// Relative error of one tier at one input.
///
/// Reference is measured against [`oracle_sqrt`], every other tier against
/// Reference.
#[inline(always)]
pub fn tier_error(tier: SqrtTier, x: f32) -> f64 {
    match tier {
        SqrtTier::Reference => relative_error(oracle_sqrt(x) as f64, sqrt(x) as f64),
        _ => relative_error(sqrt(x) as f64, tier.apply(x) as f64),
    }
}

/// Sampling parameters for the accuracy harness.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Number of uniformly distributed inputs.
    pub samples: usize,
    /// Base seed; every chunk derives its own stream from it.
    pub seed: u64,
    /// Inclusive lower bound of the input range.
    pub lower: f32,
    /// Exclusive upper bound of the input range.
    pub upper: f32,
    /// Inputs per parallel work item.
    pub chunk_size: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            samples: DEFAULT_SAMPLES,
            seed: DEFAULT_SEED,
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ValidationConfig {
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_range(mut self, lower: f32, upper: f32) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Checks that the configuration describes a non-empty, finite,
    /// non-negative sample.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(config_error("sample count must be positive"));
        }
        if self.chunk_size == 0 {
            return Err(config_error("chunk size must be positive"));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(config_error(format!(
                "range bounds must be finite, got [{}, {})",
                self.lower, self.upper
            )));
        }
        if self.lower < 0.0 {
            return Err(config_error(format!(
                "square roots are only validated on x >= 0, got lower bound {}",
                self.lower
            )));
        }
        if self.lower >= self.upper {
            return Err(config_error(format!(
                "empty range [{}, {})",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    fn chunk_count(&self) -> usize {
        self.samples.div_ceil(self.chunk_size)
    }

    /// The inputs of one chunk. Callers must have validated the config.
    fn chunk_inputs(&self, chunk: usize) -> impl Iterator<Item = f32> {
        let start = chunk * self.chunk_size;
        let len = self.chunk_size.min(self.samples - start);
        let seed = self.seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = StdRng::seed_from_u64(seed);
        let (lower, upper) = (self.lower, self.upper);

        (0..len).map(move |_| rng.random_range(lower..upper))
    }

    /// All inputs of the sample, in chunk order.
    pub fn inputs(&self) -> Result<Vec<f32>> {
        self.validate()?;
        Ok((0..self.chunk_count())
            .flat_map(|chunk| self.chunk_inputs(chunk))
            .collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ErrorStats {
    max: f64,
    worst_input: f32,
    sum: f64,
    count: usize,
}

impl ErrorStats {
    // NaN counts as worse than anything, so a broken estimate cannot hide.
    fn is_worse(candidate: f64, current: f64) -> bool {
        (is_nan(candidate) && !is_nan(current)) || candidate > current
    }

    fn record(&mut self, x: f32, error: f64) {
        if Self::is_worse(error, self.max) {
            self.max = error;
            self.worst_input = x;
        }
        self.sum += error;
        self.count += 1;
    }

    fn merge(self, other: Self) -> Self {
        let (max, worst_input) = if Self::is_worse(other.max, self.max) {
            (other.max, other.worst_input)
        } else {
            (self.max, self.worst_input)
        };
        ErrorStats {
            max,
            worst_input,
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }
}

/// Accuracy of one tier over one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    pub tier: SqrtTier,
    pub samples: usize,
    pub max_relative_error: f64,
    pub mean_relative_error: f64,
    /// Input at which `max_relative_error` was observed.
    pub worst_input: f32,
    pub ceiling: f64,
}

impl AccuracyReport {
    /// `true` when the maximum error is strictly below the ceiling.
    pub fn passed(&self) -> bool {
        self.max_relative_error < self.ceiling
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Max relative error with {}: {:e} (mean {:e}, ceiling {:e}, worst input {:e}, {} samples) {}",
            self.tier,
            self.max_relative_error,
            self.mean_relative_error,
            self.ceiling,
            self.worst_input,
            self.samples,
            if self.passed() { "ok" } else { "FAILED" }
        )
    }
}

/// Measures a tier without enforcing its ceiling.
pub fn measure_tier(tier: SqrtTier, config: &ValidationConfig) -> Result<AccuracyReport> {
    config.validate()?;

    // Chunks are merged in order so the floating-point sum does not depend on
    // how rayon split the work.
    let stats = (0..config.chunk_count())
        .into_par_iter()
        .map(|chunk| {
            let mut stats = ErrorStats::default();
            for x in config.chunk_inputs(chunk) {
                stats.record(x, tier_error(tier, x));
            }
            stats
        })
        .collect::<Vec<_>>()
        .into_iter()
        .fold(ErrorStats::default(), ErrorStats::merge);

    Ok(AccuracyReport {
        tier,
        samples: stats.count,
        max_relative_error: stats.max,
        mean_relative_error: stats.sum / stats.count as f64,
        worst_input: stats.worst_input,
        ceiling: tier.ceiling(),
    })
}

/// Measures a tier and fails with [`FpError::CeilingExceeded`] when its
/// maximum relative error reaches the ceiling.
///
/// [`FpError::CeilingExceeded`]: crate::FpError::CeilingExceeded
pub fn validate_tier(tier: SqrtTier, config: &ValidationConfig) -> Result<AccuracyReport> {
    let report = measure_tier(tier, config)?;
    if report.passed() {
        Ok(report)
    } else {
        Err(ceiling_exceeded(
            tier,
            report.max_relative_error,
            report.ceiling,
            report.worst_input,
        ))
    }
}

/// Measures every tier in [`SqrtTier::ALL`] on the same inputs.
pub fn measure_all(config: &ValidationConfig) -> Result<Vec<AccuracyReport>> {
    SqrtTier::ALL
        .iter()
        .map(|&tier| measure_tier(tier, config))
        .collect()
}

/// Validates every tier in [`SqrtTier::ALL`], stopping at the first violation.
pub fn validate_all(config: &ValidationConfig) -> Result<Vec<AccuracyReport>> {
    SqrtTier::ALL
        .iter()
        .map(|&tier| validate_tier(tier, config))
        .collect()
}

fn check_range(start: u32, end: u32) -> Result<u64> {
    if start > end {
        return Err(config_error(format!(
            "empty bit range {start:#010x}..={end:#010x}"
        )));
    }
    Ok(u64::from(end - start) + 1)
}

/// Checks `reinterpret_as_int(reinterpret_as_float(b)) == b` for every `b`
/// in `start..=end`. Returns the number of patterns checked.
///
/// `verify_round_trip(0, u32::MAX)` is the exhaustive sweep.
pub fn verify_round_trip(start: u32, end: u32) -> Result<u64> {
    let count = check_range(start, end)?;

    (start..=end).into_par_iter().try_for_each(|bits| {
        let decoded = reinterpret_as_int(reinterpret_as_float(bits));
        if decoded == bits {
            Ok(())
        } else {
            Err(round_trip_error(bits, decoded))
        }
    })?;

    Ok(count)
}

fn expected_class(x: f32) -> FloatClass {
    match x.classify() {
        FpCategory::Nan => FloatClass::Nan,
        FpCategory::Infinite => FloatClass::Infinite,
        FpCategory::Zero | FpCategory::Subnormal | FpCategory::Normal => FloatClass::Finite,
    }
}

/// Checks the classifier against the IEEE-754 category of every pattern in
/// `start..=end`. Returns the number of patterns checked.
pub fn verify_classification(start: u32, end: u32) -> Result<u64> {
    let count = check_range(start, end)?;

    (start..=end).into_par_iter().try_for_each(|bits| {
        let x = reinterpret_as_float(bits);
        let class = classify(x);
        if class == expected_class(x) {
            Ok(())
        } else {
            Err(misclassified(bits, class))
        }
    })?;

    Ok(count)
}
