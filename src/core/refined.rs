//! Refined score types
//!
//! Condition inputs are validated once, at construction, and the types then
//! guarantee their ranges for the rest of the pipeline:
//!
//! - [`AxisScore`]: a single condition sub-rating in [0.0, 10.0], quantized
//!   to steps of 0.1
//! - [`OverallGrade`]: the weighted composite in [0.0, 10.0], one decimal
//! - [`Confidence`]: estimator certainty in (0.0, 1.0]
//! - [`EstimatedValue`]: a non-negative currency amount, two decimals

use serde::{Deserialize, Serialize};
use stillwater::refined::Predicate;

/// Upper bound of every condition scale.
pub const MAX_SCORE: f64 = 10.0;

/// Round half-up to `places` decimals.
///
/// Only meaningful for non-negative input, which is all the grading scales
/// ever produce; `f64::round` rounds half away from zero. The scaled value is
/// snapped to a 1e-6 grid first so sums that land an ulp below an exact half
/// (0.3 * 4.5 = 1.3499999999999999) still round up.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = ((value * factor) * SNAP).round() / SNAP;
    scaled.round() / factor
}

const SNAP: f64 = 1e6;

// ============================================================================
// Predicates
// ============================================================================

/// Predicate for values on the 0-10 condition scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionScale;

impl Predicate<f64> for ConditionScale {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if (0.0..=MAX_SCORE).contains(value) {
            Ok(())
        } else {
            Err("value must be in range [0.0, 10.0]")
        }
    }
}

/// Predicate for finite, non-negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegativeAmount;

impl Predicate<f64> for NonNegativeAmount {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if value.is_finite() && *value >= 0.0 {
            Ok(())
        } else {
            Err("value must be a finite amount >= 0.0")
        }
    }
}

// ============================================================================
// Score Types
// ============================================================================

/// One condition sub-rating.
///
/// Valid range: [0.0, 10.0]. The stored value is quantized to one decimal
/// place, the resolution a vision model reports at.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AxisScore(f64);

impl AxisScore {
    /// Validate and quantize a raw score.
    pub fn new(value: f64) -> Result<Self, &'static str> {
        ConditionScale::check(&value)?;
        Ok(Self(round_to(value, 1)))
    }

    /// Get the inner value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for AxisScore {
    type Error = &'static str;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AxisScore> for f64 {
    fn from(score: AxisScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for AxisScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Composite condition grade on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OverallGrade(f64);

impl OverallGrade {
    /// Validate a grade and round it to one decimal.
    pub fn new(value: f64) -> Result<Self, &'static str> {
        ConditionScale::check(&value)?;
        Ok(Self(round_to(value, 1)))
    }

    /// Build a grade from a weighted sum that is already known to be in range
    /// up to floating point noise.
    pub(crate) fn from_weighted(value: f64) -> Self {
        Self(round_to(value, 1).clamp(0.0, MAX_SCORE))
    }

    /// Get the inner value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole-number professional grade implied by this grade.
    pub fn floor(self) -> u8 {
        // in [0, 10] by construction
        self.0.floor() as u8
    }
}

impl TryFrom<f64> for OverallGrade {
    type Error = &'static str;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OverallGrade> for f64 {
    fn from(grade: OverallGrade) -> Self {
        grade.0
    }
}

impl std::fmt::Display for OverallGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Estimator certainty in the interval (0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence, validating it is in (0.0, 1.0].
    pub fn new(value: f64) -> Result<Self, &'static str> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err("confidence must be in range (0.0, 1.0]")
        }
    }

    /// Confidence from a validated band, clamped into (0.0, 1.0] against
    /// floating point drift.
    pub(crate) fn clamped(value: f64) -> Self {
        Self(value.clamp(f64::MIN_POSITIVE, 1.0))
    }

    /// Get the inner value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = &'static str;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// Estimated graded market value in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EstimatedValue(f64);

impl EstimatedValue {
    /// Validate an amount and round it to cents.
    pub fn new(value: f64) -> Result<Self, &'static str> {
        NonNegativeAmount::check(&value)?;
        Ok(Self(round_to(value, 2)))
    }

    /// Get the inner value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for EstimatedValue {
    type Error = &'static str;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EstimatedValue> for f64 {
    fn from(value: EstimatedValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for EstimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
