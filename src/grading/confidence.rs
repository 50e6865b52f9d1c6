//! Confidence estimation.
//!
//! Confidence is `base + fraction * spread`, where the band (base, spread)
//! comes from the grade tier and `fraction` in [0, 1] comes from an injected
//! [`SpreadSource`]. Keeping the source explicit makes every result
//! reproducible.

use super::GradeTier;
use crate::config::ConfidenceBands;
use crate::core::{round_to, Confidence, OverallGrade};
use xxhash_rust::xxh64::xxh64;

/// Supplies the position within a confidence band.
pub trait SpreadSource: Send + Sync {
    /// A fraction in [0, 1] for grading `card_id` at `grade`.
    fn fraction(&self, card_id: &str, grade: OverallGrade) -> f64;
}

/// The same fraction for every grading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpread(f64);

impl FixedSpread {
    pub fn new(fraction: f64) -> Self {
        Self(if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) })
    }

    /// Always the band's lower bound.
    pub fn floor() -> Self {
        Self(0.0)
    }

    /// Always the middle of the band.
    pub fn midpoint() -> Self {
        Self(0.5)
    }
}

impl Default for FixedSpread {
    fn default() -> Self {
        Self::midpoint()
    }
}

impl SpreadSource for FixedSpread {
    fn fraction(&self, _card_id: &str, _grade: OverallGrade) -> f64 {
        self.0
    }
}

/// Deterministic pseudo-random fraction derived from a seed, the card and
/// the grade. Identical inputs always land on the same point of the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededSpread {
    seed: u64,
}

impl SeededSpread {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl SpreadSource for SeededSpread {
    fn fraction(&self, card_id: &str, grade: OverallGrade) -> f64 {
        // grade has one decimal, so tenths identify it exactly
        let tenths = (grade.value() * 10.0).round() as u64;
        let hash = xxh64(card_id.as_bytes(), self.seed.wrapping_mul(31).wrapping_add(tenths));
        // top 53 bits give a uniform f64 in [0, 1)
        (hash >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Maps an overall grade to a confidence using tiered bands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfidenceEstimator {
    bands: ConfidenceBands,
}

impl ConfidenceEstimator {
    pub fn new(bands: ConfidenceBands) -> Self {
        Self { bands }
    }

    /// Confidence at `spread_fraction` of the grade's band, rounded to three
    /// decimals. The fraction is clamped to [0, 1].
    pub fn estimate(&self, grade: OverallGrade, spread_fraction: f64) -> Confidence {
        let band = self.bands.band_for(GradeTier::of(grade));
        let fraction = if spread_fraction.is_nan() {
            0.0
        } else {
            spread_fraction.clamp(0.0, 1.0)
        };
        Confidence::clamped(round_to(band.base + fraction * band.spread, 3))
    }

    /// Lowest and highest confidence attainable for `grade`.
    pub fn range(&self, grade: OverallGrade) -> (f64, f64) {
        let band = self.bands.band_for(GradeTier::of(grade));
        (band.base, band.ceiling())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(value: f64) -> OverallGrade {
        OverallGrade::new(value).unwrap()
    }

    #[test]
    fn floor_of_each_tier() {
        let estimator = ConfidenceEstimator::default();
        assert_eq!(estimator.estimate(grade(9.8), 0.0).value(), 0.75);
        assert_eq!(estimator.estimate(grade(9.0), 0.0).value(), 0.80);
        assert_eq!(estimator.estimate(grade(7.5), 0.0).value(), 0.85);
        assert_eq!(estimator.estimate(grade(4.0), 0.0).value(), 0.90);
    }

    #[test]
    fn ceiling_of_each_tier() {
        let estimator = ConfidenceEstimator::default();
        assert_eq!(estimator.estimate(grade(9.8), 1.0).value(), 0.90);
        assert_eq!(estimator.estimate(grade(9.0), 1.0).value(), 0.95);
        assert_eq!(estimator.estimate(grade(7.5), 1.0).value(), 0.95);
        assert_eq!(estimator.estimate(grade(4.0), 1.0).value(), 0.98);
    }

    #[test]
    fn higher_tiers_have_lower_floors_and_wider_bands() {
        let estimator = ConfidenceEstimator::default();
        let (top_floor, top_ceiling) = estimator.range(grade(10.0));
        let (low_floor, low_ceiling) = estimator.range(grade(3.0));
        assert!(top_floor < low_floor);
        assert!(top_ceiling - top_floor > low_ceiling - low_floor);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        let estimator = ConfidenceEstimator::default();
        assert_eq!(estimator.estimate(grade(4.0), 7.0).value(), 0.98);
        assert_eq!(estimator.estimate(grade(4.0), -3.0).value(), 0.90);
        assert_eq!(estimator.estimate(grade(4.0), f64::NAN).value(), 0.90);
    }

    #[test]
    fn seeded_spread_is_reproducible() {
        let spread = SeededSpread::new(42);
        let first = spread.fraction("base1-4", grade(8.7));
        let second = spread.fraction("base1-4", grade(8.7));
        assert_eq!(first, second);
        assert!((0.0..1.0).contains(&first));
    }

    #[test]
    fn seeded_spread_varies_with_seed() {
        let a = SeededSpread::new(1).fraction("base1-4", grade(8.7));
        let b = SeededSpread::new(2).fraction("base1-4", grade(8.7));
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_spread_clamps() {
        assert_eq!(FixedSpread::new(2.0).fraction("x", grade(5.0)), 1.0);
        assert_eq!(FixedSpread::floor().fraction("x", grade(5.0)), 0.0);
        assert_eq!(FixedSpread::default().fraction("x", grade(5.0)), 0.5);
    }
}
