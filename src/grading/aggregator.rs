//! Composite grade from the four condition axes.

use crate::config::AxisWeights;
use crate::core::{AxisScores, OverallGrade};

/// Weighted-sum aggregator.
///
/// `AxisScores` can only be built from in-range values, so aggregation has no
/// failure path: out-of-range input is rejected with `InvalidScore` when the
/// scores are constructed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradeAggregator {
    weights: AxisWeights,
}

impl GradeAggregator {
    pub fn new(weights: AxisWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &AxisWeights {
        &self.weights
    }

    /// Weighted sum of the axis scores, rounded half-up to one decimal.
    pub fn aggregate(&self, scores: &AxisScores) -> OverallGrade {
        let weighted: f64 = scores
            .iter()
            .map(|(axis, score)| self.weights.weight(axis) * score.value())
            .sum();
        OverallGrade::from_weighted(weighted)
    }
}

/// Aggregate with the default weights (0.20 / 0.25 / 0.25 / 0.30).
pub fn aggregate(scores: &AxisScores) -> OverallGrade {
    GradeAggregator::default().aggregate(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(c: f64, k: f64, e: f64, s: f64) -> AxisScores {
        AxisScores::new(c, k, e, s).unwrap()
    }

    #[test]
    fn uniform_scores_aggregate_to_same_grade() {
        assert_eq!(aggregate(&AxisScores::uniform(9.0).unwrap()).value(), 9.0);
        assert_eq!(aggregate(&AxisScores::uniform(5.0).unwrap()).value(), 5.0);
        assert_eq!(aggregate(&AxisScores::uniform(10.0).unwrap()).value(), 10.0);
        assert_eq!(aggregate(&AxisScores::uniform(0.0).unwrap()).value(), 0.0);
    }

    #[test]
    fn surface_weighs_most() {
        // 0.30 * 10 vs 0.20 * 10
        let surface_only = aggregate(&scores(0.0, 0.0, 0.0, 10.0));
        let centering_only = aggregate(&scores(10.0, 0.0, 0.0, 0.0));
        assert_eq!(surface_only.value(), 3.0);
        assert_eq!(centering_only.value(), 2.0);
    }

    #[test]
    fn mixed_scores_round_to_one_decimal() {
        // 0.2*9.1 + 0.25*8.3 + 0.25*7.7 + 0.3*9.9 = 8.79
        let grade = aggregate(&scores(9.1, 8.3, 7.7, 9.9));
        assert_eq!(grade.value(), 8.8);
    }

    #[test]
    fn exact_halves_round_up() {
        // 0.30 * 4.5 = 1.35
        assert_eq!(aggregate(&scores(0.0, 0.0, 0.0, 4.5)).value(), 1.4);
        // 2.0 + 2.5 + 0.85 + 0.6 = 5.95
        assert_eq!(aggregate(&scores(10.0, 10.0, 3.4, 2.0)).value(), 6.0);
        // 0.2 * 8.5 + 0.25 * 8.5 + 0.25 * 8.5 + 0.3 * 8.0 = 8.35
        assert_eq!(aggregate(&scores(8.5, 8.5, 8.5, 8.0)).value(), 8.4);
    }

    #[test]
    fn custom_weights_are_applied() {
        let aggregator = GradeAggregator::new(AxisWeights {
            centering: 1.0,
            corners: 0.0,
            edges: 0.0,
            surface: 0.0,
        });
        assert_eq!(aggregator.aggregate(&scores(6.4, 1.0, 1.0, 1.0)).value(), 6.4);
    }
}
