//! End-to-end grading of one card.
//!
//! `GradingPipeline` holds no mutable state. One instance can grade any
//! number of cards concurrently; [`GradingPipeline::grade_batch`] does so
//! on the rayon pool.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};
use uuid::Uuid;

use super::{
    recommend, value::validate_base_value, ConfidenceEstimator, FixedSpread, FlawDetector,
    GradeAggregator, SpreadSource, ValueEstimator,
};
use crate::config::CertigradeConfig;
use crate::core::{AxisScores, GradingParts, GradingResult, RawAxisScores};
use crate::errors::{CertigradeError, Result};

/// Longest accepted card identifier, in bytes.
pub const MAX_CARD_ID_LEN: usize = 128;

/// One grading request as accepted from JSON input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequest {
    pub card_id: String,
    pub axis_scores: RawAxisScores,
    pub base_value: f64,
}

pub struct GradingPipeline {
    aggregator: GradeAggregator,
    confidence: ConfidenceEstimator,
    flaws: FlawDetector,
    value: ValueEstimator,
    spread: Box<dyn SpreadSource>,
}

impl Default for GradingPipeline {
    fn default() -> Self {
        Self::new(&CertigradeConfig::default())
    }
}

impl std::fmt::Debug for GradingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradingPipeline")
            .field("aggregator", &self.aggregator)
            .field("confidence", &self.confidence)
            .field("flaws", &self.flaws)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl GradingPipeline {
    /// Pipeline configured from `config`, placing confidence at the middle
    /// of each band.
    pub fn new(config: &CertigradeConfig) -> Self {
        Self {
            aggregator: GradeAggregator::new(config.weights()),
            confidence: ConfidenceEstimator::new(config.confidence_bands()),
            flaws: FlawDetector::new(config.flaw_thresholds()),
            value: ValueEstimator::new(config.multiplier_table()),
            spread: Box::new(FixedSpread::midpoint()),
        }
    }

    pub fn with_spread(mut self, spread: impl SpreadSource + 'static) -> Self {
        self.spread = Box::new(spread);
        self
    }

    pub fn aggregator(&self) -> &GradeAggregator {
        &self.aggregator
    }

    pub fn value_estimator(&self) -> &ValueEstimator {
        &self.value
    }

    /// Grade a card with a fresh id and the current time.
    pub fn run(&self, card_id: &str, scores: AxisScores, base_value: f64) -> Result<GradingResult> {
        self.run_at(
            card_id,
            scores,
            base_value,
            Uuid::new_v4().to_string(),
            Utc::now(),
        )
    }

    /// Grade a card with an explicit identity and timestamp.
    ///
    /// All input is validated before anything is computed; on error no
    /// result exists.
    pub fn run_at(
        &self,
        card_id: &str,
        scores: AxisScores,
        base_value: f64,
        id: String,
        timestamp: DateTime<Utc>,
    ) -> Result<GradingResult> {
        let card_id = validate_card_id(card_id)?;
        validate_base_value(base_value)?;

        let span = debug_span!("grading", card_id = %card_id);
        let _enter = span.enter();

        let overall_grade = self.aggregator.aggregate(&scores);
        let confidence = self
            .confidence
            .estimate(overall_grade, self.spread.fraction(card_id, overall_grade));
        let flaws = self
            .flaws
            .detect(&scores)
            .into_iter()
            .map(|mut flaw| {
                flaw.id = format!("{}-{}", id, flaw.id);
                flaw
            })
            .collect::<Vec<_>>();
        let estimated_value = self.value.estimate(base_value, overall_grade)?;
        let grading_recommendation = recommend(overall_grade, estimated_value);

        debug!(
            grade = overall_grade.value(),
            confidence = confidence.value(),
            flaws = flaws.len(),
            value = estimated_value.value(),
            "graded card"
        );

        Ok(GradingParts {
            id,
            card_id: card_id.to_string(),
            overall_grade,
            sub_grades: scores,
            confidence,
            flaws,
            estimated_value,
            grading_recommendation,
            timestamp,
        }
        .into())
    }

    /// Validate and grade a raw request.
    pub fn run_request(&self, request: &GradingRequest) -> Result<GradingResult> {
        let scores = AxisScores::try_from(request.axis_scores)?;
        self.run(&request.card_id, scores, request.base_value)
    }

    /// Grade many requests in parallel. Results keep the input order; one
    /// invalid request does not affect the others.
    pub fn grade_batch(&self, requests: &[GradingRequest]) -> Vec<Result<GradingResult>> {
        requests
            .par_iter()
            .map(|request| self.run_request(request))
            .collect()
    }
}

/// Trimmed card id, or `InvalidInput` if it is empty, too long or contains
/// control characters.
pub fn validate_card_id(card_id: &str) -> Result<&str> {
    let trimmed = card_id.trim();
    if trimmed.is_empty() {
        return Err(CertigradeError::invalid_input("card id must not be empty"));
    }
    if trimmed.len() > MAX_CARD_ID_LEN {
        return Err(CertigradeError::invalid_input(format!(
            "card id longer than {} bytes",
            MAX_CARD_ID_LEN
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(CertigradeError::invalid_input(
            "card id must not contain control characters",
        ));
    }
    Ok(trimmed)
}
