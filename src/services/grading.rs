//! Preview and persisted grading over one shared pipeline.

use crate::collaborators::{ConditionAnalyzer, GradingStore, ImageSet, MarketData};
use crate::core::{AxisScores, CardGrading, GradingResult};
use crate::errors::Result;
use crate::grading::{validate_card_id, GradingPipeline};
use tracing::info;
use uuid::Uuid;

/// Grading entry points for the app.
///
/// `preview` and the `*_and_save` methods run the same pipeline; they differ
/// only in whether the result is handed to the store.
#[derive(Debug)]
pub struct GradingService<S: GradingStore> {
    pipeline: GradingPipeline,
    store: S,
}

impl<S: GradingStore> GradingService<S> {
    pub fn new(pipeline: GradingPipeline, store: S) -> Self {
        Self { pipeline, store }
    }

    pub fn pipeline(&self) -> &GradingPipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Grade without persisting anything.
    pub fn preview(
        &self,
        card_id: &str,
        scores: AxisScores,
        base_value: f64,
    ) -> Result<GradingResult> {
        self.pipeline.run(card_id, scores, base_value)
    }

    /// Grade and record the result in `user_id`'s history.
    pub fn grade_and_save(
        &self,
        user_id: &str,
        card_id: &str,
        scores: AxisScores,
        base_value: f64,
    ) -> Result<(GradingResult, CardGrading)> {
        let user_id = validate_user_id(user_id)?;
        let result = self.pipeline.run(card_id, scores, base_value)?;
        let record = self.save(user_id, &result)?;
        Ok((result, record))
    }

    /// Persist an already computed result.
    pub fn save(&self, user_id: &str, result: &GradingResult) -> Result<CardGrading> {
        let user_id = validate_user_id(user_id)?;
        let record = CardGrading::from_result(user_id, result, Uuid::new_v4().as_u128());
        self.store.save(record.clone())?;
        info!(
            user_id,
            card_id = result.card_id(),
            grade = result.overall_grade().value(),
            verification_id = %record.verification_id,
            "saved grading"
        );
        Ok(record)
    }

    /// Full flow from photos: analyze, price, grade, persist. Collaborator
    /// failures are returned as-is and nothing is saved.
    pub fn analyze_and_save(
        &self,
        user_id: &str,
        card_id: &str,
        images: &ImageSet,
        analyzer: &dyn ConditionAnalyzer,
        market: &dyn MarketData,
    ) -> Result<(GradingResult, CardGrading)> {
        let user_id = validate_user_id(user_id)?;
        let card_id = validate_card_id(card_id)?;
        let scores = analyzer.analyze(images)?;
        let base_value = market.base_value(card_id)?;
        self.grade_and_save(user_id, card_id, scores, base_value)
    }

    pub fn history(&self, user_id: &str) -> Result<Vec<CardGrading>> {
        self.store.history(validate_user_id(user_id)?)
    }

    pub fn history_for_card(&self, user_id: &str, card_id: &str) -> Result<Vec<CardGrading>> {
        self.store
            .history_for_card(validate_user_id(user_id)?, validate_card_id(card_id)?)
    }
}

fn validate_user_id(user_id: &str) -> Result<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        Err(crate::errors::CertigradeError::invalid_input(
            "user id must not be empty",
        ))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{CardImage, InMemoryGradingStore, KnownScores, PriceList};
    use crate::core::GradingCompany;
    use crate::errors::CertigradeError;

    struct OfflineAnalyzer;

    impl ConditionAnalyzer for OfflineAnalyzer {
        fn analyze(&self, _images: &ImageSet) -> Result<AxisScores> {
            Err(CertigradeError::upstream("vision", "model endpoint timed out"))
        }
    }

    fn service() -> GradingService<InMemoryGradingStore> {
        GradingService::new(GradingPipeline::default(), InMemoryGradingStore::new())
    }

    fn images() -> ImageSet {
        ImageSet::new(vec![CardImage::new("file:///front.jpg", 2048)]).unwrap()
    }

    #[test]
    fn preview_does_not_persist() {
        let service = service();
        let result = service
            .preview("base1-4", AxisScores::uniform(9.0).unwrap(), 100.0)
            .unwrap();
        assert_eq!(result.estimated_value().value(), 250.0);
        assert!(service.store().is_empty());
    }

    #[test]
    fn grade_and_save_records_history() {
        let service = service();
        let (result, record) = service
            .grade_and_save("ash", "base1-4", AxisScores::uniform(9.0).unwrap(), 100.0)
            .unwrap();

        assert_eq!(record.id, result.id());
        assert_eq!(record.grading_company, GradingCompany::DeckLabAi);
        assert!(record.verification_id.as_str().starts_with("DL"));
        assert_eq!(service.history("ash").unwrap(), vec![record]);
    }

    #[test]
    fn analyze_and_save_uses_collaborators() {
        let service = service();
        let analyzer = KnownScores(AxisScores::new(9.5, 9.5, 9.5, 9.5).unwrap());
        let market = PriceList::new().with_price("base1-4", 200.0);

        let (result, _) = service
            .analyze_and_save("ash", "base1-4", &images(), &analyzer, &market)
            .unwrap();

        assert_eq!(result.overall_grade().value(), 9.5);
        assert_eq!(result.estimated_value().value(), 700.0);
        assert_eq!(service.history_for_card("ash", "base1-4").unwrap().len(), 1);
    }

    #[test]
    fn upstream_failures_surface_and_save_nothing() {
        let service = service();
        let market = PriceList::new().with_price("base1-4", 200.0);

        let err = service
            .analyze_and_save("ash", "base1-4", &images(), &OfflineAnalyzer, &market)
            .unwrap_err();
        assert!(matches!(err, CertigradeError::UpstreamUnavailable { .. }));

        let analyzer = KnownScores(AxisScores::uniform(9.0).unwrap());
        let err = service
            .analyze_and_save("ash", "unpriced", &images(), &analyzer, &PriceList::new())
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(service.store().is_empty());
    }

    #[test]
    fn invalid_scores_never_reach_the_store() {
        let err = AxisScores::new(11.0, 9.0, 9.0, 9.0).unwrap_err();
        assert!(matches!(err, CertigradeError::InvalidScore { .. }));
        assert!(service().store().is_empty());
    }

    #[test]
    fn blank_user_is_rejected() {
        let err = service()
            .grade_and_save(" ", "base1-4", AxisScores::uniform(9.0).unwrap(), 1.0)
            .unwrap_err();
        assert!(matches!(err, CertigradeError::InvalidInput(_)));
    }
}
