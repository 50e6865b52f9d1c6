//! Flaw detection from axis scores.
//!
//! Each axis scoring below the flaw threshold yields exactly one flaw, in
//! detection order (centering, corners, edges, surface). Descriptions and
//! regions are fixed per axis: the score says how bad an axis is, not where
//! on the card the damage sits, so the region marks where that kind of
//! damage is inspected.

use crate::config::FlawThresholds;
use crate::core::{Axis, AxisScores, Flaw, FlawSeverity, Region};

/// Canned description and inspection region for an axis.
struct AxisFlawTemplate {
    description: &'static str,
    region: Region,
}

fn template_for(axis: Axis) -> AxisFlawTemplate {
    match axis {
        Axis::Centering => AxisFlawTemplate {
            description: "Card is off-center, affecting the border symmetry",
            // full card at 10% inset
            region: Region::new(0.1, 0.1, 0.8, 0.8),
        },
        Axis::Corners => AxisFlawTemplate {
            description: "Corner wear detected, may affect grading",
            region: Region::new(0.85, 0.85, 0.1, 0.1),
        },
        Axis::Edges => AxisFlawTemplate {
            description: "Edge wear or roughness detected",
            region: Region::new(0.0, 0.4, 1.0, 0.2),
        },
        Axis::Surface => AxisFlawTemplate {
            description: "Surface imperfections detected",
            region: Region::new(0.3, 0.3, 0.4, 0.4),
        },
    }
}

/// Local flaw id; the pipeline scopes it to the grading result.
pub(crate) fn local_flaw_id(axis: Axis) -> String {
    format!("flaw-{}", axis.ordinal())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlawDetector {
    thresholds: FlawThresholds,
}

impl FlawDetector {
    pub fn new(thresholds: FlawThresholds) -> Self {
        Self { thresholds }
    }

    pub fn severity_for(&self, score: f64) -> Option<FlawSeverity> {
        self.thresholds.severity_for(score)
    }

    /// At most one flaw per axis, never more than four.
    pub fn detect(&self, scores: &AxisScores) -> Vec<Flaw> {
        scores
            .iter()
            .filter_map(|(axis, score)| {
                self.severity_for(score.value())
                    .map(|severity| build_flaw(axis, severity))
            })
            .collect()
    }
}

fn build_flaw(axis: Axis, severity: FlawSeverity) -> Flaw {
    let template = template_for(axis);
    Flaw {
        id: local_flaw_id(axis),
        flaw_type: axis.flaw_type(),
        severity,
        description: template.description.to_string(),
        location: template.region,
    }
}

/// Detect flaws with the default thresholds (8.0 / 7.0 / 6.0).
pub fn detect_flaws(scores: &AxisScores) -> Vec<Flaw> {
    FlawDetector::default().detect(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FlawType;

    #[test]
    fn clean_card_has_no_flaws() {
        assert!(detect_flaws(&AxisScores::uniform(8.0).unwrap()).is_empty());
        assert!(detect_flaws(&AxisScores::uniform(10.0).unwrap()).is_empty());
    }

    #[test]
    fn worn_card_has_four_severe_flaws_in_order() {
        let flaws = detect_flaws(&AxisScores::uniform(5.0).unwrap());
        let types: Vec<FlawType> = flaws.iter().map(|f| f.flaw_type).collect();
        assert_eq!(
            types,
            vec![
                FlawType::Centering,
                FlawType::Corners,
                FlawType::Edges,
                FlawType::Surface
            ]
        );
        assert!(flaws.iter().all(|f| f.severity == FlawSeverity::Severe));
    }

    #[test]
    fn only_low_axes_are_flagged() {
        let scores = AxisScores::new(9.5, 6.5, 8.0, 7.9).unwrap();
        let flaws = detect_flaws(&scores);

        assert_eq!(flaws.len(), 2);
        assert_eq!(flaws[0].flaw_type, FlawType::Corners);
        assert_eq!(flaws[0].severity, FlawSeverity::Moderate);
        assert_eq!(flaws[0].id, "flaw-2");
        assert_eq!(flaws[1].flaw_type, FlawType::Surface);
        assert_eq!(flaws[1].severity, FlawSeverity::Minor);
        assert_eq!(flaws[1].id, "flaw-4");
    }

    #[test]
    fn regions_are_axis_specific_and_normalized() {
        let flaws = detect_flaws(&AxisScores::uniform(1.0).unwrap());
        assert_eq!(flaws[0].location, Region::new(0.1, 0.1, 0.8, 0.8));
        assert_eq!(flaws[1].location, Region::new(0.85, 0.85, 0.1, 0.1));
        assert_eq!(flaws[2].location, Region::new(0.0, 0.4, 1.0, 0.2));
        assert_eq!(flaws[3].location, Region::new(0.3, 0.3, 0.4, 0.4));
        assert!(flaws.iter().all(|f| f.location.is_normalized()));
    }

    #[test]
    fn custom_thresholds_shift_detection() {
        let detector = FlawDetector::new(FlawThresholds {
            flaw_below: 9.0,
            moderate_below: 8.0,
            severe_below: 7.0,
        });
        let flaws = detector.detect(&AxisScores::uniform(8.5).unwrap());
        assert_eq!(flaws.len(), 4);
        assert!(flaws.iter().all(|f| f.severity == FlawSeverity::Minor));
    }
}
