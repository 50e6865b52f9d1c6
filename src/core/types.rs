use super::refined::{AxisScore, Confidence, EstimatedValue, OverallGrade};
use crate::errors::{CertigradeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four independent condition axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Centering,
    Corners,
    Edges,
    Surface,
}

impl Axis {
    /// Detection order. Flaws and reports always follow it.
    pub const ALL: [Axis; 4] = [Axis::Centering, Axis::Corners, Axis::Edges, Axis::Surface];

    /// 1-based position in [`Axis::ALL`].
    pub fn ordinal(self) -> usize {
        match self {
            Axis::Centering => 1,
            Axis::Corners => 2,
            Axis::Edges => 3,
            Axis::Surface => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Centering => "Centering",
            Axis::Corners => "Corners",
            Axis::Edges => "Edges",
            Axis::Surface => "Surface",
        }
    }

    pub fn flaw_type(self) -> FlawType {
        match self {
            Axis::Centering => FlawType::Centering,
            Axis::Corners => FlawType::Corners,
            Axis::Edges => FlawType::Edges,
            Axis::Surface => FlawType::Surface,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// The four condition sub-grades of one grading attempt.
///
/// Serialized as the `subGrades` object of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    centering: AxisScore,
    corners: AxisScore,
    edges: AxisScore,
    surface: AxisScore,
}

impl AxisScores {
    /// Validate four raw scores. The first out-of-range axis, in detection
    /// order, is reported as `InvalidScore`.
    pub fn new(centering: f64, corners: f64, edges: f64, surface: f64) -> Result<Self> {
        let score = |axis: Axis, value: f64| {
            AxisScore::new(value).map_err(|_| CertigradeError::invalid_score(axis, value))
        };

        Ok(Self {
            centering: score(Axis::Centering, centering)?,
            corners: score(Axis::Corners, corners)?,
            edges: score(Axis::Edges, edges)?,
            surface: score(Axis::Surface, surface)?,
        })
    }

    /// Same score on every axis.
    pub fn uniform(value: f64) -> Result<Self> {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, axis: Axis) -> AxisScore {
        match axis {
            Axis::Centering => self.centering,
            Axis::Corners => self.corners,
            Axis::Edges => self.edges,
            Axis::Surface => self.surface,
        }
    }

    pub fn centering(&self) -> f64 {
        self.centering.value()
    }

    pub fn corners(&self) -> f64 {
        self.corners.value()
    }

    pub fn edges(&self) -> f64 {
        self.edges.value()
    }

    pub fn surface(&self) -> f64 {
        self.surface.value()
    }

    /// Axis scores in detection order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, AxisScore)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}

/// Unvalidated axis scores as they arrive from a request body or CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawAxisScores {
    pub centering: f64,
    pub corners: f64,
    pub edges: f64,
    pub surface: f64,
}

impl TryFrom<RawAxisScores> for AxisScores {
    type Error = CertigradeError;

    fn try_from(raw: RawAxisScores) -> Result<Self> {
        AxisScores::new(raw.centering, raw.corners, raw.edges, raw.surface)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlawType {
    Centering,
    Corners,
    Edges,
    Surface,
    PrintDefect,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlawSeverity {
    Minor,
    Moderate,
    Severe,
}

impl fmt::Display for FlawSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlawSeverity::Minor => write!(f, "minor"),
            FlawSeverity::Moderate => write!(f, "moderate"),
            FlawSeverity::Severe => write!(f, "severe"),
        }
    }
}

/// Bounding box as fractions of the card image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// All four components in [0, 1] and the box stays on the card.
    pub fn is_normalized(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.x)
            && unit.contains(&self.y)
            && unit.contains(&self.width)
            && unit.contains(&self.height)
            && self.x + self.width <= 1.0 + f64::EPSILON
            && self.y + self.height <= 1.0 + f64::EPSILON
    }
}

/// One detected condition defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flaw {
    pub id: String,
    #[serde(rename = "type")]
    pub flaw_type: FlawType,
    pub severity: FlawSeverity,
    pub description: String,
    pub location: Region,
}

/// The immutable outcome of one grading invocation.
///
/// Fields are only readable; a new attempt produces a new result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    id: String,
    card_id: String,
    overall_grade: OverallGrade,
    sub_grades: AxisScores,
    confidence: Confidence,
    flaws: Vec<Flaw>,
    estimated_value: EstimatedValue,
    grading_recommendation: String,
    timestamp: DateTime<Utc>,
}

/// Every computed part of a result, handed over by the pipeline in one piece
/// so a result is never observable half-built.
pub(crate) struct GradingParts {
    pub id: String,
    pub card_id: String,
    pub overall_grade: OverallGrade,
    pub sub_grades: AxisScores,
    pub confidence: Confidence,
    pub flaws: Vec<Flaw>,
    pub estimated_value: EstimatedValue,
    pub grading_recommendation: String,
    pub timestamp: DateTime<Utc>,
}

impl From<GradingParts> for GradingResult {
    fn from(parts: GradingParts) -> Self {
        Self {
            id: parts.id,
            card_id: parts.card_id,
            overall_grade: parts.overall_grade,
            sub_grades: parts.sub_grades,
            confidence: parts.confidence,
            flaws: parts.flaws,
            estimated_value: parts.estimated_value,
            grading_recommendation: parts.grading_recommendation,
            timestamp: parts.timestamp,
        }
    }
}

impl GradingResult {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn overall_grade(&self) -> OverallGrade {
        self.overall_grade
    }

    pub fn sub_grades(&self) -> &AxisScores {
        &self.sub_grades
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn flaws(&self) -> &[Flaw] {
        &self.flaws
    }

    pub fn estimated_value(&self) -> EstimatedValue {
        self.estimated_value
    }

    pub fn recommendation(&self) -> &str {
        &self.grading_recommendation
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Worst severity among the detected flaws, if any.
    pub fn worst_severity(&self) -> Option<FlawSeverity> {
        self.flaws.iter().map(|flaw| flaw.severity).max()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradingCompany {
    #[serde(rename = "PSA")]
    Psa,
    #[serde(rename = "Beckett")]
    Beckett,
    #[serde(rename = "CGC")]
    Cgc,
    #[serde(rename = "DeckLab AI")]
    DeckLabAi,
    #[serde(rename = "Other")]
    Other,
}

impl fmt::Display for GradingCompany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GradingCompany::Psa => "PSA",
            GradingCompany::Beckett => "Beckett",
            GradingCompany::Cgc => "CGC",
            GradingCompany::DeckLabAi => "DeckLab AI",
            GradingCompany::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Verification code printed on a saved pre-grade: `DL`, the grading time in
/// unix milliseconds, then nine uppercase base-36 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationId(String);

impl VerificationId {
    const SUFFIX_LEN: usize = 9;
    const ALPHABET: &'static [u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    /// Derive a verification id from the grading time and 128 bits of entropy.
    pub fn generate(graded_at: DateTime<Utc>, entropy: u128) -> Self {
        let mut remaining = entropy;
        let suffix: String = (0..Self::SUFFIX_LEN)
            .map(|_| {
                let digit = (remaining % 36) as usize;
                remaining /= 36;
                Self::ALPHABET[digit] as char
            })
            .collect();
        Self(format!("DL{}{}", graded_at.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A grading result as persisted to a user's grading history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGrading {
    pub id: String,
    pub user_id: String,
    pub card_id: String,
    pub overall_grade: OverallGrade,
    pub centering: AxisScore,
    pub corners: AxisScore,
    pub edges: AxisScore,
    pub surface: AxisScore,
    pub confidence: Confidence,
    pub grading_company: GradingCompany,
    #[serde(rename = "verificationID")]
    pub verification_id: VerificationId,
    pub flaws: Vec<Flaw>,
    pub date_graded: DateTime<Utc>,
}

impl CardGrading {
    /// Record a pre-grade for `user_id`. The record keeps the result's id so
    /// history entries can be traced back to the grading that produced them.
    pub fn from_result(user_id: &str, result: &GradingResult, entropy: u128) -> Self {
        let scores = result.sub_grades();
        Self {
            id: result.id().to_string(),
            user_id: user_id.to_string(),
            card_id: result.card_id().to_string(),
            overall_grade: result.overall_grade(),
            centering: scores.get(Axis::Centering),
            corners: scores.get(Axis::Corners),
            edges: scores.get(Axis::Edges),
            surface: scores.get(Axis::Surface),
            confidence: result.confidence(),
            grading_company: GradingCompany::DeckLabAi,
            verification_id: VerificationId::generate(result.timestamp(), entropy),
            flaws: result.flaws().to_vec(),
            date_graded: result.timestamp(),
        }
    }
}
