//! Core domain types shared by every grading stage.

pub mod refined;
pub mod types;

pub use refined::{round_to, AxisScore, Confidence, EstimatedValue, OverallGrade, MAX_SCORE};
pub use types::{
    Axis, AxisScores, CardGrading, Flaw, FlawSeverity, FlawType, GradingCompany, GradingResult,
    RawAxisScores, Region, VerificationId,
};

pub(crate) use types::GradingParts;
