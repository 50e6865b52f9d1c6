//! Trading card pre-grading.
//!
//! Four condition sub-grades (centering, corners, edges, surface) go in; a
//! [`GradingResult`] with an overall grade, a confidence, detected flaws, an
//! estimated graded value and a professional-grading recommendation comes
//! out. Photo analysis, market prices and history storage sit behind the
//! traits in [`collaborators`].

// Export modules for library usage
pub mod cli;
pub mod collaborators;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod grading;
pub mod io;
pub mod observability;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    Axis, AxisScore, AxisScores, CardGrading, Confidence, EstimatedValue, Flaw, FlawSeverity,
    FlawType, GradingCompany, GradingResult, OverallGrade, RawAxisScores, Region,
    VerificationId,
};

pub use crate::errors::{CertigradeError, Result};

pub use crate::grading::{
    aggregate, detect_flaws, grade_multiplier, recommend, ConditionLabel, ConfidenceEstimator,
    FixedSpread, FlawDetector, GradeAggregator, GradeTier, GradingPipeline, GradingRequest,
    SeededSpread, SpreadSource, ValueEstimator,
};

pub use crate::config::{load_config, CertigradeConfig};

pub use crate::collaborators::{
    ConditionAnalyzer, GradingStore, ImageSet, InMemoryGradingStore, JsonFileStore, MarketData,
};

pub use crate::services::GradingService;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
