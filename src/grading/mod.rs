//! The condition pre-grading engine.
//!
//! # Stages
//!
//! ```text
//! AxisScores ──► GradeAggregator ──► OverallGrade ──┬─► ConfidenceEstimator ──► Confidence
//!     │                                             ├─► ValueEstimator ──► EstimatedValue ─┐
//!     └────────► FlawDetector ──► [Flaw]            └────────────────────────► recommend ◄─┘
//! ```
//!
//! Every stage is a pure function of its inputs. Randomness that the
//! grading policy calls for (where a confidence lands inside its band) is
//! supplied by a [`SpreadSource`], and the base market value is a caller
//! input, so results are reproducible for fixed inputs.
//!
//! # Example
//!
//! ```rust
//! use certigrade::core::AxisScores;
//! use certigrade::grading::GradingPipeline;
//!
//! let scores = AxisScores::new(9.0, 9.0, 9.0, 9.0).unwrap();
//! let result = GradingPipeline::default().run("base1-4", scores, 100.0).unwrap();
//!
//! assert_eq!(result.overall_grade().value(), 9.0);
//! assert!(result.flaws().is_empty());
//! assert_eq!(result.estimated_value().value(), 250.0);
//! ```

pub mod aggregator;
pub mod confidence;
pub mod flaws;
pub mod pipeline;
pub mod recommendation;
pub mod tier;
pub mod value;

pub use aggregator::{aggregate, GradeAggregator};
pub use confidence::{ConfidenceEstimator, FixedSpread, SeededSpread, SpreadSource};
pub use flaws::{detect_flaws, FlawDetector};
pub use pipeline::{validate_card_id, GradingPipeline, GradingRequest};
pub use recommendation::recommend;
pub use tier::{ConditionLabel, GradeTier};
pub use value::{grade_multiplier, ValueEstimator};
