//! Grading configuration
//!
//! This module contains every tunable constant of the grading pipeline:
//! - Axis weights for the composite grade
//! - Flaw detection and severity thresholds
//! - Confidence bands per grade tier
//! - The grade-to-value multiplier table
//!
//! Defaults reproduce the reference grading policy exactly.

use crate::core::{Axis, FlawSeverity, OverallGrade};
use crate::grading::GradeTier;
use serde::{Deserialize, Serialize};

/// Axis weights configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisWeights {
    /// Weight for centering (0.0-1.0)
    #[serde(default = "default_centering_weight")]
    pub centering: f64,

    /// Weight for corners (0.0-1.0)
    #[serde(default = "default_corners_weight")]
    pub corners: f64,

    /// Weight for edges (0.0-1.0)
    #[serde(default = "default_edges_weight")]
    pub edges: f64,

    /// Weight for surface (0.0-1.0)
    #[serde(default = "default_surface_weight")]
    pub surface: f64,
}

impl Default for AxisWeights {
    fn default() -> Self {
        Self {
            centering: default_centering_weight(),
            corners: default_corners_weight(),
            edges: default_edges_weight(),
            surface: default_surface_weight(),
        }
    }
}

impl AxisWeights {
    const SUM_TOLERANCE: f64 = 0.001;

    pub fn weight(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Centering => self.centering,
            Axis::Corners => self.corners,
            Axis::Edges => self.edges,
            Axis::Surface => self.surface,
        }
    }

    pub fn sum(&self) -> f64 {
        self.centering + self.corners + self.edges + self.surface
    }

    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    /// Every individual weight problem, in detection order.
    pub fn weight_issues(&self) -> Vec<(Axis, String)> {
        Axis::ALL
            .into_iter()
            .filter(|axis| !Self::is_valid_weight(self.weight(*axis)))
            .map(|axis| {
                (
                    axis,
                    format!(
                        "{} weight must be between 0.0 and 1.0, got {}",
                        axis.label(),
                        self.weight(axis)
                    ),
                )
            })
            .collect()
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate_sum(&self) -> Result<(), String> {
        let sum = self.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            Err(format!("Axis weights must sum to 1.0, but sum to {:.3}", sum))
        } else {
            Ok(())
        }
    }

    /// Rescale weights so they sum to exactly 1.0. Weights already within
    /// tolerance are left untouched.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && (sum - 1.0).abs() > f64::EPSILON {
            self.centering /= sum;
            self.corners /= sum;
            self.edges /= sum;
            self.surface /= sum;
        }
    }
}

pub fn default_centering_weight() -> f64 {
    0.20
}
pub fn default_corners_weight() -> f64 {
    0.25
}
pub fn default_edges_weight() -> f64 {
    0.25
}
pub fn default_surface_weight() -> f64 {
    0.30 // surface damage is the most visible
}

/// Flaw detection thresholds on the 0-10 axis scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlawThresholds {
    /// Axes scoring below this produce a flaw
    #[serde(default = "default_flaw_below")]
    pub flaw_below: f64,

    /// Flaws below this are at least moderate
    #[serde(default = "default_moderate_below")]
    pub moderate_below: f64,

    /// Flaws below this are severe
    #[serde(default = "default_severe_below")]
    pub severe_below: f64,
}

impl Default for FlawThresholds {
    fn default() -> Self {
        Self {
            flaw_below: default_flaw_below(),
            moderate_below: default_moderate_below(),
            severe_below: default_severe_below(),
        }
    }
}

impl FlawThresholds {
    /// Severity of a flaw on an axis with this score, `None` when the axis is
    /// clean.
    pub fn severity_for(&self, score: f64) -> Option<FlawSeverity> {
        if score >= self.flaw_below {
            None
        } else if score < self.severe_below {
            Some(FlawSeverity::Severe)
        } else if score < self.moderate_below {
            Some(FlawSeverity::Moderate)
        } else {
            Some(FlawSeverity::Minor)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let on_scale = |v: f64| (0.0..=10.0).contains(&v);
        if !(on_scale(self.flaw_below) && on_scale(self.moderate_below) && on_scale(self.severe_below))
        {
            return Err("flaw thresholds must be between 0.0 and 10.0".to_string());
        }
        if self.severe_below > self.moderate_below || self.moderate_below > self.flaw_below {
            return Err(format!(
                "flaw thresholds must satisfy severe_below <= moderate_below <= flaw_below, got {} / {} / {}",
                self.severe_below, self.moderate_below, self.flaw_below
            ));
        }
        Ok(())
    }
}

pub fn default_flaw_below() -> f64 {
    8.0
}
pub fn default_moderate_below() -> f64 {
    7.0
}
pub fn default_severe_below() -> f64 {
    6.0
}

/// Lower bound and maximum spread of confidence for one grade tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub base: f64,
    pub spread: f64,
}

impl ConfidenceBand {
    pub const fn new(base: f64, spread: f64) -> Self {
        Self { base, spread }
    }

    pub fn ceiling(&self) -> f64 {
        self.base + self.spread
    }

    pub fn validate(&self, tier: &str) -> Result<(), String> {
        if !(self.base.is_finite() && self.spread.is_finite()) {
            Err(format!(
                "{} confidence band needs finite base and spread, got {} / {}",
                tier, self.base, self.spread
            ))
        } else if self.base <= 0.0 || self.spread < 0.0 {
            Err(format!(
                "{} confidence band needs base > 0 and spread >= 0",
                tier
            ))
        } else if self.ceiling() > 1.0 {
            Err(format!(
                "{} confidence band ceiling {:.2} exceeds 1.0",
                tier,
                self.ceiling()
            ))
        } else {
            Ok(())
        }
    }
}

/// Confidence bands keyed by grade tier.
///
/// Bands get lower and wider toward the top of the scale: near-mint claims
/// get the most scrutiny from professional graders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBands {
    #[serde(default = "default_excellent_band")]
    pub excellent: ConfidenceBand,
    #[serde(default = "default_very_good_band")]
    pub very_good: ConfidenceBand,
    #[serde(default = "default_good_band")]
    pub good: ConfidenceBand,
    #[serde(default = "default_worn_band")]
    pub worn: ConfidenceBand,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            excellent: default_excellent_band(),
            very_good: default_very_good_band(),
            good: default_good_band(),
            worn: default_worn_band(),
        }
    }
}

impl ConfidenceBands {
    pub fn band_for(&self, tier: GradeTier) -> ConfidenceBand {
        match tier {
            GradeTier::Excellent => self.excellent,
            GradeTier::VeryGood => self.very_good,
            GradeTier::Good => self.good,
            GradeTier::Worn => self.worn,
        }
    }

    pub fn issues(&self) -> Vec<String> {
        [
            ("excellent", self.excellent),
            ("very_good", self.very_good),
            ("good", self.good),
            ("worn", self.worn),
        ]
        .into_iter()
        .filter_map(|(name, band)| band.validate(name).err())
        .collect()
    }
}

pub fn default_excellent_band() -> ConfidenceBand {
    ConfidenceBand::new(0.75, 0.15)
}
pub fn default_very_good_band() -> ConfidenceBand {
    ConfidenceBand::new(0.80, 0.15)
}
pub fn default_good_band() -> ConfidenceBand {
    ConfidenceBand::new(0.85, 0.10)
}
pub fn default_worn_band() -> ConfidenceBand {
    ConfidenceBand::new(0.90, 0.08)
}

/// One step of the grade-to-value table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierStep {
    pub min_grade: f64,
    pub multiplier: f64,
}

impl MultiplierStep {
    pub const fn new(min_grade: f64, multiplier: f64) -> Self {
        Self {
            min_grade,
            multiplier,
        }
    }
}

/// Step function from overall grade to value multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable {
    /// Multiplier for grades below every step
    #[serde(default = "default_floor_multiplier")]
    pub floor_multiplier: f64,

    #[serde(default = "default_multiplier_steps")]
    pub steps: Vec<MultiplierStep>,
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self {
            floor_multiplier: default_floor_multiplier(),
            steps: default_multiplier_steps(),
        }
    }
}

impl MultiplierTable {
    /// Multiplier of the highest step whose threshold the grade reaches.
    pub fn multiplier_for(&self, grade: OverallGrade) -> f64 {
        let grade = grade.value();
        self.steps
            .iter()
            .filter(|step| grade >= step.min_grade)
            .max_by(|a, b| a.min_grade.total_cmp(&b.min_grade))
            .map_or(self.floor_multiplier, |step| step.multiplier)
    }

    /// Problems that would break monotonicity or produce negative values.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(self.floor_multiplier.is_finite() && self.floor_multiplier > 0.0) {
            issues.push(format!(
                "floor multiplier must be positive, got {}",
                self.floor_multiplier
            ));
        }

        let mut ordered = self.steps.clone();
        ordered.sort_by(|a, b| a.min_grade.total_cmp(&b.min_grade));

        for step in &ordered {
            if !(0.0..=10.0).contains(&step.min_grade) {
                issues.push(format!(
                    "multiplier step grade {} is outside 0.0-10.0",
                    step.min_grade
                ));
            }
            if !step.multiplier.is_finite() {
                issues.push(format!(
                    "multiplier at grade {} must be finite, got {}",
                    step.min_grade, step.multiplier
                ));
            } else if step.multiplier < self.floor_multiplier {
                issues.push(format!(
                    "multiplier {} at grade {} is below the floor multiplier {}",
                    step.multiplier, step.min_grade, self.floor_multiplier
                ));
            }
        }

        for pair in ordered.windows(2) {
            if pair[1].multiplier < pair[0].multiplier {
                issues.push(format!(
                    "multiplier must not decrease with grade: {} at {} then {} at {}",
                    pair[0].multiplier, pair[0].min_grade, pair[1].multiplier, pair[1].min_grade
                ));
            }
        }

        issues
    }
}

pub fn default_floor_multiplier() -> f64 {
    1.0
}

pub fn default_multiplier_steps() -> Vec<MultiplierStep> {
    vec![
        MultiplierStep::new(10.0, 5.0),
        MultiplierStep::new(9.5, 3.5),
        MultiplierStep::new(9.0, 2.5),
        MultiplierStep::new(8.5, 2.0),
        MultiplierStep::new(8.0, 1.5),
        MultiplierStep::new(7.0, 1.2),
    ]
}
