use crate::core::OverallGrade;
use serde::{Deserialize, Serialize};

/// Coarse grade band shared by confidence estimation, recommendations and
/// report colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeTier {
    /// Below 7.0
    Worn,
    /// 7.0 to 8.4
    Good,
    /// 8.5 to 9.4
    VeryGood,
    /// 9.5 and above
    Excellent,
}

impl GradeTier {
    pub fn of(grade: OverallGrade) -> Self {
        Self::from_value(grade.value())
    }

    /// Tier of any value on the grade scale, including single axis scores.
    pub fn from_value(grade: f64) -> Self {
        if grade >= 9.5 {
            GradeTier::Excellent
        } else if grade >= 8.5 {
            GradeTier::VeryGood
        } else if grade >= 7.0 {
            GradeTier::Good
        } else {
            GradeTier::Worn
        }
    }
}

/// Named condition on the professional 1-10 grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionLabel {
    Perfect,
    Mint,
    NearMint,
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
    Damaged,
    HeavilyDamaged,
}

impl ConditionLabel {
    /// Label for the whole-number grade implied by `grade`.
    pub fn of(grade: OverallGrade) -> Self {
        match grade.floor() {
            10 => ConditionLabel::Perfect,
            9 => ConditionLabel::Mint,
            8 => ConditionLabel::NearMint,
            7 => ConditionLabel::Excellent,
            6 => ConditionLabel::VeryGood,
            5 => ConditionLabel::Good,
            4 => ConditionLabel::Fair,
            3 => ConditionLabel::Poor,
            2 => ConditionLabel::Damaged,
            _ => ConditionLabel::HeavilyDamaged,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionLabel::Perfect => "Perfect",
            ConditionLabel::Mint => "Mint",
            ConditionLabel::NearMint => "Near Mint",
            ConditionLabel::Excellent => "Excellent",
            ConditionLabel::VeryGood => "Very Good",
            ConditionLabel::Good => "Good",
            ConditionLabel::Fair => "Fair",
            ConditionLabel::Poor => "Poor",
            ConditionLabel::Damaged => "Damaged",
            ConditionLabel::HeavilyDamaged => "Heavily Damaged",
        }
    }
}

impl std::fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
