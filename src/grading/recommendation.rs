use super::GradeTier;
use crate::core::{EstimatedValue, OverallGrade};

/// Natural-language verdict for a grade and its estimated value.
pub fn recommend(grade: OverallGrade, value: EstimatedValue) -> String {
    let floor = grade.floor();
    match GradeTier::of(grade) {
        GradeTier::Excellent => format!(
            "Excellent condition! This card is a strong candidate for professional grading. \
             Expected grade: PSA {}. Estimated value after grading: {}",
            floor, value
        ),
        GradeTier::VeryGood => format!(
            "Very good condition with minor flaws. Consider professional grading if the card \
             has significant value. Expected grade: PSA {}. Estimated value: {}",
            floor, value
        ),
        GradeTier::Good => format!(
            "Good condition but with noticeable flaws. Professional grading may not be \
             cost-effective unless it's a high-value card. Expected grade: PSA {}. \
             Estimated value: {}",
            floor, value
        ),
        GradeTier::Worn => format!(
            "Card shows significant wear. Professional grading is not recommended unless for \
             authentication purposes. Expected grade: PSA {} or lower. Estimated value: {}",
            floor, value
        ),
    }
}
