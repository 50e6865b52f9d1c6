//! Professional grading services: submission tiers, the company comparison
//! shown next to a pre-grade, and submission tracking.

use crate::core::EstimatedValue;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Submission service level at a professional grader.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Economy,
    Regular,
    Express,
}

impl ServiceTier {
    pub const ALL: [ServiceTier; 3] = [
        ServiceTier::Economy,
        ServiceTier::Regular,
        ServiceTier::Express,
    ];

    pub fn cost_estimate(self) -> CostEstimate {
        match self {
            ServiceTier::Economy => CostEstimate {
                tier: self,
                cost: 20.0,
                turnaround_time: "45-60 business days",
                description: "Best value for cards under $499",
            },
            ServiceTier::Regular => CostEstimate {
                tier: self,
                cost: 50.0,
                turnaround_time: "20-25 business days",
                description: "Standard service for most cards",
            },
            ServiceTier::Express => CostEstimate {
                tier: self,
                cost: 150.0,
                turnaround_time: "5-7 business days",
                description: "Fast service for urgent needs",
            },
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceTier::Economy => write!(f, "economy"),
            ServiceTier::Regular => write!(f, "regular"),
            ServiceTier::Express => write!(f, "express"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub tier: ServiceTier,
    /// US dollars per card.
    pub cost: f64,
    pub turnaround_time: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingServiceInfo {
    pub name: &'static str,
    /// Market reputation on a 0-10 scale.
    pub reputation: f64,
    pub average_cost: f64,
    pub turnaround_time: &'static str,
    pub specialties: Vec<&'static str>,
}

/// The major grading companies, best reputation first.
pub fn compare_grading_services() -> Vec<GradingServiceInfo> {
    vec![
        GradingServiceInfo {
            name: "PSA",
            reputation: 9.5,
            average_cost: 50.0,
            turnaround_time: "20-25 business days",
            specialties: vec!["Pokemon", "Sports Cards", "High-Value Cards"],
        },
        GradingServiceInfo {
            name: "BGS/Beckett",
            reputation: 9.2,
            average_cost: 45.0,
            turnaround_time: "15-20 business days",
            specialties: vec!["Subgrades", "Modern Cards", "Autographs"],
        },
        GradingServiceInfo {
            name: "CGC",
            reputation: 8.8,
            average_cost: 35.0,
            turnaround_time: "10-15 business days",
            specialties: vec!["Fast Service", "Competitive Pricing", "Comics & Cards"],
        },
    ]
}

/// True when grading is expected to add more value than the tier costs.
pub fn worth_grading(base_value: f64, estimated: EstimatedValue, tier: ServiceTier) -> bool {
    estimated.value() - base_value > tier.cost_estimate().cost
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    Received,
    InProgress,
    Graded,
    Shipped,
}

impl SubmissionStatus {
    pub fn step_description(self) -> &'static str {
        match self {
            SubmissionStatus::Received => "Your submission has been received and logged",
            SubmissionStatus::InProgress => "Cards are currently being graded by our experts",
            SubmissionStatus::Graded => "Grading complete, preparing for shipment",
            SubmissionStatus::Shipped => "Your graded cards are on their way back to you",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionUpdate {
    pub submission_id: String,
    pub status: SubmissionStatus,
    pub estimated_completion: DateTime<Utc>,
}

impl SubmissionUpdate {
    pub fn current_step(&self) -> &'static str {
        self.status.step_description()
    }
}

/// Status feed of a professional grader. Unknown submissions and outages are
/// errors; a status is never guessed.
pub trait SubmissionTracker: Send + Sync {
    fn track(&self, submission_id: &str) -> Result<SubmissionUpdate>;
}
