use serde::{Deserialize, Serialize};

use super::grading::{AxisWeights, ConfidenceBands, FlawThresholds, MultiplierTable};
use crate::io::output::OutputFormat;

/// Root configuration structure for certigrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CertigradeConfig {
    /// Axis weights for the composite grade
    #[serde(default)]
    pub weights: Option<AxisWeights>,

    /// Flaw detection thresholds
    #[serde(default)]
    pub flaws: Option<FlawThresholds>,

    /// Confidence bands per grade tier
    #[serde(default)]
    pub confidence: Option<ConfidenceBands>,

    /// Grade-to-value multiplier table
    #[serde(default)]
    pub value: Option<MultiplierTable>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

impl CertigradeConfig {
    pub fn weights(&self) -> AxisWeights {
        self.weights.clone().unwrap_or_default()
    }

    pub fn flaw_thresholds(&self) -> FlawThresholds {
        self.flaws.clone().unwrap_or_default()
    }

    pub fn confidence_bands(&self) -> ConfidenceBands {
        self.confidence.clone().unwrap_or_default()
    }

    pub fn multiplier_table(&self) -> MultiplierTable {
        self.value.clone().unwrap_or_default()
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|output| output.default_format)
            .unwrap_or_default()
    }
}
