//! Validation with error accumulation for configuration.
//!
//! Uses stillwater's `Validation` type so that every problem in a config
//! file is reported in one run instead of stopping at the first.

use std::fmt;

use stillwater::{NonEmptyVec, Validation};

use super::CertigradeConfig;
use crate::errors::CertigradeError;

/// A single configuration problem with the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result carrying every issue found.
pub type ConfigValidation = Validation<(), NonEmptyVec<ConfigIssue>>;

/// Validate entire config, accumulating ALL errors.
///
/// ```rust
/// use certigrade::config::{validation::validate_config, CertigradeConfig};
///
/// let validation = validate_config(&CertigradeConfig::default());
/// assert!(validation.is_success());
/// ```
pub fn validate_config(config: &CertigradeConfig) -> ConfigValidation {
    let issues: Vec<ConfigIssue> = [
        weight_issues(config),
        flaw_issues(config),
        confidence_issues(config),
        value_issues(config),
    ]
    .into_iter()
    .flatten()
    .collect();

    match NonEmptyVec::from_vec(issues) {
        Some(issues) => Validation::Failure(issues),
        None => Validation::Success(()),
    }
}

/// `Result` view of [`validate_config`] for callers that just need to stop.
pub fn validate_config_result(config: &CertigradeConfig) -> Result<(), CertigradeError> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(issues) => {
            let message = issues
                .into_iter()
                .map(|issue| issue.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(CertigradeError::Configuration(message))
        }
    }
}

fn weight_issues(config: &CertigradeConfig) -> Vec<ConfigIssue> {
    let Some(weights) = config.weights.as_ref() else {
        return Vec::new();
    };

    let mut issues: Vec<ConfigIssue> = weights
        .weight_issues()
        .into_iter()
        .map(|(axis, message)| ConfigIssue::new(format!("weights.{}", axis), message))
        .collect();

    if let Err(message) = weights.validate_sum() {
        issues.push(ConfigIssue::new("weights", message));
    }
    issues
}

fn flaw_issues(config: &CertigradeConfig) -> Vec<ConfigIssue> {
    config
        .flaws
        .as_ref()
        .and_then(|flaws| flaws.validate().err())
        .map(|message| ConfigIssue::new("flaws", message))
        .into_iter()
        .collect()
}

fn confidence_issues(config: &CertigradeConfig) -> Vec<ConfigIssue> {
    config
        .confidence
        .as_ref()
        .map(|bands| bands.issues())
        .unwrap_or_default()
        .into_iter()
        .map(|message| ConfigIssue::new("confidence", message))
        .collect()
}

fn value_issues(config: &CertigradeConfig) -> Vec<ConfigIssue> {
    config
        .value
        .as_ref()
        .map(|table| table.issues())
        .unwrap_or_default()
        .into_iter()
        .map(|message| ConfigIssue::new("value", message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::grading::{AxisWeights, FlawThresholds};

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CertigradeConfig::default()).is_success());
        assert!(validate_config_result(&CertigradeConfig::default()).is_ok());
    }

    #[test]
    fn all_issues_are_accumulated() {
        let config = CertigradeConfig {
            weights: Some(AxisWeights {
                centering: 1.5,
                corners: 0.25,
                edges: 0.25,
                surface: 0.30,
            }),
            flaws: Some(FlawThresholds {
                flaw_below: 5.0,
                moderate_below: 7.0,
                severe_below: 6.0,
            }),
            ..CertigradeConfig::default()
        };

        match validate_config(&config) {
            Validation::Success(()) => panic!("expected failure"),
            Validation::Failure(issues) => {
                let fields: Vec<String> = issues.into_iter().map(|i| i.field).collect();
                assert_eq!(fields, vec!["weights.centering", "weights", "flaws"]);
            }
        }
    }

    #[test]
    fn result_view_joins_messages() {
        let config = CertigradeConfig {
            weights: Some(AxisWeights {
                centering: 0.5,
                ..AxisWeights::default()
            }),
            ..CertigradeConfig::default()
        };
        let err = validate_config_result(&config).unwrap_err();
        assert!(err.to_string().contains("must sum to 1.0"));
    }
}
