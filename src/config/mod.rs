//! Configuration for the grading pipeline and CLI.
//!
//! Settings come from `.certigrade.toml`, discovered in the working
//! directory or one of its ancestors, or from an explicit `--config` path.
//! Every section is optional and falls back to the reference policy.

mod core;
pub mod grading;
pub mod loader;
pub mod validation;

pub use self::core::{CertigradeConfig, OutputConfig};
pub use grading::{
    AxisWeights, ConfidenceBand, ConfidenceBands, FlawThresholds, MultiplierStep,
    MultiplierTable,
};
pub use loader::{
    discover_config, load_config, load_config_from, parse_and_validate_config, CONFIG_FILE_NAME,
};
