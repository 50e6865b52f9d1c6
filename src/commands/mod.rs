pub mod batch;
pub mod catalog;
pub mod grade;
pub mod history;
pub mod init;

use crate::config::{load_config, load_config_from, CertigradeConfig};
use crate::grading::{GradingPipeline, SeededSpread};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Explicit config file if given, otherwise discovery from the working
/// directory.
pub(crate) fn resolve_config(path: Option<&Path>) -> Result<CertigradeConfig> {
    match path {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(load_config()),
    }
}

pub(crate) fn build_pipeline(config: &CertigradeConfig, seed: Option<u64>) -> GradingPipeline {
    let pipeline = GradingPipeline::new(config);
    match seed {
        Some(seed) => pipeline.with_spread(SeededSpread::new(seed)),
        None => pipeline,
    }
}

pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
