use super::{build_pipeline, open_output, resolve_config};
use crate::core::GradingResult;
use crate::errors::CertigradeError;
use crate::grading::GradingRequest;
use crate::io::output::{create_writer, OutputFormat};
use crate::io::read_file;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct BatchConfig {
    pub input: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
}

/// Per-request outcome in JSON batch output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry<'a> {
    card_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a GradingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<BatchError>,
}

#[derive(Debug, Serialize)]
struct BatchError {
    code: &'static str,
    message: String,
}

impl From<&CertigradeError> for BatchError {
    fn from(error: &CertigradeError) -> Self {
        Self {
            code: error.code().as_str(),
            message: error.to_string(),
        }
    }
}

pub fn parse_requests(contents: &str) -> Result<Vec<GradingRequest>> {
    serde_json::from_str(contents).context("Batch input must be a JSON array of grading requests")
}

/// Grade every request in `config.input`. Every request is attempted; the
/// command fails afterwards if any of them was rejected.
pub fn grade_batch(config: BatchConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let pipeline = build_pipeline(&settings, config.seed);

    let contents = read_file(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    let requests = parse_requests(&contents)?;
    let outcomes = pipeline.grade_batch(&requests);

    let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
    info!(
        total = requests.len(),
        failed,
        input = %config.input.display(),
        "graded batch"
    );

    let format = config.format.unwrap_or_else(|| settings.default_format());
    let mut out = open_output(config.output.as_deref())?;

    if format == OutputFormat::Json {
        let entries: Vec<BatchEntry<'_>> = requests
            .iter()
            .zip(&outcomes)
            .map(|(request, outcome)| BatchEntry {
                card_id: &request.card_id,
                result: outcome.as_ref().ok(),
                error: outcome.as_ref().err().map(BatchError::from),
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        out.flush()?;
    } else {
        let mut writer = create_writer(format, out);
        for (request, outcome) in requests.iter().zip(&outcomes) {
            match outcome {
                Ok(result) => writer.write_result(result)?,
                Err(error) => warn!(
                    card_id = %request.card_id,
                    code = error.code().as_str(),
                    "{}",
                    error
                ),
            }
        }
        writer.flush()?;
    }

    if failed > 0 {
        anyhow::bail!("{} of {} grading requests failed", failed, requests.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_wire_requests() {
        let requests = parse_requests(indoc! {r#"
            [
              {
                "cardId": "base1-4",
                "axisScores": {"centering": 9.1, "corners": 8.3, "edges": 7.7, "surface": 9.9},
                "baseValue": 100.0
              }
            ]
        "#})
        .unwrap();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].axis_scores.surface, 9.9);
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_requests(r#"{"cardId": "x"}"#).is_err());
    }

    #[test]
    fn error_entries_carry_codes() {
        let error = CertigradeError::invalid_input("card id must not be empty");
        let entry = BatchEntry {
            card_id: "",
            result: None,
            error: Some(BatchError::from(&error)),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["error"]["code"], "E051");
        assert!(json.get("result").is_none());
    }
}
