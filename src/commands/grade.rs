use super::{build_pipeline, open_output, resolve_config};
use crate::collaborators::JsonFileStore;
use crate::core::{AxisScores, RawAxisScores};
use crate::io::output::{create_writer, OutputFormat};
use crate::services::GradingService;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub struct GradeConfig {
    pub card_id: String,
    pub scores: RawAxisScores,
    pub base_value: f64,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub save: bool,
    pub user: Option<String>,
    pub store: PathBuf,
    pub config: Option<PathBuf>,
}

pub fn grade_card(config: GradeConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let pipeline = build_pipeline(&settings, config.seed);
    let scores = AxisScores::try_from(config.scores)?;

    let (result, saved) = if config.save {
        let user = config
            .user
            .as_deref()
            .ok_or_else(|| anyhow!("--save requires --user"))?;
        let service = GradingService::new(pipeline, JsonFileStore::new(&config.store));
        let (result, record) =
            service.grade_and_save(user, &config.card_id, scores, config.base_value)?;
        (result, Some(record))
    } else {
        let result = pipeline.run(&config.card_id, scores, config.base_value)?;
        (result, None)
    };

    let format = config.format.unwrap_or_else(|| settings.default_format());
    let mut writer = create_writer(format, open_output(config.output.as_deref())?);
    writer.write_result(&result)?;
    writer.flush()?;

    if let Some(record) = saved {
        eprintln!(
            "Saved to {} (verification {})",
            config.store.display(),
            record.verification_id
        );
    }

    Ok(())
}
