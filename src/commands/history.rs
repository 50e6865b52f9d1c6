use crate::collaborators::{GradingStore, JsonFileStore};
use crate::grading::validate_card_id;
use crate::io::output::{create_writer, OutputFormat};
use anyhow::Result;
use std::path::Path;

pub fn show_history(
    user: &str,
    store: &Path,
    card_id: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let user = user.trim();
    if user.is_empty() {
        anyhow::bail!("--user must not be empty");
    }

    let store = JsonFileStore::new(store);
    let records = match card_id {
        Some(card_id) => store.history_for_card(user, validate_card_id(card_id)?)?,
        None => store.history(user)?,
    };

    let mut writer = create_writer(format, Box::new(std::io::stdout()));
    writer.write_history(&records)?;
    writer.flush()?;
    Ok(())
}
