//! Grading history persistence.

use crate::core::CardGrading;
use crate::errors::{CertigradeError, Result};
use parking_lot::{Mutex, RwLock};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence service for saved gradings, keyed by user and card.
pub trait GradingStore: Send + Sync {
    fn save(&self, record: CardGrading) -> Result<()>;

    /// All of a user's gradings, newest first.
    fn history(&self, user_id: &str) -> Result<Vec<CardGrading>>;

    /// A user's gradings of one card, newest first.
    fn history_for_card(&self, user_id: &str, card_id: &str) -> Result<Vec<CardGrading>> {
        Ok(self
            .history(user_id)?
            .into_iter()
            .filter(|record| record.card_id == card_id)
            .collect())
    }
}

/// Records of `user_id`, newest first; records saved later win ties.
fn newest_first<'a>(
    records: impl DoubleEndedIterator<Item = &'a CardGrading>,
    user_id: &str,
) -> Vec<CardGrading> {
    let mut selected: Vec<CardGrading> = records
        .rev()
        .filter(|record| record.user_id == user_id)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date_graded.cmp(&a.date_graded));
    selected
}

#[derive(Debug, Default)]
pub struct InMemoryGradingStore {
    records: RwLock<Vec<CardGrading>>,
}

impl InMemoryGradingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl GradingStore for InMemoryGradingStore {
    fn save(&self, record: CardGrading) -> Result<()> {
        self.records.write().push(record);
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<CardGrading>> {
        Ok(newest_first(self.records.read().iter(), user_id))
    }
}

/// History kept as a pretty-printed JSON array on disk.
///
/// Writes within one process are serialized. Every save writes the whole
/// history to a sibling temp file and renames it over the old one, so an
/// interrupted save leaves the previous history intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn replace_contents(&self, data: &[u8]) -> Result<()> {
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(CertigradeError::Storage(format!(
                "cannot write {}: {}",
                temp_path.display(),
                e
            )));
        }
        fs::rename(&temp_path, &self.path).map_err(|e| {
            CertigradeError::Storage(format!(
                "cannot replace {} with {}: {}",
                self.path.display(),
                temp_path.display(),
                e
            ))
        })
    }

    fn load(&self) -> Result<Vec<CardGrading>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                CertigradeError::Storage(format!(
                    "corrupt grading history {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(CertigradeError::Storage(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl GradingStore for JsonFileStore {
    fn save(&self, record: CardGrading) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut records = self.load()?;
        records.push(record);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&records)?;
        self.replace_contents(json.as_bytes())?;

        log::debug!(
            "Saved grading {} to {} ({} records)",
            records.last().map_or("", |r| r.id.as_str()),
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<CardGrading>> {
        Ok(newest_first(self.load()?.iter(), user_id))
    }
}
