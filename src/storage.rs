use crate::adapter::{self, LocalShift};
use crate::model::ShiftInterval;
use anyhow::Context;
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait ScheduleStore {
    /// Charge la liste de créneaux persistée.
    fn fetch(&self) -> anyhow::Result<Vec<ShiftInterval>>;
    /// Sauvegarde puis renvoie la forme faisant autorité, relue depuis le support.
    fn save(&self, intervals: &[ShiftInterval]) -> anyhow::Result<Vec<ShiftInterval>>;
}

/// Fichier JSON contenant une liste de [`LocalShift`] (jour + heure locale).
pub struct JsonScheduleStore {
    path: PathBuf,
}

impl JsonScheduleStore {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleStore for JsonScheduleStore {
    fn fetch(&self) -> anyhow::Result<Vec<ShiftInterval>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let locals: Vec<LocalShift> =
            serde_json::from_slice(&data).with_context(|| "parsing schedule.json")?;
        let intervals = adapter::from_local_list(&locals)
            .with_context(|| format!("invalid schedule in {}", self.path.display()))?;
        Ok(intervals)
    }

    fn save(&self, intervals: &[ShiftInterval]) -> anyhow::Result<Vec<ShiftInterval>> {
        let locals = adapter::to_local_list(intervals).context("refusing to save schedule")?;
        let json = serde_json::to_vec_pretty(&locals)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), shifts = locals.len(), "schedule saved");
        self.fetch()
    }
}

/// Stockage en mémoire, même forme persistée que le fichier JSON.
#[derive(Debug, Default)]
pub struct MemoryScheduleStore {
    shifts: RefCell<Vec<LocalShift>>,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn fetch(&self) -> anyhow::Result<Vec<ShiftInterval>> {
        let intervals = adapter::from_local_list(&self.shifts.borrow())?;
        Ok(intervals)
    }

    fn save(&self, intervals: &[ShiftInterval]) -> anyhow::Result<Vec<ShiftInterval>> {
        let locals = adapter::to_local_list(intervals).context("refusing to save schedule")?;
        *self.shifts.borrow_mut() = locals;
        self.fetch()
    }
}
