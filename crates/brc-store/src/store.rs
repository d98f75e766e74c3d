use anyhow::{Context, Result};
use brc_reconcile::{deserialize, serialize, Dataset};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Env var naming the dataset file. Beats config, loses to an explicit path.
pub const ENV_STORE_PATH: &str = "BRC_STORE_PATH";

/// Store file used when neither flag, env nor config name one.
pub const DEFAULT_STORE_FILE: &str = "brainrot_calculator_data.json";

/// Pick the store path: explicit (CLI flag) > `BRC_STORE_PATH` > configured.
pub fn resolve_store_path(explicit: Option<&Path>, configured: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    match std::env::var(ENV_STORE_PATH) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => configured.to_path_buf(),
    }
}

/// File-backed home of the canonical dataset.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file => `None`. A file holding zero owners also loads as `None`.
    /// Unreadable or malformed contents are an error.
    pub fn load(&self) -> Result<Option<Dataset>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file missing; dataset absent");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read store failed: {}", self.path.display()))
            }
        };

        let dataset = deserialize(raw.trim_start_matches('\u{feff}'))
            .with_context(|| format!("parse store failed: {}", self.path.display()))?;
        Ok(dataset.into_non_empty())
    }

    /// [`load`](Self::load), but a corrupt file is logged and treated as absent.
    /// The file is left on disk untouched until the next save.
    pub fn load_or_absent(&self) -> Result<Option<Dataset>> {
        if !self.path.exists() {
            return Ok(None);
        }
        match self.load() {
            Ok(d) => Ok(d),
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(path = %self.path.display(), error = %reason, "store unreadable; starting absent");
                Ok(None)
            }
        }
    }

    /// Persist `dataset`. Absent or empty removes the file.
    pub fn save(&self, dataset: Option<&Dataset>) -> Result<()> {
        match dataset.filter(|d| !d.is_empty()) {
            None => self.remove_file(),
            Some(d) => self.write_atomic(d),
        }
    }

    fn remove_file(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "store file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove store failed: {}", self.path.display())),
        }
    }

    fn write_atomic(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("create_dir_all {:?}", parent))?;
        }

        let json = serialize(dataset).context("serialize dataset failed")?;
        let tmp = self.tmp_path();
        fs::write(&tmp, format!("{json}\n"))
            .with_context(|| format!("write temp store failed: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace store failed: {}", self.path.display()))?;

        debug!(path = %self.path.display(), owners = dataset.len(), "store saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
