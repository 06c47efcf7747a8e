//! Blueprint store persisted as one JSON file.

use crate::blueprint::Blueprint;
use crate::error::{Error, Result};
use crate::store::{BlueprintStore, BlueprintSummary, Registry};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A store backed by a JSON file, rewritten after every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    registry: Registry,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let registry = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|e| Error::IoError {
                path: Some(path.clone()),
                source: e,
            })?;
            serde_json::from_str(&text)
                .map_err(|e| Error::Store(format!("{} is not a blueprint store: {}", path.display(), e)))?
        } else {
            Registry::default()
        };
        debug!(path = %path.display(), entries = registry.entries.len(), "opened blueprint store");
        Ok(FileStore { path, registry })
    }

    /// Write to a sibling temp file, then rename over the store.
    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::IoError {
                path: Some(dir.to_path_buf()),
                source: e,
            })?;
        }

        let text =
            serde_json::to_string_pretty(&self.registry).map_err(|e| Error::Store(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| Error::IoError {
            path: Some(tmp.clone()),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::IoError {
            path: Some(self.path.clone()),
            source: e,
        })?;
        debug!(path = %self.path.display(), "saved blueprint store");
        Ok(())
    }
}

impl BlueprintStore for FileStore {
    fn add(&mut self, blueprint: &Blueprint) -> Result<u64> {
        let id = self.registry.add(blueprint);
        self.save()?;
        Ok(id)
    }

    fn list(&self) -> Vec<BlueprintSummary> {
        self.registry.list()
    }

    fn get(&self, id: u64) -> Result<Blueprint> {
        self.registry.get(id)
    }

    fn remove(&mut self, id: u64) -> Result<()> {
        self.registry.remove(id)?;
        self.save()
    }

    fn blueprints(&self) -> Vec<Result<Blueprint>> {
        self.registry.blueprints()
    }
}
