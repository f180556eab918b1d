//! Remembered source/destination paths, persisted as JSON.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::listing::Side;

/// Default store location, relative to the run directory.
pub const DEFAULT_CONFIG_FILE: &str = "app.config.json";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RememberedPaths {
    pub pc_paths: Vec<String>,
    pub phone_paths: Vec<String>,
}

impl RememberedPaths {
    pub fn paths(&self, side: Side) -> &[String] {
        match side {
            Side::Pc => &self.pc_paths,
            Side::Device => &self.phone_paths,
        }
    }

    /// Add a path for a side; returns false when it was already present.
    pub fn add(&mut self, side: Side, path: &str) -> bool {
        let list = match side {
            Side::Pc => &mut self.pc_paths,
            Side::Device => &mut self.phone_paths,
        };
        if list.iter().any(|p| p == path) {
            return false;
        }
        list.push(path.to_string());
        true
    }
}

/// JSON document holding [`RememberedPaths`].
#[derive(Clone, Debug)]
pub struct PathStore {
    path: PathBuf,
}

impl PathStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store, creating it with empty lists when missing.
    pub fn load(&self) -> Result<RememberedPaths, ConfigError> {
        if !self.path.exists() {
            let empty = RememberedPaths::default();
            self.save(&empty)?;
            return Ok(empty);
        }
        let data = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the whole document; the previous file survives a failed write.
    pub fn save(&self, paths: &RememberedPaths) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(paths)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        // atomic write
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Remember `path` for `side`. Saves only when the entry is new.
    pub fn remember(&self, side: Side, path: &str) -> Result<bool, ConfigError> {
        let mut paths = self.load()?;
        if !paths.add(side, path) {
            return Ok(false);
        }
        self.save(&paths)?;
        Ok(true)
    }
}
