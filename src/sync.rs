//! Environment-driven bulk push of top-level folders.

use anyhow::Result;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::EnvironmentError;
use crate::listing::{top_level_folders, Side};
use crate::prompt::Prompter;
use crate::transfer::{Executor, TransferDirection, TransferItem, TransferReport};

pub const SOURCE_VAR: &str = "SOURCE_FOLDER";
pub const TARGET_VAR: &str = "TARGET_FOLDER";
pub const SELECT_ALL: &str = "Select All";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variables defined in a dotenv file. A missing file is an error only when
/// `required` is set.
pub fn env_file_vars(
    path: &Path,
    required: bool,
) -> Result<HashMap<String, String>, dotenvy::Error> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if !required && e.kind() == io::ErrorKind::NotFound => {
            return Ok(HashMap::new());
        }
        Err(e) => return Err(e),
    };
    let vars = iter.collect::<Result<HashMap<_, _>, _>>()?;
    log::debug!("loaded {} variable(s) from {}", vars.len(), path.display());
    Ok(vars)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Local folder whose subfolders are offered.
    pub source: PathBuf,
    /// Device folder receiving the copies.
    pub target: String,
}

impl SyncConfig {
    /// Process environment first; `file` fills in what it leaves unset.
    pub fn from_env_with(file: &HashMap<String, String>) -> Result<Self, EnvironmentError> {
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| file.get(key).cloned())
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EnvironmentError> {
        let get = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(EnvironmentError::Missing(key))
        };
        let source = get(SOURCE_VAR)?;
        let target = get(TARGET_VAR)?;
        Ok(Self {
            source: PathBuf::from(source),
            target,
        })
    }
}

#[derive(Debug)]
pub enum SyncOutcome {
    NoFolders,
    Cancelled,
    Completed(TransferReport),
}

/// Offer the source's top-level folders and push the chosen ones whole.
pub fn run(
    config: &SyncConfig,
    prompter: &mut dyn Prompter,
    executor: &Executor<'_>,
) -> Result<SyncOutcome> {
    let folders = top_level_folders(&config.source)?;
    if folders.is_empty() {
        return Ok(SyncOutcome::NoFolders);
    }

    let mut options = vec![SELECT_ALL.to_string()];
    options.extend(folders.iter().cloned());
    let picked = match prompter.multiselect("Select folders to transfer:", &options)? {
        Some(p) => p,
        None => return Ok(SyncOutcome::Cancelled),
    };

    let chosen: Vec<&String> = if picked.contains(&0) {
        folders.iter().collect()
    } else {
        picked.iter().filter_map(|i| folders.get(i - 1)).collect()
    };

    let source = config.source.to_string_lossy();
    let items: Vec<TransferItem> = chosen
        .into_iter()
        .map(|name| TransferItem {
            source_path: Side::Pc.join(&source, name),
            name: name.clone(),
            is_directory: true,
        })
        .collect();

    let report = executor.transfer(&items, &config.target, TransferDirection::PcToPhone);
    Ok(SyncOutcome::Completed(report))
}
