//! Directory listings for both sides of a transfer

use std::fs;
use std::path::Path;

use crate::bridge::{parse_listing, Bridge, BridgeCommand};
use crate::error::ListingError;

/// Which filesystem a path lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Pc,
    Device,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Pc => "PC",
            Side::Device => "Phone",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Side::Pc => "/home/user/documents",
            Side::Device => "/sdcard/Download",
        }
    }

    /// Join a child name onto a base path using this side's separator rules.
    pub fn join(self, base: &str, name: &str) -> String {
        match self {
            Side::Pc => Path::new(base).join(name).to_string_lossy().into_owned(),
            Side::Device => {
                if base.is_empty() {
                    name.to_string()
                } else if base.ends_with('/') {
                    format!("{}{}", base, name)
                } else {
                    format!("{}/{}", base, name)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            name: name.into(),
            is_directory,
        }
    }

    /// Menu label with a folder/file marker.
    pub fn label(&self) -> String {
        if self.is_directory {
            format!("📁 {}", self.name)
        } else {
            format!("📄 {}", self.name)
        }
    }
}

pub trait ListingProvider {
    fn list(&self, path: &str) -> Result<Vec<DirectoryEntry>, ListingError>;
}

/// Lists a directory on the local filesystem.
pub struct LocalListing;

impl ListingProvider for LocalListing {
    fn list(&self, path: &str) -> Result<Vec<DirectoryEntry>, ListingError> {
        let dir = Path::new(path);
        let wrap = |source| ListingError::Local {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(wrap)? {
            let entry = entry.map_err(wrap)?;
            // Follow symlinks so a linked folder can be browsed.
            let metadata = fs::metadata(entry.path()).map_err(wrap)?;
            entries.push(DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory: metadata.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Lists a directory on the device through the bridge.
pub struct DeviceListing<'a> {
    bridge: &'a dyn Bridge,
}

impl<'a> DeviceListing<'a> {
    pub fn new(bridge: &'a dyn Bridge) -> Self {
        Self { bridge }
    }
}

impl ListingProvider for DeviceListing<'_> {
    fn list(&self, path: &str) -> Result<Vec<DirectoryEntry>, ListingError> {
        let stdout = self
            .bridge
            .run(&BridgeCommand::List(path.to_string()))
            .map_err(|source| ListingError::Device {
                path: path.to_string(),
                source,
            })?;
        Ok(parse_listing(&stdout))
    }
}

/// Pick the provider for a side.
pub fn provider_for<'a>(side: Side, bridge: &'a dyn Bridge) -> Box<dyn ListingProvider + 'a> {
    match side {
        Side::Pc => Box::new(LocalListing),
        Side::Device => Box::new(DeviceListing::new(bridge)),
    }
}

/// Names of the immediate subdirectories of a local folder.
pub fn top_level_folders(path: &Path) -> Result<Vec<String>, ListingError> {
    let entries = LocalListing.list(&path.to_string_lossy())?;
    Ok(entries
        .into_iter()
        .filter(|e| e.is_directory)
        .map(|e| e.name)
        .collect())
}
