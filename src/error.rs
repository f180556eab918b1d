//! Error taxonomy shared by the library.
//!
//! Binaries and orchestration code wrap these in `anyhow`; the typed variants
//! exist so callers can decide what is fatal and what is only reported.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single bridge (adb) invocation.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {output}")]
    Failed {
        command: String,
        status: String,
        output: String,
    },
}

/// A manually entered path that does not exist on its side.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Path does not exist: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to list items in {}: {source}", path.display())]
    Local {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to list phone items in {path}: {source}")]
    Device {
        path: String,
        #[source]
        source: BridgeError,
    },
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("failed to measure {}: {source}", path.display())]
    Measure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to save config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("{0} must be set in the environment or the .env file")]
    Missing(&'static str),
}
