//! Shared CLI helpers and small reusable Clap fragments

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::store::DEFAULT_CONFIG_FILE;
use crate::transfer::TransferDirection;

/// Bridge and logging options common to both binaries
#[derive(Clone, Debug, Args)]
pub struct BridgeOpts {
    /// adb executable to invoke
    #[arg(long, default_value = "adb")]
    pub adb: PathBuf,

    /// Device serial (forwarded as `adb -s <SERIAL>`)
    #[arg(short = 's', long)]
    pub serial: Option<String>,

    /// Append a transfer log to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Show bridge command lines and other diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Interactive copy between PC and phone
#[derive(Clone, Debug, Parser)]
#[command(
    author,
    version,
    about = "Interactively copy files and folders between a PC and an Android device over adb"
)]
pub struct InteractiveOpts {
    #[command(flatten)]
    pub bridge: BridgeOpts,

    /// Remembered-paths store
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Skip the direction menu
    #[arg(long, value_enum)]
    pub direction: Option<TransferDirection>,
}

/// Bulk push of SOURCE_FOLDER's subfolders into TARGET_FOLDER on the device
#[derive(Clone, Debug, Parser)]
#[command(
    author,
    version,
    about = "Push selected top-level folders of SOURCE_FOLDER to TARGET_FOLDER on the device"
)]
pub struct SyncOpts {
    #[command(flatten)]
    pub bridge: BridgeOpts,

    /// Read SOURCE_FOLDER/TARGET_FOLDER from this file (default: ./.env when present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

/// Initialise diagnostics; `RUST_LOG` still wins when set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
