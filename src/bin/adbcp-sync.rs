use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use adbcp::bridge::AdbBridge;
use adbcp::cli::{init_logging, SyncOpts};
use adbcp::logger::{Logger, NoopLogger, TextLogger};
use adbcp::progress::{error_line, intro, outro};
use adbcp::prompt::TermPrompter;
use adbcp::sync::{self, SyncConfig, SyncOutcome};
use adbcp::transfer::Executor;

fn main() -> Result<()> {
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted by user. Exiting (Ctrl-C)...");
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    let opts = SyncOpts::parse();
    init_logging(opts.bridge.verbose);

    // Nothing may happen before the environment is known to be complete.
    let env_path = opts
        .env_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(sync::DEFAULT_ENV_FILE));
    let file_vars = match sync::env_file_vars(&env_path, opts.env_file.is_some()) {
        Ok(vars) => vars,
        Err(e) => {
            error_line(&format!("cannot read {}: {}", env_path.display(), e));
            std::process::exit(1);
        }
    };
    let config = match SyncConfig::from_env_with(&file_vars) {
        Ok(c) => c,
        Err(e) => {
            error_line(&format!(
                "{} ({} and {} are both required)",
                e,
                sync::SOURCE_VAR,
                sync::TARGET_VAR
            ));
            std::process::exit(1);
        }
    };

    let logger: Arc<dyn Logger> = match opts.bridge.log_file {
        Some(ref p) => match TextLogger::new(p) {
            Ok(l) => Arc::new(l),
            Err(e) => {
                log::warn!("cannot open log file {}: {}", p.display(), e);
                Arc::new(NoopLogger)
            }
        },
        None => Arc::new(NoopLogger),
    };
    let bridge = AdbBridge::new(&opts.bridge.adb, opts.bridge.serial.clone());
    let executor = Executor::new(&bridge, &*logger, true);
    let mut prompter = TermPrompter::new();

    intro("Folder Transfer Tool");
    match sync::run(&config, &mut prompter, &executor) {
        Ok(SyncOutcome::NoFolders) => {
            println!("No folders found in source directory.");
        }
        Ok(SyncOutcome::Cancelled) => outro("Transfer cancelled"),
        Ok(SyncOutcome::Completed(_)) => outro("Transfer complete"),
        Err(e) => {
            error_line(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
    Ok(())
}
