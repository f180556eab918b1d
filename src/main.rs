//! adbcp - interactive PC <-> Android copying over adb
//!
//! Flow: direction → source path → item selection → destination path →
//! sequential transfer with per-item reporting.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use adbcp::bridge::AdbBridge;
use adbcp::cli::{init_logging, InteractiveOpts};
use adbcp::logger::{Logger, NoopLogger, TextLogger};
use adbcp::progress::{intro, outro};
use adbcp::prompt::TermPrompter;
use adbcp::session::{RunOutcome, Session};
use adbcp::store::PathStore;
use adbcp::transfer::Executor;

fn main() -> Result<()> {
    // Prompts run in raw mode and read Ctrl-C themselves; this covers transfers.
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted by user. Exiting (Ctrl-C)...");
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    let opts = InteractiveOpts::parse();
    init_logging(opts.bridge.verbose);

    // Choose logger once
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
    let store = PathStore::new(&opts.config);
    let executor = Executor::new(&bridge, &*logger, true);
    let mut prompter = TermPrompter::new();

    intro("ADB Transfer Tool");
    let outcome = Session::new(&mut prompter, &bridge, &store, &executor).run(opts.direction)?;
    match outcome {
        RunOutcome::Cancelled => outro("Transfer cancelled"),
        RunOutcome::NothingSelected => outro("No items selected"),
        RunOutcome::Completed(report) => {
            if report.failed() > 0 {
                outro(&format!(
                    "Transfer complete ({} succeeded, {} failed)",
                    report.succeeded(),
                    report.failed()
                ));
            } else {
                outro("Transfer complete");
            }
        }
    }
    Ok(())
}
