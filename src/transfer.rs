//! Sequential transfer execution
//!
//! Items are copied one at a time in the order they were selected. A failed
//! item is reported and the batch moves on; partial artifacts are left alone.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::bridge::{Bridge, BridgeCommand};
use crate::error::TransferError;
use crate::listing::Side;
use crate::logger::Logger;
use crate::progress::ItemSpinner;
use crate::size::{format_size, item_size, throughput_mb_s};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransferDirection {
    /// Copy from the PC to the phone (adb push)
    #[value(name = "push")]
    PcToPhone,
    /// Copy from the phone to the PC (adb pull)
    #[value(name = "pull")]
    PhoneToPc,
}

impl TransferDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferDirection::PcToPhone => "pc-to-phone",
            TransferDirection::PhoneToPc => "phone-to-pc",
        }
    }

    pub fn source_side(self) -> Side {
        match self {
            TransferDirection::PcToPhone => Side::Pc,
            TransferDirection::PhoneToPc => Side::Device,
        }
    }

    pub fn destination_side(self) -> Side {
        match self {
            TransferDirection::PcToPhone => Side::Device,
            TransferDirection::PhoneToPc => Side::Pc,
        }
    }
}

/// A concrete unit of work: one file, or one directory copied as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferItem {
    pub source_path: String,
    pub name: String,
    pub is_directory: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStats {
    pub bytes: u64,
    pub elapsed: Duration,
    pub speed_mb_s: f64,
}

#[derive(Debug)]
pub struct ItemOutcome {
    pub name: String,
    pub source_path: String,
    pub destination_path: String,
    pub result: Result<ItemStats, TransferError>,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The line shown to the user for this item.
    pub fn report_line(&self) -> String {
        match &self.result {
            Ok(stats) => format!(
                "✓ {} - {} - {:.1}s - {:.2} MB/s",
                self.name,
                format_size(stats.bytes),
                stats.elapsed.as_secs_f64(),
                stats.speed_mb_s
            ),
            Err(e) => format!("✗ {} - Transfer failed: {}", self.name, e),
        }
    }
}

#[derive(Debug, Default)]
pub struct TransferReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl TransferReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|s| s.bytes)
            .sum()
    }
}

pub struct Executor<'a> {
    bridge: &'a dyn Bridge,
    logger: &'a dyn Logger,
    show_progress: bool,
}

impl<'a> Executor<'a> {
    pub fn new(bridge: &'a dyn Bridge, logger: &'a dyn Logger, show_progress: bool) -> Self {
        Self {
            bridge,
            logger,
            show_progress,
        }
    }

    /// Copy every item into `destination`, one after another.
    pub fn transfer(
        &self,
        items: &[TransferItem],
        destination: &str,
        direction: TransferDirection,
    ) -> TransferReport {
        let batch_start = Instant::now();
        self.logger.start(direction, items.len(), destination);

        let mut report = TransferReport::default();
        for item in items {
            let spinner =
                ItemSpinner::start(&format!("Transferring: {}", item.name), self.show_progress);
            let destination_path = direction.destination_side().join(destination, &item.name);

            let result = self.transfer_one(item, &destination_path, direction);
            match &result {
                Ok(stats) => self.logger.copy_done(
                    &item.source_path,
                    &destination_path,
                    stats.bytes,
                    stats.elapsed.as_secs_f64(),
                ),
                Err(e) => self
                    .logger
                    .error(direction.as_str(), &item.source_path, &e.to_string()),
            }

            let outcome = ItemOutcome {
                name: item.name.clone(),
                source_path: item.source_path.clone(),
                destination_path,
                result,
            };
            if outcome.is_success() {
                spinner.finish_success(&outcome.report_line());
            } else {
                spinner.finish_error(&outcome.report_line());
            }
            report.outcomes.push(outcome);
        }

        self.logger.done(
            report.succeeded() as u64,
            report.failed() as u64,
            report.total_bytes(),
            batch_start.elapsed().as_secs_f64(),
        );
        report
    }

    fn transfer_one(
        &self,
        item: &TransferItem,
        destination_path: &str,
        direction: TransferDirection,
    ) -> Result<ItemStats, TransferError> {
        let start = Instant::now();
        let bytes = match direction {
            TransferDirection::PcToPhone => {
                let bytes = measure(&item.source_path, item.is_directory)?;
                self.bridge.run(&BridgeCommand::Push {
                    local: item.source_path.clone(),
                    remote: destination_path.to_string(),
                })?;
                bytes
            }
            TransferDirection::PhoneToPc => {
                // The device side cannot be sized cheaply; measure what landed.
                self.bridge.run(&BridgeCommand::Pull {
                    remote: item.source_path.clone(),
                    local: destination_path.to_string(),
                })?;
                measure(destination_path, item.is_directory)?
            }
        };
        let elapsed = start.elapsed();
        Ok(ItemStats {
            bytes,
            elapsed,
            speed_mb_s: throughput_mb_s(bytes, elapsed),
        })
    }
}

fn measure(path: &str, is_directory: bool) -> Result<u64, TransferError> {
    let path = Path::new(path);
    item_size(path, is_directory).map_err(|source| TransferError::Measure {
        path: path.to_path_buf(),
        source,
    })
}
