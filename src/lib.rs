//! adbcp library
//!
//! Pick files and folders on a PC or an Android device and copy them across
//! with adb, one item at a time.

pub mod bridge;
pub mod cli;
pub mod error;
pub mod listing;
pub mod logger;
pub mod progress;
pub mod prompt;
pub mod resolve;
pub mod select;
pub mod session;
pub mod size;
pub mod store;
pub mod sync;
pub mod transfer;
