use anyhow::Result;
use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::transfer::TransferDirection;

pub trait Logger: Send + Sync {
    fn start(&self, _direction: TransferDirection, _items: usize, _dst: &str) {}
    fn copy_done(&self, _src: &str, _dst: &str, _bytes: u64, _seconds: f64) {}
    fn error(&self, _context: &str, _path: &str, _msg: &str) {}
    fn done(&self, _ok: u64, _failed: u64, _bytes: u64, _seconds: f64) {}
}

pub struct NoopLogger;
impl Logger for NoopLogger {}

pub struct TextLogger {
    file: Mutex<File>,
}

impl TextLogger {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(f),
        })
    }

    fn line(&self, s: &str) {
        if let Ok(mut f) = self.file.lock() {
            let _ = writeln!(f, "[{}] {}", Utc::now().to_rfc3339(), s);
        }
    }
}

impl Logger for TextLogger {
    fn start(&self, direction: TransferDirection, items: usize, dst: &str) {
        self.line(&format!(
            "START direction={} items={} dst={}",
            direction.as_str(),
            items,
            dst
        ));
    }
    fn copy_done(&self, src: &str, dst: &str, bytes: u64, seconds: f64) {
        self.line(&format!(
            "COPY src={} dst={} bytes={} seconds={:.3}",
            src, dst, bytes, seconds
        ));
    }
    fn error(&self, context: &str, path: &str, msg: &str) {
        self.line(&format!("ERROR ctx={} path={} msg={}", context, path, msg));
    }
    fn done(&self, ok: u64, failed: u64, bytes: u64, seconds: f64) {
        self.line(&format!(
            "DONE ok={ok} failed={failed} bytes={bytes} seconds={seconds:.3}"
        ));
    }
}
