//! Byte accounting for transfer items
//!
//! Directory sizes are best-effort: anything that cannot be read while walking
//! the tree counts as zero instead of failing the measurement.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use walkdir::WalkDir;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

/// Shortest elapsed time used when computing throughput.
pub const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Size of a file, or the recursive sum of a directory tree. Never fails.
pub fn size_of(path: &Path) -> u64 {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return 0,
    };
    if metadata.is_file() {
        return metadata.len();
    }
    if !metadata.is_dir() {
        return 0;
    }

    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Size of a transfer item. A file must be stat-able; a directory degrades.
pub fn item_size(path: &Path, is_directory: bool) -> io::Result<u64> {
    if is_directory {
        Ok(size_of(path))
    } else {
        Ok(fs::metadata(path)?.len())
    }
}

/// Human-readable size with 1024-based units.
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}

/// MB/s over `elapsed`, which is clamped to [`MIN_ELAPSED`].
pub fn throughput_mb_s(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.max(MIN_ELAPSED).as_secs_f64();
    bytes as f64 / secs / 1024.0 / 1024.0
}
