//! Helpers shared by the readers, the statistics engine and the pipeline:
//! decimal parsing, legacy text decoding, four-decimal formatting and the
//! shared worker pool.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1250;
use log::warn;
use once_cell::sync::Lazy;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{PlateError, PlateResult};

mod stats;
pub use stats::*;

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var("PLATEX_NUM_THREADS")
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

/// Parses a decimal number written with either `.` or `,` as separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Reads a whole plate export and decodes it from Windows-1250.
///
/// Undecodable bytes are replaced rather than failing the file.
pub fn read_legacy_text(path: &Path) -> PlateResult<String> {
    let bytes = fs::read(path).map_err(|e| PlateError::io(path, e))?;
    let (text, had_errors) = WINDOWS_1250.decode_without_bom_handling(&bytes);
    if had_errors {
        warn!(
            "Replaced undecodable characters while reading {}",
            path.display()
        );
    }
    Ok(text.into_owned())
}

/// Reads a UTF-8 text file, replacing invalid sequences.
pub fn read_utf8_lossy(path: &Path) -> PlateResult<String> {
    let bytes = fs::read(path).map_err(|e| PlateError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}
