#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const ROWS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// One `Results for` block with a value for each of the 96 wells.
pub fn plate_block<F>(
    measurement: &str,
    value: F,
) -> String
where
    F: Fn(usize, usize) -> String, {
    let mut block = format!("Results for {} - 20.05.2025 12:00\n", measurement);
    block.push(',');
    for column in 1..=12 {
        block.push_str(&format!("{:02},", column));
    }
    block.push('\n');
    for (row_idx, row) in ROWS.iter().enumerate() {
        block.push_str(row);
        for column in 1..=12 {
            block.push(',');
            block.push_str(&value(row_idx, column));
        }
        block.push_str(",\n");
    }
    block
}

/// A mapping grid; `sample(row, column)` returning `None` leaves the cell
/// empty.
pub fn mapping_grid<F>(sample: F) -> String
where
    F: Fn(usize, usize) -> Option<String>, {
    let mut grid = String::new();
    for column in 1..=12 {
        grid.push_str(&format!(",{:02}", column));
    }
    grid.push('\n');
    for (row_idx, row) in ROWS.iter().enumerate() {
        grid.push_str(row);
        for column in 1..=12 {
            grid.push(',');
            grid.push_str(&sample(row_idx, column).unwrap_or_default());
        }
        grid.push('\n');
    }
    grid
}

/// Writes a per-plate data file with the required header.
///
/// Rows are `(sample, plate, row, column, measurement, value)`.
pub fn write_data_file(
    dir: &Path,
    name: &str,
    rows: &[(&str, &str, &str, u8, &str, &str)],
) -> PathBuf {
    let mut text = String::from("Sample,Plate,Row,Column,Well,Measurement,Value\n");
    for (sample, plate, row, column, measurement, value) in rows {
        text.push_str(&format!(
            "{},{},{},{},{}{:02},{},{}\n",
            sample, plate, row, column, row, column, measurement, value
        ));
    }
    let path = dir.join(name);
    fs::create_dir_all(dir).unwrap();
    fs::write(&path, text).unwrap();
    path
}

/// Reads a CSV file into its header and rows.
pub fn read_table(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

/// Temporary directory for one test, with logging routed to the test output.
pub fn tempdir() -> std::io::Result<tempfile::TempDir> {
    let _ = pretty_env_logger::formatted_builder()
        .is_test(true)
        .try_init();
    tempfile::tempdir()
}
