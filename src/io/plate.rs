//! Reader for plate-reader text exports.
//!
//! An export is a sequence of independent blocks, one per measurement:
//!
//! ```text
//! Results for Meas A - free text
//! ,01,02,03,04,05,06,07,08,09,10,11,12,
//! A,0.1,0.2,...
//! ...
//! H,0.1,0.2,...
//! ```
//!
//! Lines outside of blocks are ignored. Blocks are read in order and are
//! never deduplicated.

use std::collections::VecDeque;
use std::path::Path;

use itertools::Itertools;
use log::{debug, warn};

use crate::data_structs::{PlateReading, PLATE_COLUMNS, PLATE_ROWS};
use crate::error::{PlateError, PlateResult};
use crate::utils::{parse_decimal, read_legacy_text};

const BLOCK_MARKER: &str = "Results for";

#[derive(Debug, Clone)]
pub struct PlateParserConfig {
    separator: char,
}

impl Default for PlateParserConfig {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl PlateParserConfig {
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn with_separator(
        mut self,
        separator: char,
    ) -> Self {
        self.separator = separator;
        self
    }

    pub fn separator(&self) -> char {
        self.separator
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Scanning,
    /// Header seen, the grid header row must follow.
    AwaitingGrid { measurement: String },
    Reading {
        measurement: String,
        rows_read:   usize,
    },
}

/// Single-pass iterator over the readings of a plate export.
pub struct PlateBlockReader<I> {
    lines:     I,
    source:    String,
    separator: char,
    state:     ScanState,
    pending:   VecDeque<PlateReading>,
    /// Line to examine again after a block ended on it.
    replay:    Option<String>,
    line_no:   usize,
}

impl<I, S> PlateBlockReader<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(
        lines: I,
        source: impl Into<String>,
        config: &PlateParserConfig,
    ) -> Self {
        Self {
            lines,
            source: source.into(),
            separator: config.separator,
            state: ScanState::Scanning,
            pending: VecDeque::new(),
            replay: None,
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<String> {
        if let Some(line) = self.replay.take() {
            return Some(line);
        }
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line.as_ref().trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_row(
        &mut self,
        line: &str,
        measurement: &str,
    ) {
        let fields = line.split(self.separator).collect_vec();
        if fields.len() < 2 {
            return;
        }
        let row = fields[0].trim();
        if row.is_empty() {
            warn!(
                "Row without label in {} (line {}), skipped",
                self.source, self.line_no
            );
            return;
        }

        for (idx, cell) in fields.iter().skip(1).take(PLATE_COLUMNS).enumerate() {
            if cell.trim().is_empty() {
                continue;
            }
            let column = (idx + 1) as u8;
            match parse_decimal(cell) {
                Some(value) => {
                    self.pending.push_back(PlateReading {
                        row: row.to_string(),
                        column,
                        measurement: measurement.to_string(),
                        value,
                    })
                },
                None => {
                    let err = PlateError::ValueParse {
                        source_name: self.source.clone(),
                        location:    format!("row {}, column {:02}", row, column),
                        field:       "Value",
                        value:       cell.to_string(),
                    };
                    warn!("{}", err);
                },
            }
        }
    }
}

fn block_measurement(line: &str) -> Option<String> {
    let rest = line.trim().strip_prefix(BLOCK_MARKER)?;
    let name = rest.split('-').next().unwrap_or(rest);
    Some(name.trim().to_string())
}

impl<I, S> Iterator for PlateBlockReader<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = PlateReading;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reading) = self.pending.pop_front() {
                return Some(reading);
            }
            let line = self.next_line()?;

            let state = std::mem::replace(&mut self.state, ScanState::Scanning);
            match state {
                ScanState::Scanning => {
                    if let Some(measurement) = block_measurement(&line) {
                        debug!(
                            "Found measurement '{}' in {} (line {})",
                            measurement, self.source, self.line_no
                        );
                        self.state = ScanState::AwaitingGrid { measurement };
                    }
                },
                ScanState::AwaitingGrid { measurement } => {
                    if line.starts_with(self.separator) {
                        self.state = ScanState::Reading {
                            measurement,
                            rows_read: 0,
                        };
                    }
                    else {
                        debug!(
                            "No grid header after '{}' in {} (line {}), resynchronising",
                            measurement, self.source, self.line_no
                        );
                        self.replay = Some(line);
                    }
                },
                ScanState::Reading {
                    measurement,
                    rows_read,
                } => {
                    if block_measurement(&line).is_some() {
                        warn!(
                            "Block '{}' in {} ended after {} rows",
                            measurement, self.source, rows_read
                        );
                        self.replay = Some(line);
                        continue;
                    }
                    self.read_row(&line, &measurement);
                    if rows_read + 1 < PLATE_ROWS {
                        self.state = ScanState::Reading {
                            measurement,
                            rows_read: rows_read + 1,
                        };
                    }
                },
            }
        }
    }
}

/// Reads every reading of a plate export file.
pub fn read_plate_file(
    path: &Path,
    config: &PlateParserConfig,
) -> PlateResult<Vec<PlateReading>> {
    let text = read_legacy_text(path)?;
    let source = path.display().to_string();
    let readings = PlateBlockReader::new(text.lines(), source, config).collect_vec();
    debug!("{} readings in {}", readings.len(), path.display());
    Ok(readings)
}
