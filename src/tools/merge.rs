//! Merges the per-plate data files of one directory into a [`Dataset`].
//!
//! A file whose header lacks a required column is rejected as a whole.
//! Inside an accepted file, rows are rejected one by one when their
//! `Value` (or `Column`) does not parse.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::data_structs::{DataSchema, Dataset, MeasurementRecord};
use crate::error::{PlateError, PlateResult};
use crate::utils::parse_decimal;

struct FileRows {
    extra_columns: Vec<String>,
    records:       Vec<MeasurementRecord>,
}

fn row_rejection(
    path: &Path,
    line: u64,
    field: &'static str,
    value: &str,
) -> PlateError {
    PlateError::ValueParse {
        source_name: path.display().to_string(),
        location: format!("line {}", line),
        field,
        value: value.to_string(),
    }
}

fn read_data_file(path: &Path) -> PlateResult<FileRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let header = reader.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    let schema = DataSchema::validate(path, &header)?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Rejected row of {}: {}", path.display(), e);
                continue;
            },
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

        let value = match parse_decimal(field(schema.value)) {
            Some(value) => value,
            None => {
                warn!("{}", row_rejection(path, line, "Value", field(schema.value)));
                continue;
            },
        };
        let column = match field(schema.column).parse::<u8>() {
            Ok(column) => column,
            Err(_) => {
                warn!("{}", row_rejection(path, line, "Column", field(schema.column)));
                continue;
            },
        };

        records.push(MeasurementRecord {
            sample: field(schema.sample).to_string(),
            plate: field(schema.plate).to_string(),
            row: field(schema.row).to_string(),
            column,
            well: field(schema.well).to_string(),
            measurement: field(schema.measurement).to_string(),
            value,
            extra: schema
                .extra
                .iter()
                .map(|(_, idx)| field(*idx).to_string())
                .collect(),
        });
    }

    Ok(FileRows {
        extra_columns: schema.extra.into_iter().map(|(name, _)| name).collect(),
        records,
    })
}

/// Merges `paths` in the given order.
///
/// Rejected files are logged and skipped. Returns
/// [`PlateError::EmptyResult`] when no row survives.
pub fn merge_files(paths: &[PathBuf]) -> PlateResult<Dataset> {
    let mut extra_columns: Vec<String> = Vec::new();
    let mut records: Vec<MeasurementRecord> = Vec::new();

    for path in paths {
        let file_rows = match read_data_file(path) {
            Ok(file_rows) => file_rows,
            Err(e) => {
                error!("Rejected file {}", e);
                continue;
            },
        };
        debug!("{} rows accepted from {}", file_rows.records.len(), path.display());

        // Positions of this file's extras in the merged column list.
        let positions = file_rows
            .extra_columns
            .iter()
            .map(|name| {
                match extra_columns.iter().position(|c| c == name) {
                    Some(pos) => pos,
                    None => {
                        extra_columns.push(name.clone());
                        extra_columns.len() - 1
                    },
                }
            })
            .collect::<Vec<_>>();

        for mut record in file_rows.records {
            let mut extra = vec![String::new(); extra_columns.len()];
            for (value, pos) in record.extra.drain(..).zip(positions.iter()) {
                extra[*pos] = value;
            }
            record.extra = extra;
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(PlateError::EmptyResult(
            "no rows to analyse after merging".to_string(),
        ));
    }
    for record in records.iter_mut() {
        record.extra.resize(extra_columns.len(), String::new());
    }

    info!("Merged {} rows from {} files", records.len(), paths.len());
    Ok(Dataset::new(extra_columns, records))
}
