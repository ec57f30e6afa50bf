//! Builds per-plate data files from plate exports and mapping grids.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::data_structs::MeasurementRecord;
use crate::error::{PlateError, PlateResult};
use crate::io::{read_mapping, read_plate_file, write_plate_data, Assignment, PlateParserConfig};

/// Subdirectory used for inputs that do not live in a named directory.
pub const DEFAULT_GROUP: &str = "default";

/// Suffix of generated per-plate data files.
pub const DATA_SUFFIX: &str = "_data.csv";

/// `<data_dir>/<input parent name>/<input stem>_data.csv`
pub fn plate_output_path(
    input: &Path,
    data_dir: &Path,
) -> PathBuf {
    let group = input
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_GROUP.to_string());
    data_dir
        .join(group)
        .join(format!("{}{}", plate_name(input), DATA_SUFFIX))
}

fn plate_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Joins the readings of one plate export with its mapping and writes the
/// per-plate data file.
///
/// Returns `Ok(None)` when there is nothing to write: a missing input, an
/// empty mapping or an export without readings.
pub fn generate_plate(
    assignment: &Assignment,
    data_dir: &Path,
    config: &PlateParserConfig,
) -> PlateResult<Option<PathBuf>> {
    for path in [&assignment.input, &assignment.mapping] {
        if !path.is_file() {
            error!("File not found: {}", path.display());
            return Ok(None);
        }
    }
    info!(
        "Processing {} with mapping {}",
        assignment.input.display(),
        assignment.mapping.display()
    );

    let mapping = read_mapping(&assignment.mapping)?;
    if mapping.is_empty() {
        warn!(
            "Mapping {} assigns no wells, nothing written for {}",
            assignment.mapping.display(),
            assignment.input.display()
        );
        return Ok(None);
    }

    let readings = read_plate_file(&assignment.input, config)?;
    if readings.is_empty() {
        warn!("No readings found in {}", assignment.input.display());
        return Ok(None);
    }

    let plate = plate_name(&assignment.input);
    let mut unassigned = 0usize;
    let records = readings
        .into_iter()
        .filter_map(|reading| {
            match mapping.sample(&reading.well()) {
                Some(sample) => {
                    Some(MeasurementRecord::new(
                        sample,
                        plate.as_str(),
                        reading.row,
                        reading.column,
                        reading.measurement,
                        reading.value,
                    ))
                },
                None => {
                    unassigned += 1;
                    None
                },
            }
        })
        .collect::<Vec<_>>();
    if unassigned > 0 {
        warn!(
            "{} readings of {} fall in unassigned wells and were dropped",
            unassigned,
            assignment.input.display()
        );
    }
    if records.is_empty() {
        warn!("No assigned readings in {}", assignment.input.display());
        return Ok(None);
    }

    let output = plate_output_path(&assignment.input, data_dir);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| PlateError::io(parent, e))?;
    }
    write_plate_data(&output, &records)?;
    info!("Saved {} rows to {}", records.len(), output.display());
    Ok(Some(output))
}

/// Runs [`generate_plate`] for every assignment, isolating failures.
pub fn generate_all(
    assignments: &[Assignment],
    data_dir: &Path,
    config: &PlateParserConfig,
) -> Vec<PathBuf> {
    let outputs = assignments
        .iter()
        .filter_map(|assignment| {
            generate_plate(assignment, data_dir, config)
                .unwrap_or_else(|e| {
                    error!(
                        "Failed to generate data for {}: {}",
                        assignment.input.display(),
                        e
                    );
                    None
                })
        })
        .collect::<Vec<_>>();
    info!("Generated {} data files", outputs.len());
    outputs
}
