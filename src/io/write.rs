//! CSV writers for the per-plate, merged and ratio tables.

use std::path::Path;

use itertools::Itertools;
use serde::Serialize;

use crate::data_structs::{MeasurementRecord, PlateDataRow, REQUIRED_COLUMNS, STAT_COLUMNS};
use crate::error::PlateResult;
use crate::tools::{AnnotatedDataset, RatioRecord};
use crate::utils::format_stat;

/// Writes the per-plate table (`Sample,Plate,Row,Column,Well,Measurement,Value`).
pub fn write_plate_data(
    path: &Path,
    records: &[MeasurementRecord],
) -> PlateResult<()> {
    let mut writer = csv::WriterBuilder::default()
        .has_headers(true)
        .from_path(path)?;
    for record in records {
        writer.serialize(PlateDataRow {
            sample:      &record.sample,
            plate:       &record.plate,
            row:         &record.row,
            column:      record.column,
            well:        &record.well,
            measurement: &record.measurement,
            value:       record.value,
        })?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the merged table: required columns, extra columns, `Mean,Std`.
pub fn write_merged(
    path: &Path,
    dataset: &AnnotatedDataset,
) -> PlateResult<()> {
    let mut writer = csv::WriterBuilder::default().from_path(path)?;
    let header = REQUIRED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(dataset.extra_columns().iter().cloned())
        .chain(STAT_COLUMNS.iter().map(|c| c.to_string()))
        .collect_vec();
    writer.write_record(&header)?;

    for annotated in dataset.records() {
        let record = &annotated.record;
        let row = [
            record.sample.clone(),
            record.plate.clone(),
            record.row.clone(),
            record.column.to_string(),
            record.well.clone(),
            record.measurement.clone(),
            record.value.to_string(),
        ]
        .into_iter()
        .chain(record.extra.iter().cloned())
        .chain([annotated.summary.mean_str(), annotated.summary.std_str()])
        .collect_vec();
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct RatioRow<'a> {
    #[serde(rename = "Sample")]
    sample:                  &'a str,
    #[serde(rename = "Nominator_Plate")]
    nominator_plate:         &'a str,
    #[serde(rename = "Nominator_Well")]
    nominator_well:          &'a str,
    #[serde(rename = "Nominator_Measurement")]
    nominator_measurement:   &'a str,
    #[serde(rename = "Nominator_Value")]
    nominator_value:         f64,
    #[serde(rename = "Denominator_Sample")]
    denominator_sample:      &'a str,
    #[serde(rename = "Denominator_Plate")]
    denominator_plate:       &'a str,
    #[serde(rename = "Denominator_Well")]
    denominator_well:        &'a str,
    #[serde(rename = "Denominator_Measurement")]
    denominator_measurement: &'a str,
    #[serde(rename = "Denominator_Value")]
    denominator_value:       f64,
    #[serde(rename = "Ratio")]
    ratio:                   String,
    #[serde(rename = "Ratio_Mean")]
    ratio_mean:              String,
    #[serde(rename = "Ratio_Std")]
    ratio_std:               String,
}

impl<'a> From<&'a RatioRecord> for RatioRow<'a> {
    fn from(record: &'a RatioRecord) -> Self {
        Self {
            sample:                  &record.sample,
            nominator_plate:         &record.numerator.plate,
            nominator_well:          &record.numerator.well,
            nominator_measurement:   &record.numerator.measurement,
            nominator_value:         record.numerator.value,
            denominator_sample:      &record.denominator.sample,
            denominator_plate:       &record.denominator.plate,
            denominator_well:        &record.denominator.well,
            denominator_measurement: &record.denominator.measurement,
            denominator_value:       record.denominator.value,
            ratio:                   format_stat(record.ratio),
            ratio_mean:              record.summary.mean_str(),
            ratio_std:               record.summary.std_str(),
        }
    }
}

/// Writes the ratio table.
pub fn write_ratios(
    path: &Path,
    ratios: &[RatioRecord],
) -> PlateResult<()> {
    let mut writer = csv::WriterBuilder::default()
        .has_headers(true)
        .from_path(path)?;
    for record in ratios {
        writer.serialize(RatioRow::from(record))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
