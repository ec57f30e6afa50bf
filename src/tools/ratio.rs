//! Per-well numerator/denominator ratios.
//!
//! Numerator and denominator readings are paired by their full positional
//! identity `(Sample, Plate, Row, Column, Well)`, so a ratio is always taken
//! within one physical well.

use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, warn};

use super::stats::{AnnotatedDataset, MeasurementShape};
use crate::data_structs::{MeasurementRecord, StatSummary, WellKey};
use crate::error::{MatchFailure, PlateError, PlateResult};

/// Which measurement is divided by which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatioRoles {
    pub numerator:   String,
    pub denominator: String,
}

impl RatioRoles {
    pub fn new(
        numerator: impl Into<String>,
        denominator: impl Into<String>,
    ) -> Self {
        Self {
            numerator:   numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Whether both role names occur in `shape`.
    pub fn fits(
        &self,
        shape: &MeasurementShape,
    ) -> bool {
        matches!(shape, MeasurementShape::Paired(..))
            && shape.contains(&self.numerator)
            && shape.contains(&self.denominator)
    }
}

/// One side of a ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSide {
    pub sample:      String,
    pub plate:       String,
    pub well:        String,
    pub measurement: String,
    pub value:       f64,
}

impl From<&MeasurementRecord> for RatioSide {
    fn from(record: &MeasurementRecord) -> Self {
        Self {
            sample:      record.sample.clone(),
            plate:       record.plate.clone(),
            well:        record.well.clone(),
            measurement: record.measurement.clone(),
            value:       record.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatioRecord {
    pub sample:      String,
    pub numerator:   RatioSide,
    pub denominator: RatioSide,
    pub ratio:       f64,
    /// Mean and standard deviation of all ratios of `sample`.
    pub summary:     StatSummary,
}

/// Computes a ratio for every numerator reading with a non-zero denominator
/// in the same well, then summarises ratios per sample.
///
/// Unmatched readings and zero denominators are logged and skipped. Returns
/// [`PlateError::EmptyResult`] when no pair remains.
pub fn compute_ratios(
    dataset: &AnnotatedDataset,
    roles: &RatioRoles,
) -> PlateResult<Vec<RatioRecord>> {
    if !matches!(dataset.shape(), MeasurementShape::Paired(..)) {
        return Err(PlateError::UnsupportedShape {
            measurements: dataset
                .shape()
                .measurements()
                .into_iter()
                .map(str::to_string)
                .collect(),
        });
    }

    let denominators: HashMap<WellKey, &MeasurementRecord> = dataset
        .records()
        .iter()
        .map(|annotated| &annotated.record)
        .filter(|record| record.measurement == roles.denominator)
        .map(|record| (record.identity(), record))
        .collect();
    debug!("{} denominator readings", denominators.len());

    let mut pairs = Vec::new();
    for numerator in dataset
        .records()
        .iter()
        .map(|annotated| &annotated.record)
        .filter(|record| record.measurement == roles.numerator)
    {
        let failure = match denominators.get(&numerator.identity()) {
            None => MatchFailure::MissingDenominator,
            Some(denominator) if denominator.value == 0.0 => MatchFailure::ZeroDenominator,
            Some(denominator) => {
                pairs.push((numerator, *denominator));
                continue;
            },
        };
        let err = PlateError::Match {
            sample: numerator.sample.clone(),
            plate:  numerator.plate.clone(),
            well:   numerator.well.clone(),
            reason: failure,
        };
        warn!("{}", err);
    }

    if pairs.is_empty() {
        return Err(PlateError::EmptyResult(format!(
            "no valid numerator/denominator pairs for {} / {}",
            roles.numerator, roles.denominator
        )));
    }

    let ratios = pairs
        .iter()
        .map(|(numerator, denominator)| numerator.value / denominator.value)
        .collect_vec();
    let summaries: HashMap<&str, StatSummary> = pairs
        .iter()
        .zip(ratios.iter())
        .map(|((numerator, _), ratio)| (numerator.sample.as_str(), *ratio))
        .into_group_map()
        .into_iter()
        .map(|(sample, values)| (sample, StatSummary::from_values(&values)))
        .collect();

    Ok(pairs
        .iter()
        .zip(ratios)
        .map(|((numerator, denominator), ratio)| {
            RatioRecord {
                sample: numerator.sample.clone(),
                numerator: RatioSide::from(*numerator),
                denominator: RatioSide::from(*denominator),
                ratio,
                summary: summaries[numerator.sample.as_str()],
            }
        })
        .collect())
}
