//! Replicate statistics over a merged [`Dataset`].
//!
//! With one measurement type, values are grouped by sample. With two, they
//! are grouped by `(sample, measurement)`. Any other number of measurement
//! types is rejected before anything is annotated.

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use crate::data_structs::{Dataset, MeasurementRecord, StatSummary};
use crate::error::{PlateError, PlateResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementShape {
    Single(String),
    /// Two measurement names, sorted.
    Paired(String, String),
}

impl MeasurementShape {
    pub fn of(dataset: &Dataset) -> PlateResult<Self> {
        let mut measurements = dataset.measurements();
        match measurements.len() {
            1 => Ok(Self::Single(measurements.remove(0))),
            2 => {
                let second = measurements.remove(1);
                let first = measurements.remove(0);
                Ok(Self::Paired(first, second))
            },
            _ => Err(PlateError::UnsupportedShape { measurements }),
        }
    }

    pub fn measurements(&self) -> Vec<&str> {
        match self {
            Self::Single(m) => vec![m.as_str()],
            Self::Paired(a, b) => vec![a.as_str(), b.as_str()],
        }
    }

    pub fn contains(
        &self,
        measurement: &str,
    ) -> bool {
        self.measurements().contains(&measurement)
    }

    fn group_key<'a>(
        &self,
        record: &'a MeasurementRecord,
    ) -> (&'a str, Option<&'a str>) {
        match self {
            Self::Single(_) => (record.sample.as_str(), None),
            Self::Paired(..) => (record.sample.as_str(), Some(record.measurement.as_str())),
        }
    }
}

/// A record together with the statistics of its replicate group.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub record:  MeasurementRecord,
    pub summary: StatSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedDataset {
    shape:         MeasurementShape,
    extra_columns: Vec<String>,
    records:       Vec<AnnotatedRecord>,
}

impl AnnotatedDataset {
    pub fn shape(&self) -> &MeasurementShape {
        &self.shape
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn records(&self) -> &[AnnotatedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Annotates every record with the mean and standard deviation of its group.
pub fn annotate(dataset: Dataset) -> PlateResult<AnnotatedDataset> {
    let shape = MeasurementShape::of(&dataset)?;
    debug!("Measurement shape: {:?}", shape);

    let summaries: HashMap<(String, Option<String>), StatSummary> = dataset
        .records()
        .iter()
        .map(|r| (shape.group_key(r), r.value))
        .into_group_map()
        .into_iter()
        .map(|((sample, measurement), values)| {
            (
                (sample.to_string(), measurement.map(str::to_string)),
                StatSummary::from_values(&values),
            )
        })
        .collect();
    debug!("{} replicate groups", summaries.len());

    let extra_columns = dataset.extra_columns().to_vec();
    let records = dataset
        .into_records()
        .into_iter()
        .map(|record| {
            let (sample, measurement) = shape.group_key(&record);
            let key = (sample.to_string(), measurement.map(str::to_string));
            // Every record contributed to its own group above.
            let summary = summaries[&key];
            AnnotatedRecord { record, summary }
        })
        .collect_vec();

    Ok(AnnotatedDataset {
        shape,
        extra_columns,
        records,
    })
}
