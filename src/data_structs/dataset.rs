use std::path::Path;

use itertools::Itertools;

use super::record::MeasurementRecord;
use crate::error::{PlateError, PlateResult};

/// Columns every per-plate data file must provide, in output order.
pub const REQUIRED_COLUMNS: [&str; 7] =
    ["Sample", "Plate", "Row", "Column", "Well", "Measurement", "Value"];

/// Columns appended by the statistics engine; never carried as extras.
pub const STAT_COLUMNS: [&str; 2] = ["Mean", "Std"];

/// Positions of the schema columns inside one file's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSchema {
    pub sample:      usize,
    pub plate:       usize,
    pub row:         usize,
    pub column:      usize,
    pub well:        usize,
    pub measurement: usize,
    pub value:       usize,
    /// `(name, position)` of every other column, in header order.
    pub extra:       Vec<(String, usize)>,
}

impl DataSchema {
    /// Validates a header against [`REQUIRED_COLUMNS`].
    ///
    /// Extra columns are allowed; a missing required column rejects the
    /// whole file.
    pub fn validate<S: AsRef<str>>(
        path: &Path,
        header: &[S],
    ) -> PlateResult<Self> {
        let header = header.iter().map(|h| h.as_ref().trim()).collect_vec();
        let position = |name: &str| header.iter().position(|h| *h == name);

        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect_vec();
        if !missing.is_empty() {
            return Err(PlateError::Schema {
                path: path.to_path_buf(),
                missing,
            });
        }

        let extra = header
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                !name.is_empty()
                    && !REQUIRED_COLUMNS.contains(*name)
                    && !STAT_COLUMNS.contains(*name)
            })
            .map(|(idx, name)| (name.to_string(), idx))
            .collect_vec();

        // Required columns are guaranteed present above.
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            sample: at("Sample"),
            plate: at("Plate"),
            row: at("Row"),
            column: at("Column"),
            well: at("Well"),
            measurement: at("Measurement"),
            value: at("Value"),
            extra,
        })
    }
}

/// Records merged from the data files of one directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    extra_columns: Vec<String>,
    records:       Vec<MeasurementRecord>,
}

impl Dataset {
    pub fn new(
        extra_columns: Vec<String>,
        records: Vec<MeasurementRecord>,
    ) -> Self {
        Self {
            extra_columns,
            records,
        }
    }

    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        Self::new(Vec::new(), records)
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.records
    }

    /// Non-required columns observed across merged files, first-seen order.
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// All observed column names: the required schema followed by extras.
    pub fn columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.extra_columns.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct measurement names, sorted.
    pub fn measurements(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.measurement.clone())
            .sorted()
            .dedup()
            .collect()
    }
}
