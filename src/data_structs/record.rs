use serde::Serialize;

/// Number of rows on a supported plate (`A`..`H`).
pub const PLATE_ROWS: usize = 8;
/// Number of columns on a supported plate (`01`..`12`).
pub const PLATE_COLUMNS: usize = 12;

/// Builds the well identifier, e.g. `("A", 1)` -> `"A01"`.
pub fn well_id(
    row: &str,
    column: u8,
) -> String {
    format!("{}{:02}", row, column)
}

/// A single reading extracted from a plate export block.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateReading {
    pub row:         String,
    pub column:      u8,
    pub measurement: String,
    pub value:       f64,
}

impl PlateReading {
    pub fn well(&self) -> String {
        well_id(&self.row, self.column)
    }
}

/// One physical-well reading with its sample identity.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub sample:      String,
    pub plate:       String,
    pub row:         String,
    pub column:      u8,
    pub well:        String,
    pub measurement: String,
    pub value:       f64,
    /// Values of non-required columns, aligned with
    /// [`Dataset::extra_columns`](super::Dataset::extra_columns).
    pub extra:       Vec<String>,
}

impl MeasurementRecord {
    pub fn new(
        sample: impl Into<String>,
        plate: impl Into<String>,
        row: impl Into<String>,
        column: u8,
        measurement: impl Into<String>,
        value: f64,
    ) -> Self {
        let row = row.into();
        Self {
            well: well_id(&row, column),
            sample: sample.into(),
            plate: plate.into(),
            row,
            column,
            measurement: measurement.into(),
            value,
            extra: Vec::new(),
        }
    }

    /// Positional identity used to pair numerator and denominator readings.
    pub fn identity(&self) -> WellKey {
        WellKey {
            sample: self.sample.clone(),
            plate:  self.plate.clone(),
            row:    self.row.clone(),
            column: self.column,
            well:   self.well.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WellKey {
    pub sample: String,
    pub plate:  String,
    pub row:    String,
    pub column: u8,
    pub well:   String,
}

/// Row of the per-plate data file written by the generator.
#[derive(Debug, Serialize)]
pub struct PlateDataRow<'a> {
    #[serde(rename = "Sample")]
    pub sample:      &'a str,
    #[serde(rename = "Plate")]
    pub plate:       &'a str,
    #[serde(rename = "Row")]
    pub row:         &'a str,
    #[serde(rename = "Column")]
    pub column:      u8,
    #[serde(rename = "Well")]
    pub well:        &'a str,
    #[serde(rename = "Measurement")]
    pub measurement: &'a str,
    #[serde(rename = "Value")]
    pub value:       f64,
}
