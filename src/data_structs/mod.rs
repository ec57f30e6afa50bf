//! Value records passed between pipeline stages.

mod dataset;
mod record;
mod summary;

pub use dataset::{DataSchema, Dataset, REQUIRED_COLUMNS, STAT_COLUMNS};
pub use record::{
    well_id,
    MeasurementRecord,
    PlateDataRow,
    PlateReading,
    WellKey,
    PLATE_COLUMNS,
    PLATE_ROWS,
};
pub use summary::StatSummary;
