pub mod generate;
pub mod merge;
pub mod ratio;
pub mod stats;

pub use generate::{generate_all, generate_plate, plate_output_path, DATA_SUFFIX};
pub use merge::merge_files;
pub use ratio::{compute_ratios, RatioRecord, RatioRoles, RatioSide};
pub use stats::{annotate, AnnotatedDataset, AnnotatedRecord, MeasurementShape};
