//! Readers for plate exports, mapping grids and assignment lists, and the
//! CSV writers of the pipeline outputs.

mod assignment;
mod mapping;
mod plate;
mod write;

pub use assignment::{load_assignments, Assignment};
pub use mapping::{read_mapping, WellMapping};
pub use plate::{read_plate_file, PlateBlockReader, PlateParserConfig};
pub use write::{write_merged, write_plate_data, write_ratios};
