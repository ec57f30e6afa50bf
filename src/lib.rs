//! # platexplorer
//!
//! `platexplorer` turns raw plate-reader text exports into per-sample
//! statistics. It reads the block-oriented exports of 8 × 12 microplates,
//! maps every well to a sample through a mapping grid, merges the resulting
//! per-plate tables of a directory and annotates every reading with the
//! mean and sample standard deviation of its replicate group. When a
//! directory holds exactly two measurement types, per-well
//! numerator/denominator ratios and their per-sample statistics are
//! computed as well.
//!
//! If you do not want to use platexplorer as a crate, check out the
//! `platexplorer` command-line tool in the `console` workspace member.
//!
//! ## Structure
//!
//! * [`data_structs`]: value records passed between stages
//!   ([`MeasurementRecord`](data_structs::MeasurementRecord),
//!   [`Dataset`](data_structs::Dataset),
//!   [`StatSummary`](data_structs::StatSummary)).
//! * [`io`]: plate export reader, mapping and assignment readers, CSV
//!   writers.
//! * [`tools`]: data file generation, merging, replicate statistics and
//!   ratios.
//! * [`pipeline`]: per-directory orchestration with a run-wide
//!   [`RatioPolicy`](pipeline::RatioPolicy).
//!
//! Number of threads used to analyse directories can be configured with the
//! `PLATEX_NUM_THREADS` environment variable.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use platexplorer::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let assignments = load_assignments(Path::new("mappings/assignment.csv"))?;
//!     generate_all(&assignments, Path::new("data"), &PlateParserConfig::default());
//!
//!     let mut roles = FixedRoles(RatioPolicy::Compute(RatioRoles::new("OD", "Blank")));
//!     let reports = analyse_data_dir(
//!         Path::new("data"),
//!         &AnalysisConfig::default(),
//!         &mut roles,
//!     )?;
//!     for report in reports {
//!         println!("{}: {:?}", report.directory.display(), report.merged);
//!     }
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod exports;
pub mod io;
pub mod pipeline;
pub mod prelude;
pub mod tools;
pub mod utils;
