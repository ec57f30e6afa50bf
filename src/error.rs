//! Error taxonomy of the ingestion pipeline.
//!
//! Only [`PlateError::Schema`], [`PlateError::UnsupportedShape`],
//! [`PlateError::EmptyResult`] and the I/O wrappers are ever returned from a
//! stage. [`PlateError::ValueParse`] and [`PlateError::Match`] describe
//! single rejected rows or ratio pairs; they are built only to be logged.

use std::path::PathBuf;

use thiserror::Error;

pub type PlateResult<T> = Result<T, PlateError>;

#[derive(Debug, Error)]
pub enum PlateError {
    #[error("{} is missing required columns: {}", path.display(), missing.join(", "))]
    Schema {
        path:    PathBuf,
        missing: Vec<String>,
    },

    #[error("invalid {field} value '{value}' in {source_name} ({location})")]
    ValueParse {
        source_name: String,
        location:    String,
        field:       &'static str,
        value:       String,
    },

    #[error(
        "unsupported number of measurement types ({}): {:?}; expected 1 or 2",
        measurements.len(),
        measurements
    )]
    UnsupportedShape { measurements: Vec<String> },

    #[error("no ratio for sample '{sample}', plate '{plate}', well {well}: {reason}")]
    Match {
        sample: String,
        plate:  String,
        well:   String,
        reason: MatchFailure,
    },

    #[error("{0}")]
    EmptyResult(String),

    #[error("malformed mapping file {}: {reason}", path.display())]
    Mapping { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFailure {
    MissingDenominator,
    ZeroDenominator,
}

impl std::fmt::Display for MatchFailure {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            MatchFailure::MissingDenominator => write!(f, "no matching denominator"),
            MatchFailure::ZeroDenominator => write!(f, "denominator is zero"),
        }
    }
}

impl PlateError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        PlateError::Io {
            path: path.into(),
            source,
        }
    }
}
