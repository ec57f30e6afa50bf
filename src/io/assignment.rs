use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::PlateResult;
use crate::utils::read_utf8_lossy;

/// A plate export paired with the mapping grid describing its wells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub input:   PathBuf,
    pub mapping: PathBuf,
}

impl Assignment {
    pub fn new(
        input: impl Into<PathBuf>,
        mapping: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input:   input.into(),
            mapping: mapping.into(),
        }
    }
}

/// Reads the semicolon-separated `input;mapping` assignment list.
pub fn load_assignments(path: &Path) -> PlateResult<Vec<Assignment>> {
    let text = read_utf8_lossy(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b';')
        .from_reader(text.as_bytes());

    let mut assignments = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {} of {}: {}", row, path.display(), e);
                continue;
            },
        };
        if record.len() < 2 {
            warn!(
                "Skipping row {} of {}: expected at least 2 columns",
                row,
                path.display()
            );
            continue;
        }
        let input = record[0].trim();
        let mapping = record[1].trim();
        if row == 1
            && input.eq_ignore_ascii_case("input_file")
            && mapping.eq_ignore_ascii_case("mapping_file")
        {
            continue;
        }
        if input.is_empty() || mapping.is_empty() {
            warn!("Skipping row {} of {}: empty path", row, path.display());
            continue;
        }
        assignments.push(Assignment::new(input, mapping));
    }

    info!("Loaded {} assignments from {}", assignments.len(), path.display());
    Ok(assignments)
}
