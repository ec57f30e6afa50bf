use std::path::Path;

use hashbrown::HashMap;
use log::{debug, warn};

use crate::error::{PlateError, PlateResult};
use crate::utils::read_utf8_lossy;

/// Well identifier (`"A01"`) to sample name.
///
/// Empty grid cells leave the well unassigned: it has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WellMapping {
    samples: HashMap<String, String>,
}

impl WellMapping {
    pub fn sample(
        &self,
        well: &str,
    ) -> Option<&str> {
        self.samples.get(well).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Parses a mapping grid from CSV text.
    ///
    /// `source` is only used in messages.
    pub fn from_csv_str(
        text: &str,
        source: &Path,
    ) -> PlateResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut records = reader.records();

        let header = match records.next() {
            Some(header) => header?,
            None => {
                return Err(PlateError::Mapping {
                    path:   source.to_path_buf(),
                    reason: "file is empty".to_string(),
                })
            },
        };
        if header.len() < 2 {
            return Err(PlateError::Mapping {
                path:   source.to_path_buf(),
                reason: format!("header has {} column(s), expected at least 2", header.len()),
            });
        }
        let columns: Vec<&str> = header.iter().skip(1).map(str::trim).collect();

        let mut samples = HashMap::new();
        for (idx, record) in records.enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping row {} of {}: {}", idx + 2, source.display(), e);
                    continue;
                },
            };
            if record.len() < 2 {
                continue;
            }
            let row_label = record[0].trim();
            if row_label.is_empty() {
                continue;
            }
            for (column, sample) in columns.iter().zip(record.iter().skip(1)) {
                let sample = sample.trim();
                if column.is_empty() || sample.is_empty() {
                    continue;
                }
                samples.insert(format!("{}{}", row_label, column), sample.to_string());
            }
        }
        debug!("{} mapped wells in {}", samples.len(), source.display());
        Ok(Self { samples })
    }
}

/// Loads the well-to-sample grid of a mapping file.
pub fn read_mapping(path: &Path) -> PlateResult<WellMapping> {
    let text = read_utf8_lossy(path)?;
    WellMapping::from_csv_str(&text, path)
}
