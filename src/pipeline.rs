//! Runs merge, statistics and ratios over every subdirectory of a data
//! directory.
//!
//! Whether ratios are computed, and with which roles, is decided once per
//! run: the [`RoleSelector`] is consulted for the first subdirectory (in
//! path order) that has exactly two measurement types, and the resulting
//! [`RatioPolicy`] is applied to every qualifying subdirectory.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use itertools::Itertools;
use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::error::{PlateError, PlateResult};
use crate::io::{write_merged, write_ratios};
use crate::tools::{
    annotate,
    compute_ratios,
    merge_files,
    AnnotatedDataset,
    MeasurementShape,
    RatioRoles,
    DATA_SUFFIX,
};
use crate::utils::THREAD_POOL;

/// Ratio decision shared by all subdirectories of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatioPolicy {
    Skip,
    Compute(RatioRoles),
}

/// Chooses the ratio roles for a run.
///
/// Called at most once per run, with the sorted measurement names of the
/// first subdirectory that has two measurement types.
pub trait RoleSelector {
    fn select(
        &mut self,
        measurements: &[String],
    ) -> PlateResult<RatioPolicy>;
}

/// Selector returning a policy fixed in advance.
#[derive(Debug, Clone)]
pub struct FixedRoles(pub RatioPolicy);

impl RoleSelector for FixedRoles {
    fn select(
        &mut self,
        _measurements: &[String],
    ) -> PlateResult<RatioPolicy> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pattern:     Pattern,
    merged_name: String,
    ratio_name:  String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern:     Pattern::new(&format!("*{}", DATA_SUFFIX))
                .expect("static pattern is valid"),
            merged_name: "data_merged.csv".to_string(),
            ratio_name:  "ratios.csv".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Glob pattern matched against file names of data files.
    pub fn with_pattern(
        mut self,
        pattern: &str,
    ) -> PlateResult<Self> {
        self.pattern = Pattern::new(pattern)
            .map_err(|e| PlateError::Config(format!("data file pattern '{}': {}", pattern, e)))?;
        Ok(self)
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn with_merged_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.merged_name = name.into();
        self
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn with_ratio_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.ratio_name = name.into();
        self
    }

    pub fn merged_name(&self) -> &str {
        &self.merged_name
    }

    pub fn ratio_name(&self) -> &str {
        &self.ratio_name
    }

    fn is_data_file(
        &self,
        path: &Path,
    ) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        path.is_file()
            && name != self.merged_name.as_str()
            && name != self.ratio_name.as_str()
            && self.pattern.matches(&name)
    }
}

/// What happened to one subdirectory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub merged:    Option<PathBuf>,
    pub ratios:    Option<PathBuf>,
    /// Reason the directory, or its ratio stage, produced no output.
    pub failure:   Option<String>,
}

impl DirectoryReport {
    fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..Default::default()
        }
    }
}

fn sorted_entries(dir: &Path) -> PlateResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| PlateError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry.map_err(|e| PlateError::io(dir, e))?.path());
    }
    paths.sort();
    Ok(paths)
}

/// Subdirectories of `data_dir`, in path order.
pub fn data_subdirectories(data_dir: &Path) -> PlateResult<Vec<PathBuf>> {
    Ok(sorted_entries(data_dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect())
}

/// Data files of one subdirectory, in path order.
pub fn data_files(
    dir: &Path,
    config: &AnalysisConfig,
) -> PlateResult<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| config.is_data_file(path))
        .collect())
}

/// Merges one directory, annotates it and writes the merged table.
fn prepare_directory(
    dir: &Path,
    config: &AnalysisConfig,
) -> PlateResult<(AnnotatedDataset, PathBuf)> {
    let files = data_files(dir, config)?;
    info!("Analysing {} ({} data files)", dir.display(), files.len());
    debug!("Data files: {:?}", files);

    let dataset = merge_files(&files)?;
    debug!("Observed columns: {}", dataset.columns().join(","));
    let annotated = annotate(dataset)?;

    let output = dir.join(&config.merged_name);
    write_merged(&output, &annotated)?;
    info!("Saved merged data to {}", output.display());
    Ok((annotated, output))
}

/// Resolves the run-wide ratio policy from the first paired directory.
fn resolve_policy<S: RoleSelector + ?Sized>(
    prepared: &[(DirectoryReport, Option<AnnotatedDataset>)],
    selector: &mut S,
) -> RatioPolicy {
    let first_paired = prepared
        .iter()
        .filter_map(|(_, dataset)| dataset.as_ref())
        .find(|dataset| matches!(dataset.shape(), MeasurementShape::Paired(..)));

    let Some(dataset) = first_paired else {
        return RatioPolicy::Skip;
    };
    let measurements = dataset
        .shape()
        .measurements()
        .into_iter()
        .map(str::to_string)
        .collect_vec();
    match selector.select(&measurements) {
        Ok(policy) => {
            info!("Ratio policy for this run: {:?}", policy);
            policy
        },
        Err(e) => {
            error!("Ratio roles were not chosen, ratios disabled: {}", e);
            RatioPolicy::Skip
        },
    }
}

fn ratio_stage(
    report: &mut DirectoryReport,
    dataset: &AnnotatedDataset,
    roles: &RatioRoles,
    config: &AnalysisConfig,
) {
    if !roles.fits(dataset.shape()) {
        let message = format!(
            "measurements {:?} do not contain ratio roles {} / {}",
            dataset.shape().measurements(),
            roles.numerator,
            roles.denominator
        );
        warn!("{}: {}, ratios skipped", report.directory.display(), message);
        report.failure = Some(message);
        return;
    }

    let result = compute_ratios(dataset, roles).and_then(|ratios| {
        let output = report.directory.join(&config.ratio_name);
        write_ratios(&output, &ratios)?;
        info!("Saved {} ratios to {}", ratios.len(), output.display());
        Ok(output)
    });
    match result {
        Ok(output) => report.ratios = Some(output),
        Err(e) => {
            error!("{}: {}", report.directory.display(), e);
            report.failure = Some(e.to_string());
        },
    }
}

/// Analyses every subdirectory of `data_dir`.
///
/// A failing subdirectory is logged and reported; it never stops the run.
pub fn analyse_data_dir<S: RoleSelector + ?Sized>(
    data_dir: &Path,
    config: &AnalysisConfig,
    selector: &mut S,
) -> PlateResult<Vec<DirectoryReport>> {
    let directories = data_subdirectories(data_dir)?;
    if directories.is_empty() {
        warn!("No subdirectories in {}", data_dir.display());
    }

    let mut prepared: Vec<(DirectoryReport, Option<AnnotatedDataset>)> =
        THREAD_POOL.install(|| {
            directories
                .par_iter()
                .map(|dir| {
                    let mut report = DirectoryReport::new(dir);
                    match prepare_directory(dir, config) {
                        Ok((dataset, merged)) => {
                            report.merged = Some(merged);
                            (report, Some(dataset))
                        },
                        Err(e) => {
                            error!("Skipping {}: {}", dir.display(), e);
                            report.failure = Some(e.to_string());
                            (report, None)
                        },
                    }
                })
                .collect()
        });

    let policy = resolve_policy(&prepared, selector);

    if let RatioPolicy::Compute(roles) = &policy {
        THREAD_POOL.install(|| {
            prepared.par_iter_mut().for_each(|(report, dataset)| {
                if let Some(dataset) = dataset {
                    if matches!(dataset.shape(), MeasurementShape::Paired(..)) {
                        ratio_stage(report, dataset, roles, config);
                    }
                }
            })
        });
    }

    Ok(prepared.into_iter().map(|(report, _)| report).collect())
}
