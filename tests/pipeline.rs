mod common;

use std::fs;
use std::path::Path;

use assert_approx_eq::assert_approx_eq;
use platexplorer::data_structs::REQUIRED_COLUMNS;
use platexplorer::prelude::*;
use rstest::*;

use crate::common::{mapping_grid, plate_block, read_table, write_data_file};

fn gfp_over_od() -> RatioPolicy {
    RatioPolicy::Compute(RatioRoles::new("GFP", "OD"))
}

/// Two plates of paired readings: A01 gives 2.0 / 0.5, A02 has a zero
/// denominator and A03 lacks a denominator.
fn write_paired_dir(dir: &Path) {
    write_data_file(dir, "p1_data.csv", &[
        ("S1", "p1", "A", 1, "GFP", "2.0"),
        ("S1", "p1", "A", 1, "OD", "0.5"),
        ("S1", "p1", "A", 2, "GFP", "1.0"),
        ("S1", "p1", "A", 2, "OD", "0"),
        ("S1", "p1", "A", 3, "GFP", "3.0"),
    ]);
    write_data_file(dir, "p2_data.csv", &[
        ("S2", "p2", "B", 1, "GFP", "3.0"),
        ("S2", "p2", "B", 1, "OD", "1.5"),
        ("S2", "p2", "B", 2, "GFP", "1.0"),
        ("S2", "p2", "B", 2, "OD", "1.0"),
    ]);
}

/// Counts how often the roles were asked for.
struct CountingSelector {
    calls:  usize,
    seen:   Vec<String>,
    policy: RatioPolicy,
}

impl CountingSelector {
    fn new(policy: RatioPolicy) -> Self {
        Self {
            calls: 0,
            seen: Vec::new(),
            policy,
        }
    }
}

impl RoleSelector for CountingSelector {
    fn select(
        &mut self,
        measurements: &[String],
    ) -> PlateResult<RatioPolicy> {
        self.calls += 1;
        self.seen = measurements.to_vec();
        Ok(self.policy.clone())
    }
}

#[rstest]
fn schema_invalid_file_is_excluded() -> anyhow::Result<()> {
    let data = common::tempdir()?;
    let dir = data.path().join("exp1");
    write_data_file(&dir, "a_data.csv", &[
        ("S1", "a", "A", 1, "OD", "1.0"),
        ("S1", "a", "A", 2, "OD", "3.0"),
        ("S1", "a", "A", 3, "OD", "n/a"),
    ]);
    fs::write(
        dir.join("b_data.csv"),
        "Sample,Plate,Row,Column,Measurement,Value\nS1,b,A,1,OD,100\n",
    )?;

    let reports = analyse_data_dir(
        data.path(),
        &AnalysisConfig::default(),
        &mut FixedRoles(RatioPolicy::Skip),
    )?;
    assert_eq!(reports.len(), 1);
    let merged = reports[0].merged.clone().expect("merged table is written");
    assert_eq!(merged, dir.join("data_merged.csv"));
    assert!(reports[0].failure.is_none());

    let (header, rows) = read_table(&merged);
    let expected = REQUIRED_COLUMNS
        .iter()
        .chain(["Mean", "Std"].iter())
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    assert_eq!(header, expected);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row[1] == "a"));
    assert_eq!(rows[0][7], "2.0000");
    assert_eq!(rows[0][8], "1.4142");
    Ok(())
}

#[rstest]
fn extra_columns_are_carried_through() -> anyhow::Result<()> {
    let data = common::tempdir()?;
    let dir = data.path().join("exp1");
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("a_data.csv"),
        "Sample,Plate,Row,Column,Well,Measurement,Value,Operator\n\
         S1,a,A,1,A01,OD,1.0,kim\n",
    )?;

    analyse_data_dir(
        data.path(),
        &AnalysisConfig::default(),
        &mut FixedRoles(RatioPolicy::Skip),
    )?;
    let (header, rows) = read_table(&dir.join("data_merged.csv"));
    assert_eq!(header[7], "Operator");
    assert_eq!(rows[0][7], "kim");
    assert_eq!(rows[0][9], "0.0000");
    Ok(())
}

#[rstest]
fn ratios_pair_readings_of_the_same_well() -> anyhow::Result<()> {
    let data = common::tempdir()?;
    let dir = data.path().join("exp1");
    write_paired_dir(&dir);

    let reports = analyse_data_dir(
        data.path(),
        &AnalysisConfig::default(),
        &mut FixedRoles(gfp_over_od()),
    )?;
    let ratios = reports[0].ratios.clone().expect("ratio table is written");

    let (header, rows) = read_table(&ratios);
    assert_eq!(header[0], "Sample");
    assert_eq!(header[1], "Nominator_Plate");
    assert_eq!(header[10], "Ratio");
    assert_eq!(rows.len(), 3);

    let s1 = rows.iter().filter(|row| row[0] == "S1").collect::<Vec<_>>();
    assert_eq!(s1.len(), 1);
    assert_eq!(s1[0][2], "A01");
    assert_eq!(s1[0][10], "4.0000");
    assert_eq!(s1[0][11], "4.0000");
    assert_eq!(s1[0][12], "0.0000");

    let s2 = rows.iter().filter(|row| row[0] == "S2").collect::<Vec<_>>();
    assert_eq!(s2.len(), 2);
    assert_eq!(s2[0][11], "1.5000");
    assert_approx_eq!(s2[0][12].parse::<f64>()?, 0.7071, 1e-4);
    Ok(())
}

#[rstest]
fn three_measurements_produce_no_merged_table() -> anyhow::Result<()> {
    let data = common::tempdir()?;
    let dir = data.path().join("exp1");
    write_data_file(&dir, "a_data.csv", &[
        ("S1", "a", "A", 1, "OD", "1.0"),
        ("S1", "a", "A", 1, "GFP", "1.0"),
        ("S1", "a", "A", 1, "RFP", "1.0"),
    ]);

    let reports = analyse_data_dir(
        data.path(),
        &AnalysisConfig::default(),
        &mut FixedRoles(gfp_over_od()),
    )?;
    assert!(reports[0].merged.is_none());
    assert!(reports[0].failure.is_some());
    assert!(!dir.join("data_merged.csv").exists());
    assert!(!dir.join("ratios.csv").exists());
    Ok(())
}

#[rstest]
fn roles_are_chosen_once_per_run() -> anyhow::Result<()> {
    let data = common::tempdir()?;
    write_paired_dir(&data.path().join("exp1"));
    write_paired_dir(&data.path().join("exp2"));
    write_data_file(&data.path().join("exp3"), "a_data.csv", &[
        ("S1", "a", "A", 1, "Luc", "1.0"),
        ("S1", "a", "A", 1, "RFP", "1.0"),
    ]);
    write_data_file(&data.path().join("exp4"), "a_data.csv", &[
        ("S1", "a", "A", 1, "OD", "1.0"),
    ]);

    let mut selector = CountingSelector::new(gfp_over_od());
    let reports = analyse_data_dir(data.path(), &AnalysisConfig::default(), &mut selector)?;

    assert_eq!(selector.calls, 1);
    assert_eq!(selector.seen, vec!["GFP".to_string(), "OD".to_string()]);
    assert_eq!(reports.len(), 4);
    assert!(reports[0].ratios.is_some());
    assert!(reports[1].ratios.is_some());

    // Merged, but the cached roles do not apply.
    assert!(reports[2].merged.is_some());
    assert!(reports[2].ratios.is_none());
    assert!(reports[2].failure.is_some());

    assert!(reports[3].merged.is_some());
    assert!(reports[3].ratios.is_none());
    assert!(reports[3].failure.is_none());
    Ok(())
}

#[rstest]
fn declined_ratios_write_only_merged_tables() -> anyhow::Result<()> {
    let data = common::tempdir()?;
    write_paired_dir(&data.path().join("exp1"));

    let mut selector = CountingSelector::new(RatioPolicy::Skip);
    let reports = analyse_data_dir(data.path(), &AnalysisConfig::default(), &mut selector)?;
    assert_eq!(selector.calls, 1);
    assert!(reports[0].merged.is_some());
    assert!(reports[0].ratios.is_none());
    assert!(!data.path().join("exp1").join("ratios.csv").exists());
    Ok(())
}

#[rstest]
#[case::default_pattern("*_data.csv")]
#[case::any_csv("*.csv")]
fn reruns_are_byte_identical(#[case] pattern: &str) -> anyhow::Result<()> {
    let data = common::tempdir()?;
    let dir = data.path().join("exp1");
    write_paired_dir(&dir);
    let config = AnalysisConfig::default().with_pattern(pattern)?;

    analyse_data_dir(data.path(), &config, &mut FixedRoles(gfp_over_od()))?;
    let merged = fs::read(dir.join("data_merged.csv"))?;
    let ratios = fs::read(dir.join("ratios.csv"))?;

    analyse_data_dir(data.path(), &config, &mut FixedRoles(gfp_over_od()))?;
    assert_eq!(fs::read(dir.join("data_merged.csv"))?, merged);
    assert_eq!(fs::read(dir.join("ratios.csv"))?, ratios);
    Ok(())
}

#[rstest]
fn invalid_pattern_is_a_config_error() {
    let result = AnalysisConfig::default().with_pattern("[unclosed");
    assert!(matches!(result, Err(PlateError::Config(_))));
}

#[rstest]
fn generated_plates_feed_the_analysis() -> anyhow::Result<()> {
    let root = common::tempdir()?;
    let input_dir = root.path().join("input").join("run1");
    fs::create_dir_all(&input_dir)?;

    let mut export = plate_block("GFP", |_, column| format!("{}", column * 2));
    export.push_str(&plate_block("OD", |_, column| format!("{}", column)));
    fs::write(input_dir.join("plate1.txt"), &export)?;
    fs::write(input_dir.join("plate2.txt"), &export)?;

    let mapping = root.path().join("mapping.csv");
    fs::write(
        &mapping,
        mapping_grid(|row, _| (row < 2).then(|| format!("S{}", row + 1))),
    )?;

    let data_dir = root.path().join("data");
    let assignments = [
        Assignment::new(input_dir.join("plate1.txt"), &mapping),
        Assignment::new(input_dir.join("plate2.txt"), &mapping),
    ];
    let outputs = generate_all(&assignments, &data_dir, &PlateParserConfig::default());
    assert_eq!(outputs.len(), 2);

    let reports = analyse_data_dir(
        &data_dir,
        &AnalysisConfig::default(),
        &mut FixedRoles(gfp_over_od()),
    )?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].directory, data_dir.join("run1"));

    // Two plates, two assigned rows, twelve columns, two measurements.
    let (_, merged) = read_table(&data_dir.join("run1").join("data_merged.csv"));
    assert_eq!(merged.len(), 2 * 2 * 12 * 2);

    let (_, ratios) = read_table(&data_dir.join("run1").join("ratios.csv"));
    assert_eq!(ratios.len(), 2 * 2 * 12);
    assert!(ratios.iter().all(|row| row[10] == "2.0000"));
    assert!(ratios.iter().all(|row| row[12] == "0.0000"));
    Ok(())
}
