mod common;

use std::fs;
use std::path::Path;

use assert_approx_eq::assert_approx_eq;
use itertools::Itertools;
use platexplorer::data_structs::REQUIRED_COLUMNS;
use platexplorer::prelude::*;
use rstest::*;

use crate::common::{mapping_grid, plate_block, read_table};

#[fixture]
fn two_block_export() -> String {
    let mut text = String::from("Plate reader export\nUser: lab\n\n");
    text.push_str(&plate_block("Meas A", |row, column| {
        format!("{}", row * 12 + column)
    }));
    text.push_str(&plate_block("Meas B", |_, column| format!("0.{}", column)));
    text.push_str("\nEnd of export\n");
    text
}

#[rstest]
fn adjacent_blocks_are_read_in_full(two_block_export: String) {
    let readings = PlateBlockReader::new(
        two_block_export.lines(),
        "export",
        &PlateParserConfig::default(),
    )
    .collect_vec();

    assert_eq!(readings.len(), 192);
    let counts = readings.iter().map(|r| r.measurement.as_str()).counts();
    assert_eq!(counts["Meas A"], 96);
    assert_eq!(counts["Meas B"], 96);

    assert_eq!(readings[0].well(), "A01");
    assert_eq!(readings[95].well(), "H12");
    assert_approx_eq!(readings[95].value, 96.0);
    assert_eq!(readings[96].measurement, "Meas B");
    assert_approx_eq!(readings[96 + 11].value, 0.12);
}

#[rstest]
#[case::crlf("\r\n")]
#[case::lf("\n")]
fn reads_windows_1250_exports(#[case] newline: &str) -> anyhow::Result<()> {
    let dir = common::tempdir()?;
    let path = dir.path().join("export.txt");

    // "Próba" with 0xF3 for 'ó' in Windows-1250.
    let mut bytes = b"Results for Pr\xF3ba - 01.01.2025".to_vec();
    bytes.extend_from_slice(newline.as_bytes());
    bytes.extend_from_slice(b",01,02,");
    bytes.extend_from_slice(newline.as_bytes());
    bytes.extend_from_slice(b"A,1,2,");
    bytes.extend_from_slice(newline.as_bytes());
    fs::write(&path, bytes)?;

    let readings = read_plate_file(&path, &PlateParserConfig::default())?;
    assert_eq!(readings.len(), 2);
    assert!(readings.iter().all(|r| r.measurement == "Próba"));
    assert_eq!(readings[1].well(), "A02");
    Ok(())
}

#[rstest]
fn generates_per_plate_file_for_assigned_wells(two_block_export: String) -> anyhow::Result<()> {
    let dir = common::tempdir()?;
    let input_dir = dir.path().join("input").join("run1");
    fs::create_dir_all(&input_dir)?;
    let input = input_dir.join("plate1.txt");
    fs::write(&input, &two_block_export)?;

    // Only the first two columns are assigned.
    let mapping = dir.path().join("mapping.csv");
    fs::write(
        &mapping,
        mapping_grid(|row, column| (column <= 2).then(|| format!("S{}", row + 1))),
    )?;

    let data_dir = dir.path().join("data");
    let output = generate_plate(
        &Assignment::new(&input, &mapping),
        &data_dir,
        &PlateParserConfig::default(),
    )?
    .expect("a data file is written");
    assert_eq!(output, data_dir.join("run1").join("plate1_data.csv"));

    let (header, rows) = read_table(&output);
    assert_eq!(header, REQUIRED_COLUMNS.to_vec());
    assert_eq!(rows.len(), 2 * 8 * 2);
    assert_eq!(rows[0][..6], ["S1", "plate1", "A", "1", "A01", "Meas A"]);
    assert_approx_eq!(rows[0][6].parse::<f64>()?, 1.0);
    assert!(rows.iter().all(|row| row[1] == "plate1"));
    assert!(rows.iter().all(|row| row[3] == "1" || row[3] == "2"));
    Ok(())
}

#[rstest]
fn missing_input_writes_nothing() -> anyhow::Result<()> {
    let dir = common::tempdir()?;
    let mapping = dir.path().join("mapping.csv");
    fs::write(&mapping, mapping_grid(|_, _| Some("S".to_string())))?;

    let output = generate_plate(
        &Assignment::new(Path::new("does/not/exist.txt"), &mapping),
        dir.path(),
        &PlateParserConfig::default(),
    )?;
    assert!(output.is_none());
    Ok(())
}

#[rstest]
fn assignment_list_drives_generation(two_block_export: String) -> anyhow::Result<()> {
    let dir = common::tempdir()?;
    let input = dir.path().join("plates").join("p1.txt");
    fs::create_dir_all(input.parent().unwrap())?;
    fs::write(&input, &two_block_export)?;
    let mapping = dir.path().join("map.csv");
    fs::write(&mapping, mapping_grid(|_, _| Some("S".to_string())))?;

    let list = dir.path().join("assignment.csv");
    fs::write(
        &list,
        format!(
            "input_file;mapping_file\n{};{}\nmissing.txt;{}\n",
            input.display(),
            mapping.display(),
            mapping.display()
        ),
    )?;

    let assignments = load_assignments(&list)?;
    assert_eq!(assignments.len(), 2);

    let data_dir = dir.path().join("data");
    let outputs = generate_all(&assignments, &data_dir, &PlateParserConfig::default());
    assert_eq!(outputs, vec![data_dir.join("plates").join("p1_data.csv")]);
    assert_eq!(read_table(&outputs[0]).1.len(), 192);
    Ok(())
}
