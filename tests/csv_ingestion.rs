//! CSV parsing and sanitization against files on disk.

use std::fs;
use std::path::PathBuf;

use sediment_harness::error::SedimentError;
use sediment_harness::models::Sample;
use sediment_harness::parse::parse_csv_file;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("input.csv");
    fs::write(&path, content).unwrap();
    path
}

fn expected(pairs: &[(&'static str, Option<&'static str>)]) -> Sample {
    pairs.iter().copied().collect()
}

#[test]
fn test_preserves_column_names_verbatim() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "AAA, 12-3 4. ,ccc\n1,2,3\n");

    let samples = parse_csv_file(&path).unwrap();
    assert_eq!(
        samples[0],
        expected(&[("AAA", Some("1")), (" 12-3 4. ", Some("2")), ("ccc", Some("3"))])
    );
}

#[test]
fn test_trims_metadata_values_without_validating() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "Study_Code,Sample_ID,C\naaa, 12-3 4. ,3\n");

    let samples = parse_csv_file(&path).unwrap();
    assert_eq!(
        samples[0],
        expected(&[
            ("Study_Code", Some("aaa")),
            ("Sample_ID", Some("12-3 4.")),
            ("C", Some("3")),
        ])
    );
}

#[test]
fn test_nullifies_invalid_data_values() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(
        &tmp,
        "Study_Code,Sample_ID,C,D,E,F,G,H,I,J\nx,y,0,0.1,1,1.,1e2,z,-0.1,-9999\n",
    );

    let samples = parse_csv_file(&path).unwrap();
    assert_eq!(
        samples[0],
        expected(&[
            ("Study_Code", Some("x")),
            ("Sample_ID", Some("y")),
            ("C", Some("0")),
            ("D", Some("0.1")),
            ("E", Some("1")),
            ("F", Some("1.")),
            ("G", None), // raw value: "1e2"
            ("H", None), // raw value: "z"
            ("I", None), // raw value: "-0.1"
            ("J", None), // raw value: "-9999"
        ])
    );
}

#[test]
fn test_parses_data_rows_into_samples() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(
        &tmp,
        "Study_Code,Sample_ID,Percent_Fine_Sand,Percent_Med_Sand,Percent_Coarse_Sand,Percent_Tot_Sand,Percent_Clay,Percent_Silt\n\
         WHONDRS_S19S,S19S_0001_BULK-D,21.1,69.7,0.1,90.9,0,9.1\n\
         WHONDRS_S19S,S19S_0001_BULK-M,65.3,26,0.6,91.9,6.9,1.2\n\
         WHONDRS_S19S,S19S_0001_BULK-U,20.4,68.6,2.1,91.1,8.9,0",
    );

    let samples = parse_csv_file(&path).unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(
        samples[1],
        expected(&[
            ("Study_Code", Some("WHONDRS_S19S")),
            ("Sample_ID", Some("S19S_0001_BULK-M")),
            ("Percent_Fine_Sand", Some("65.3")),
            ("Percent_Med_Sand", Some("26")),
            ("Percent_Coarse_Sand", Some("0.6")),
            ("Percent_Tot_Sand", Some("91.9")),
            ("Percent_Clay", Some("6.9")),
            ("Percent_Silt", Some("1.2")),
        ])
    );
    assert_eq!(samples[2].get("Percent_Silt"), Some(Some("0")));
}

#[test]
fn test_every_row_has_every_header_column() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "Study_Code,Sample_ID,C,D\ns,a,1,2\ns,b\ns,c,3,4,5,6\n,,,\n");

    let samples = parse_csv_file(&path).unwrap();
    assert_eq!(samples.len(), 4);
    for sample in &samples {
        let names: Vec<&str> = sample.names().collect();
        assert_eq!(names, vec!["Study_Code", "Sample_ID", "C", "D"]);
    }
    assert_eq!(samples[1].get("C"), Some(None));
    assert_eq!(samples[3].study_code(), Some(""));
    assert_eq!(samples[3].get("C"), Some(None));
}

#[test]
fn test_missing_file_is_an_input_error() {
    let tmp = TempDir::new().unwrap();
    let err = parse_csv_file(&tmp.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, SedimentError::InputNotFound(_)));
}
