//! CSV file ingestion.
//!
//! Reads a comma-delimited file whose first record is the header and turns
//! every following record into a sanitized [`Sample`]. Column names are
//! taken verbatim from the header.
//!
//! Short rows are padded with absent values, which sanitize to null. Fields
//! beyond the last header column are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SedimentError;
use crate::models::Sample;
use crate::sanitize::sanitize_row;

/// Checks that `path` names an existing, readable regular file and opens
/// it. Returns the absolute path alongside the open file.
pub fn open_input(path: &Path) -> Result<(PathBuf, File), SedimentError> {
    if !path.exists() {
        return Err(SedimentError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SedimentError::InputNotAFile(path.to_path_buf()));
    }
    let unreadable = |source| SedimentError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;
    let absolute = path.canonicalize().map_err(unreadable)?;
    Ok((absolute, file))
}

/// Parses and sanitizes the CSV file at `path`.
pub fn parse_csv_file(path: &Path) -> Result<Vec<Sample>, SedimentError> {
    let (_, file) = open_input(path)?;
    parse_csv_reader(file)
}

/// Parses and sanitizes CSV text from any reader. One sample per data
/// record, in source order.
pub fn parse_csv_reader<R: Read>(reader: R) -> Result<Vec<Sample>, SedimentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut samples = Vec::new();

    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            debug!(
                row = index + 1,
                extra = record.len() - headers.len(),
                "ignoring fields beyond the header"
            );
        }

        let row = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name, record.get(i)));
        samples.push(sanitize_row(row));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Sample> {
        parse_csv_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_short_row_pads_with_nulls() {
        let samples = parse("Study_Code,Sample_ID,C,D\nx,y\n");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].len(), 4);
        assert_eq!(samples[0].get("C"), Some(None));
        assert_eq!(samples[0].get("D"), Some(None));
    }

    #[test]
    fn test_long_row_ignores_extras() {
        let samples = parse("Study_Code,Sample_ID,C\nx,y,1,2,3\n");
        let names: Vec<&str> = samples[0].names().collect();
        assert_eq!(names, vec!["Study_Code", "Sample_ID", "C"]);
        assert_eq!(samples[0].get("C"), Some(Some("1")));
    }

    #[test]
    fn test_quoted_fields() {
        let samples = parse("Study_Code,Sample_ID,C\n\"a,b\",\" s \",\" 2.5 \"\n");
        assert_eq!(samples[0].study_code(), Some("a,b"));
        assert_eq!(samples[0].sample_id(), Some("s"));
        assert_eq!(samples[0].get("C"), Some(Some("2.5")));
    }

    #[test]
    fn test_header_only_yields_no_samples() {
        assert!(parse("Study_Code,Sample_ID,C\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_missing_path_is_reported() {
        let err = open_input(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SedimentError::InputNotFound(_)));
    }

    #[test]
    fn test_directory_path_is_reported() {
        let dir = std::env::temp_dir();
        let err = open_input(&dir).unwrap_err();
        assert!(matches!(err, SedimentError::InputNotAFile(_)));
    }

    #[test]
    fn test_open_input_returns_absolute_path_and_readable_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("in.csv"), "Study_Code,Sample_ID,C\ns,a,1\n").unwrap();

        let relative = tmp.path().join(".").join("in.csv");
        let (absolute, file) = open_input(&relative).unwrap();
        assert!(absolute.is_absolute());
        assert_eq!(absolute.file_name().unwrap(), "in.csv");
        assert!(!absolute.components().any(|c| c == std::path::Component::CurDir));

        let samples = parse_csv_reader(file).unwrap();
        assert_eq!(samples.len(), 1);
    }
}
