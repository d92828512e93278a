//! Value and row sanitization.
//!
//! Every raw field read from an input row is classified by its column name
//! into a [`ColumnRole`] and cleaned by the matching rule:
//!
//! | Role | Rule |
//! |------|------|
//! | [`ColumnRole::Metadata`] | trim surrounding whitespace, accept anything |
//! | [`ColumnRole::Measurement`] | trim, then accept only non-negative decimal literals |
//!
//! Sanitization never fails. A value that does not pass its rule becomes
//! `None`, which is stored as a null.

use crate::models::Sample;

/// Column holding the study identifier.
pub const STUDY_CODE: &str = "Study_Code";

/// Column holding the sample identifier.
pub const SAMPLE_ID: &str = "Sample_ID";

/// Columns whose values are identifying strings rather than measurements.
pub const METADATA_COLUMN_NAMES: [&str; 2] = [STUDY_CODE, SAMPLE_ID];

/// How a column's values are sanitized, decided purely by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Metadata,
    Measurement,
}

impl ColumnRole {
    pub fn of(column_name: &str) -> Self {
        if METADATA_COLUMN_NAMES.contains(&column_name) {
            ColumnRole::Metadata
        } else {
            ColumnRole::Measurement
        }
    }

    /// Applies this role's rule to one raw value.
    pub fn sanitize(self, raw: Option<&str>) -> Option<String> {
        match self {
            ColumnRole::Metadata => sanitize_metadata_value(raw),
            ColumnRole::Measurement => sanitize_data_value(raw),
        }
    }
}

/// Trims a metadata value. Content is not validated; an empty string stays
/// an empty string.
pub fn sanitize_metadata_value(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_string())
}

/// Trims a measurement value and keeps it only if it is a non-negative
/// decimal literal. The accepted text is returned exactly as written
/// (`"00.00"` stays `"00.00"`).
pub fn sanitize_data_value(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if is_non_negative_decimal(trimmed) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Matches `digits '.' digits*`, `'.' digits+` or `digits+`, ASCII digits
/// only. Signs, exponents, separators and a lone `.` are rejected.
pub fn is_non_negative_decimal(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) {
        return false;
    }

    match frac_part {
        // "12"
        None => !int_part.is_empty(),
        // "12.", "12.5", ".5" -- but never "." on its own
        Some(frac) => all_digits(frac) && !(int_part.is_empty() && frac.is_empty()),
    }
}

/// Sanitizes one input row, preserving column order.
///
/// Each `(name, raw)` pair is cleaned independently according to
/// [`ColumnRole::of`]. A repeated column name keeps its first position and
/// takes the last value.
pub fn sanitize_row<'a, I>(row: I) -> Sample
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut sample = Sample::new();
    for (name, raw) in row {
        sample.insert(name, ColumnRole::of(name).sanitize(raw));
    }
    sample
}
