//! Core data models used throughout Sediment Harness.
//!
//! A [`Sample`] is one sanitized input row on its way into the store; a
//! [`Record`] is what comes back out of it.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::sanitize::{SAMPLE_ID, STUDY_CODE};

/// A persisted sample as returned to readers: column name to value (string
/// or null), in header order, without the store's identity field.
pub type Record = Map<String, Value>;

/// One sanitized row: every header column mapped to its sanitized value.
///
/// Column order is header order. A value of `None` means the raw field was
/// missing or failed its column's rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    fields: Vec<(String, Option<String>)>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. A name already present keeps its position.
    pub fn insert(&mut self, name: &str, value: Option<String>) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// `None` if the column is absent, `Some(None)` if it is present but null.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn study_code(&self) -> Option<&str> {
        self.get(STUDY_CODE).flatten()
    }

    pub fn sample_id(&self) -> Option<&str> {
        self.get(SAMPLE_ID).flatten()
    }

    /// The sample as the JSON object that gets persisted.
    pub fn to_record(&self) -> Record {
        self.fields
            .iter()
            .map(|(n, v)| {
                let value = v.clone().map(Value::String).unwrap_or(Value::Null);
                (n.clone(), value)
            })
            .collect()
    }
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for Sample {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: I) -> Self {
        let mut sample = Sample::new();
        for (name, value) in iter {
            sample.insert(name, value.map(str::to_string));
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_in_insertion_order_with_nulls() {
        let sample: Sample = [
            ("Study_Code", Some("s")),
            ("Sample_ID", Some("a")),
            ("Z", None),
            ("A", Some("1.5")),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(
            json,
            r#"{"Study_Code":"s","Sample_ID":"a","Z":null,"A":"1.5"}"#
        );
        assert_eq!(serde_json::to_value(&sample).unwrap(), Value::Object(sample.to_record()));
    }

    #[test]
    fn test_key_accessors() {
        let sample: Sample = [("Study_Code", None), ("Sample_ID", Some("a"))]
            .into_iter()
            .collect();
        assert_eq!(sample.study_code(), None);
        assert_eq!(sample.sample_id(), Some("a"));
        assert_eq!(sample.len(), 2);
    }
}
