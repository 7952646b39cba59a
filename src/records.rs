//! Loading JSON documents into records, with per-field coercions.
//!
//! A `RecordLoader` maps field names to coercion functions. Fields without a
//! coercion pass through as decoded JSON. The dated datasets use
//! `RecordLoader::dated`, which turns `"date"` into second resolution
//! timestamps, the vortex datasets use `RecordLoader::passthrough`.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// A field after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Json(Value),
    Timestamps(Vec<NaiveDateTime>),
}

/// Turns the decoded value of one field into its final form.
/// Gets the field name for error reporting.
pub type Coercion = fn(&str, Value) -> Result<Field>;

/// A decoded JSON object keyed by field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// The field, if it was passed through as JSON.
    pub fn json(&self, key: &str) -> Option<&Value> {
        match self.fields.get(key) {
            Some(Field::Json(v)) => Some(v),
            _ => None,
        }
    }

    /// The field, if it was coerced to timestamps.
    pub fn timestamps(&self, key: &str) -> Option<&[NaiveDateTime]> {
        match self.fields.get(key) {
            Some(Field::Timestamps(t)) => Some(t),
            _ => None,
        }
    }

    /// Deserialize a pass-through field into a concrete type.
    pub fn deserialize_field<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .json(key)
            .ok_or_else(|| Error::MissingField(key.to_string()))?;
        Ok(T::deserialize(value)?)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> BTreeMap<String, Field> {
        self.fields
    }
}

/// Reads JSON objects and applies the configured coercions.
#[derive(Clone, Default)]
pub struct RecordLoader {
    coercions: BTreeMap<String, Coercion>,
}

impl std::fmt::Debug for RecordLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordLoader")
            .field("coerced", &self.coercions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RecordLoader {
    /// No coercions, every field passes through.
    pub fn new() -> Self {
        RecordLoader::default()
    }

    pub fn passthrough() -> Self {
        RecordLoader::new()
    }

    /// `"date"` becomes a sequence of second resolution timestamps.
    pub fn dated() -> Self {
        RecordLoader::new().with_coercion("date", coerce_timestamps)
    }

    pub fn with_coercion(mut self, field: &str, coercion: Coercion) -> Self {
        self.coercions.insert(field.to_string(), coercion);
        self
    }

    pub fn load<P: AsRef<std::path::Path>>(&self, path: &P) -> Result<Record> {
        log::debug!("Loading records from {:?}", path.as_ref());
        let file = std::fs::File::open(path)
            .map_err(|e| Error::file(path.as_ref(), e))?;
        self.load_reader(std::io::BufReader::new(file))
    }

    pub fn load_reader<R: std::io::Read>(&self, reader: R) -> Result<Record> {
        let value: Value = serde_json::from_reader(reader)?;
        self.load_value(value)
    }

    pub fn load_str(&self, text: &str) -> Result<Record> {
        let value: Value = serde_json::from_str(text)?;
        self.load_value(value)
    }

    pub fn load_value(&self, value: Value) -> Result<Record> {
        let Value::Object(object) = value else {
            return Err(Error::NotAnObject);
        };
        let mut fields: BTreeMap<String, Field> = object
            .into_iter()
            .map(|(k, v)| (k, Field::Json(v)))
            .collect();
        for (name, coercion) in &self.coercions {
            let Some(Field::Json(raw)) = fields.remove(name) else {
                return Err(Error::MissingField(name.clone()));
            };
            fields.insert(name.clone(), coercion(name, raw)?);
        }
        Ok(Record { fields })
    }
}

/// Open a dated dataset, `"date"` is required and becomes timestamps.
pub fn load_dated_records<P: AsRef<std::path::Path>>(path: &P) -> Result<Record> {
    RecordLoader::dated().load(path)
}

/// Open a vortex dataset as is.
pub fn load_vortex_data<P: AsRef<std::path::Path>>(path: &P) -> Result<Record> {
    RecordLoader::passthrough().load(path)
}

/// Coerce an array of date strings or epoch seconds into timestamps,
/// truncated to whole seconds.
pub fn coerce_timestamps(field: &str, value: Value) -> Result<Field> {
    let Value::Array(entries) = value else {
        return Err(Error::NotASequence {
            field: field.to_string(),
        });
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_timestamp(entry).ok_or_else(|| Error::Timestamp {
                field: field.to_string(),
                index,
                value: entry.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Field::Timestamps)
}

fn parse_timestamp(entry: &Value) -> Option<NaiveDateTime> {
    match entry {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let seconds = n.as_i64()?;
            DateTime::from_timestamp(seconds, 0).map(|t| t.naive_utc())
        }
        _ => None,
    }
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// ISO 8601 like text: a date, a year-month or a bare year, optionally
/// followed by a time of day and a `Z` or numeric offset.
fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return t.naive_utc().with_nanosecond(0);
    }
    if let Some(t) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return t.with_nanosecond(0);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    // year-month and bare year start at the first day
    let parts: Vec<&str> = s.split('-').collect();
    let date = match parts.as_slice() {
        [year, month] if year.len() == 4 && month.len() == 2 => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        [year] if year.len() == 4 => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        _ => None,
    }?;
    date.and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn dated_record() {
        let record = RecordLoader::dated()
            .load_str(r#"{"date": ["2020-01-01T00:00:00"], "x": 1}"#)
            .unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(
            record.timestamps("date").unwrap(),
            &[ts("2020-01-01T00:00:00")]
        );
        let x = record.json("x").unwrap();
        assert!(x.is_i64());
        assert_eq!(x.as_i64(), Some(1));
    }

    #[test]
    fn timestamp_forms() {
        let cases = [
            ("2020-03-04T05:06:07", "2020-03-04T05:06:07"),
            ("2020-03-04 05:06:07", "2020-03-04T05:06:07"),
            ("2020-03-04T05:06:07.999", "2020-03-04T05:06:07"),
            ("2020-03-04T05:06", "2020-03-04T05:06:00"),
            ("2020-03-04", "2020-03-04T00:00:00"),
            ("2020-03", "2020-03-01T00:00:00"),
            ("2020", "2020-01-01T00:00:00"),
            ("2020-03-04T05:06:07Z", "2020-03-04T05:06:07"),
            ("2020-03-04T05:06:07+02:00", "2020-03-04T03:06:07"),
        ];
        for (text, expected) in cases {
            assert_eq!(
                parse_timestamp(&Value::String(text.to_string())),
                Some(ts(expected)),
                "{text}"
            );
        }
        assert_eq!(
            parse_timestamp(&serde_json::json!(86400)),
            Some(ts("1970-01-02T00:00:00"))
        );
        assert_eq!(parse_timestamp(&serde_json::json!("yesterday")), None);
        assert_eq!(parse_timestamp(&Value::Null), None);
        assert_eq!(parse_timestamp(&serde_json::json!(1.5)), None);
    }

    #[test]
    fn failures() {
        let loader = RecordLoader::dated();
        assert!(matches!(loader.load_str("not json"), Err(Error::Json(_))));
        assert!(matches!(
            loader.load_str(r#"{"x": 1}"#),
            Err(Error::MissingField(f)) if f == "date"
        ));
        assert!(matches!(
            loader.load_str(r#"[1, 2]"#),
            Err(Error::NotAnObject)
        ));
        assert!(matches!(
            loader.load_str(r#"{"date": "2020-01-01"}"#),
            Err(Error::NotASequence { .. })
        ));
        assert!(matches!(
            loader.load_str(r#"{"date": ["2020-01-01", "soon"]}"#),
            Err(Error::Timestamp { index: 1, .. })
        ));
    }

    #[test]
    fn passthrough_and_custom() {
        let text = r#"{"date": ["2020-01-01"], "u": [[1.0, 2.0], [3.0, 4.0]]}"#;
        let record = RecordLoader::passthrough().load_str(text).unwrap();
        assert!(record.timestamps("date").is_none());
        assert!(record.json("date").unwrap().is_array());
        let u: Vec<Vec<f64>> = record.deserialize_field("u").unwrap();
        assert_eq!(u, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(matches!(
            record.deserialize_field::<Vec<f64>>("v"),
            Err(Error::MissingField(_))
        ));

        fn doubled(_: &str, value: Value) -> Result<Field> {
            let v = value.as_f64().unwrap_or_default();
            Ok(Field::Json(serde_json::json!(2.0 * v)))
        }
        let record = RecordLoader::new()
            .with_coercion("scale", doubled)
            .load_str(r#"{"scale": 1.5}"#)
            .unwrap();
        assert_eq!(record.json("scale").unwrap().as_f64(), Some(3.0));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["scale"]);
    }
}
