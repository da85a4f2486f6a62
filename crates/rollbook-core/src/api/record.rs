//! Loosely-typed records as the DBI hands them out.
//!
//! The backend mixes strings, numbers and nulls freely for the same field,
//! so a `RawRecord` flattens every scalar into optional text and leaves the
//! actual coercion to the people normalizer.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawRecord {
    fields: HashMap<String, Option<String>>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly handy for fixtures
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), Some(value.into()));
        self
    }

    pub fn insert(&mut self, field: &str, value: Option<String>) {
        self.fields.insert(field.to_string(), value);
    }

    /// Raw text of a field; `None` both when the field is missing and when it is null
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Flatten a JSON scalar into text. Nested values carry nothing we coerce.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(key, value)| (key, scalar_text(value)))
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), Some(v.into())))
            .collect();
        Self { fields }
    }
}

/// A DBI table: string ids mapped to records, in the order the backend sent them.
///
/// Keys are kept verbatim (blank keys included) so that the directory can
/// decide what to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RecordList {
    entries: Vec<(String, RawRecord)>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, record: RawRecord) {
        self.entries.push((key.into(), record));
    }

    /// First record stored under `key`
    pub fn get(&self, key: &str) -> Option<&RawRecord> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawRecord)> + '_ {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for RecordList {
    fn from(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, value)| {
                let record = match value {
                    Value::Object(fields) => RawRecord::from(fields),
                    _ => RawRecord::default(),
                };
                (key, record)
            })
            .collect();
        Self { entries }
    }
}

impl<K: Into<String>> FromIterator<(K, RawRecord)> for RecordList {
    fn from_iter<I: IntoIterator<Item = (K, RawRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_flattens_scalars() {
        let json = r#"{
            "classid": 5, "gender": "F", "isout": false, "numberinclass": null, "parents": [1, 2]
        }"#;
        let record: RawRecord = serde_json::from_str(json).expect("valid record json");

        assert_eq!(record.get("classid"), Some("5"));
        assert_eq!(record.get("gender"), Some("F"));
        assert_eq!(record.get("isout"), Some("false"));
        assert_eq!(record.get("numberinclass"), None);
        assert!(record.contains("numberinclass"));
        assert_eq!(record.get("parents"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_record_list_keeps_backend_order() {
        let json = r#"{"30": {"gender": "M"}, "4": {"gender": "F"}, "": {}, "17": {}}"#;
        let list: RecordList = serde_json::from_str(json).expect("valid list json");

        let keys: Vec<&str> = list.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["30", "4", "", "17"]);
        assert_eq!(list.get("4").and_then(|r| r.get("gender")), Some("F"));
    }

    #[test]
    fn test_record_list_non_object_entry_is_empty_record() {
        let json = r#"{"1": "garbage", "2": {"gender": "M"}}"#;
        let list: RecordList = serde_json::from_str(json).expect("valid list json");

        assert_eq!(list.len(), 2);
        assert!(list.get("1").map(|r| r.is_empty()).unwrap_or(false));
    }
}
