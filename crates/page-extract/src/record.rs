//! Extracted data as a small tagged tree.
//!
//! Keys keep insertion order so printed output follows extraction order.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::ExtractError;

/// A scalar, a list, or a nested mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<Value>),
    Map(Record),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn texts<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::Text(s.into())).collect())
    }

    /// Lines printed when this value is selected on the command line.
    ///
    /// A scalar prints bare, a list prints one item per line, a mapping prints as indented JSON.
    pub fn selection_lines(&self) -> serde_json::Result<Vec<String>> {
        match self {
            Value::Text(s) => Ok(vec![s.clone()]),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Text(s) => Ok(s.clone()),
                    other => serde_json::to_string(other),
                })
                .collect(),
            Value::Map(_) => Ok(vec![serde_json::to_string_pretty(self)?]),
        }
    }
}

/// Ordered string-keyed mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`; a new key goes last.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve a dot-separated path such as `images.gif`. Only mappings are descended into.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut keys = path.split('.');
        let first = self.get(keys.next()?)?;
        keys.try_fold(first, |value, key| match value {
            Value::Map(map) => map.get(key),
            Value::Text(_) | Value::List(_) => None,
        })
    }

    /// Like [`Record::lookup`], but reports the available top-level keys on failure.
    pub fn select(&self, path: &str) -> Result<&Value, ExtractError> {
        self.lookup(path).ok_or_else(|| ExtractError::FieldNotFound {
            field: path.to_string(),
            available: self.keys().map(str::to_string).collect(),
        })
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
