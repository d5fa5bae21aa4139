//! Rows and the `Record` abstraction the engine works over.
//!
//! The engine never looks inside a row except through [`Record::value`].
//! Dynamic rows loaded from JSON use string field names; typed records
//! (structs with a field enum) get compile-time checking of column ids.

use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use serde::Serialize;

use super::value::Value;

/// Anything that can be shown as one table row.
pub trait Record {
    /// Field identifier. `String` for dynamic rows, an enum for typed ones.
    type Field: Clone + Eq + Ord + Debug;

    /// Value of `field`, or `None` when the row lacks it.
    fn value(&self, field: &Self::Field) -> Option<Value>;

    /// Stable identity of the row, when it has one.
    fn id(&self) -> Option<String> {
        None
    }
}

/// Identity of a row: its `id`, or its position in the source collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

impl RowKey {
    /// Key of `record` sitting at `index` in the source collection.
    pub fn of<R: Record>(record: &R, index: usize) -> Self {
        match record.id() {
            Some(id) => RowKey::Id(id),
            None => RowKey::Index(index),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => f.write_str(id),
            RowKey::Index(i) => write!(f, "#{}", i),
        }
    }
}

/// A dynamically shaped row: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Borrow a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for Row {
    type Field = String;

    fn value(&self, field: &String) -> Option<Value> {
        self.fields.get(field).cloned()
    }

    fn id(&self) -> Option<String> {
        match self.fields.get("id") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.to_string()),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Row {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Row {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_prefers_id() {
        let row = Row::new().with("id", 7).with("name", "Ada");
        assert_eq!(RowKey::of(&row, 3), RowKey::Id("7".to_string()));
    }

    #[test]
    fn test_row_key_falls_back_to_index() {
        let row = Row::new().with("name", "Ada");
        assert_eq!(RowKey::of(&row, 3), RowKey::Index(3));

        let null_id = Row::new().with("id", Value::Null);
        assert_eq!(RowKey::of(&null_id, 0), RowKey::Index(0));
    }

    #[test]
    fn test_missing_field_is_none() {
        let row = Row::new().with("name", "Ada");
        assert_eq!(row.value(&"email".to_string()), None);
        assert_eq!(row.value(&"name".to_string()), Some(Value::from("Ada")));
    }

    #[test]
    fn test_row_key_display() {
        assert_eq!(RowKey::Id("abc".into()).to_string(), "abc");
        assert_eq!(RowKey::Index(4).to_string(), "#4");
    }
}
