//! Search and filter predicates.
//!
//! A row stays visible when it passes the free-text query AND every active
//! exact-match filter. The free-text query is an OR across the searchable
//! fields: one matching field is enough.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::{Record, Value};

use super::comparator::compare_values;

/// Case-insensitive substring search over a set of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextQuery {
    /// Query as typed
    raw: String,
    /// Lowercased query, `None` when blank
    needle: Option<String>,
}

impl TextQuery {
    pub fn new(query: impl Into<String>) -> Self {
        let raw = query.into();
        let needle = if raw.trim().is_empty() {
            None
        } else {
            Some(raw.to_lowercase())
        };
        Self { raw, needle }
    }

    /// The query text as entered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when the query filters nothing out.
    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    /// Whether `record` matches on any of `fields`.
    pub fn matches<R: Record>(&self, record: &R, fields: &[R::Field]) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        fields.iter().any(|field| {
            record
                .value(field)
                .is_some_and(|v| v.to_search_text().contains(needle.as_str()))
        })
    }
}

/// Exact-match filters, e.g. `status = "published"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactFilters<F> {
    filters: BTreeMap<F, Value>,
}

impl<F> Default for ExactFilters<F> {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
        }
    }
}

impl<F: Ord> ExactFilters<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`. Replaces any earlier filter on it.
    pub fn set(&mut self, field: F, value: Value) {
        self.filters.insert(field, value);
    }

    /// Drop the filter on `field`. Returns whether one was active.
    pub fn remove(&mut self, field: &F) -> bool {
        self.filters.remove(field).is_some()
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Active filters in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&F, &Value)> {
        self.filters.iter()
    }

    /// Whether `record` passes every filter.
    ///
    /// A row lacking a filtered field only passes a `Null` filter.
    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.filters.iter().all(|(field, expected)| {
            let actual = record.value(field).unwrap_or_default();
            values_equal(&actual, expected)
        })
    }
}

/// Equality used by exact filters.
///
/// `Int` and `Float` compare numerically. Text against a scalar compares
/// display text, so `"2024"` in the data matches a filter of `2024`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            compare_values(a, b).is_eq()
        }
        (Value::Text(text), other) | (other, Value::Text(text)) if is_scalar(other) => {
            *text == other.to_string()
        }
        _ => a == b,
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Date(_)
    )
}

/// Free-text query and exact filters together.
#[derive(Debug, Clone)]
pub struct RowFilter<F> {
    pub query: TextQuery,
    pub searchable: Vec<F>,
    pub exact: ExactFilters<F>,
}

impl<F: Ord> RowFilter<F> {
    pub fn new(searchable: Vec<F>) -> Self {
        Self {
            query: TextQuery::default(),
            searchable,
            exact: ExactFilters::new(),
        }
    }

    /// True when no row can be filtered out.
    pub fn is_pass_through(&self) -> bool {
        self.query.is_blank() && self.exact.is_empty()
    }

    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.query.matches(record, &self.searchable) && self.exact.matches(record)
    }

    /// Indices of the matching rows, in source order.
    pub fn apply<R: Record<Field = F>>(&self, rows: &[R]) -> Vec<usize> {
        if self.is_pass_through() {
            return (0..rows.len()).collect();
        }
        rows.iter()
            .enumerate()
            .filter(|(_, row)| self.matches(*row))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;

    fn people() -> Vec<Row> {
        vec![
            Row::new()
                .with("first_name", "Alice")
                .with("last_name", "Martin")
                .with("email", "alice@example.org")
                .with("status", "active"),
            Row::new()
                .with("first_name", "Bob")
                .with("last_name", "Stone")
                .with("email", "bob@example.org")
                .with("status", "banned"),
            Row::new()
                .with("first_name", "Carla")
                .with("last_name", "Diaz")
                .with("email", "carla@example.org")
                .with("status", "active"),
        ]
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_query_case_insensitive_substring() {
        let rows = people();
        let mut filter = RowFilter::new(fields(&["first_name"]));
        filter.query = TextQuery::new("a");
        assert_eq!(filter.apply(&rows), vec![0, 2]);
    }

    #[test]
    fn test_blank_query_matches_all() {
        let rows = people();
        let mut filter = RowFilter::new(fields(&["first_name"]));
        filter.query = TextQuery::new("   ");
        assert!(filter.query.is_blank());
        assert_eq!(filter.apply(&rows), vec![0, 1, 2]);
    }

    #[test]
    fn test_query_is_or_across_fields() {
        let rows = people();
        let mut filter = RowFilter::new(fields(&["first_name", "last_name", "email"]));
        filter.query = TextQuery::new("STONE");
        assert_eq!(filter.apply(&rows), vec![1]);

        filter.query = TextQuery::new("carla@");
        assert_eq!(filter.apply(&rows), vec![2]);
    }

    #[test]
    fn test_query_ignores_unsearchable_fields() {
        let rows = people();
        let mut filter = RowFilter::new(fields(&["first_name"]));
        filter.query = TextQuery::new("example.org");
        assert!(filter.apply(&rows).is_empty());
    }

    #[test]
    fn test_exact_filter_ands_with_query() {
        let rows = people();
        let mut filter = RowFilter::new(fields(&["first_name"]));
        filter.exact.set("status".to_string(), Value::from("active"));
        assert_eq!(filter.apply(&rows), vec![0, 2]);

        filter.query = TextQuery::new("car");
        assert_eq!(filter.apply(&rows), vec![2]);

        filter.query = TextQuery::new("bob");
        assert!(filter.apply(&rows).is_empty());
    }

    #[test]
    fn test_exact_filter_is_not_substring() {
        let rows = people();
        let mut exact = ExactFilters::new();
        exact.set("status".to_string(), Value::from("act"));
        assert!(!rows.iter().any(|r| exact.matches(r)));
    }

    #[test]
    fn test_exact_filter_numbers() {
        let row = Row::new().with("seats", 40);
        let mut exact = ExactFilters::new();
        exact.set("seats".to_string(), Value::Float(40.0));
        assert!(exact.matches(&row));
    }

    #[test]
    fn test_exact_filter_matches_numbers_sent_as_text() {
        let rows = vec![
            Row::new().with("year", "2024").with("id", "17"),
            Row::new().with("year", "2023").with("id", "18"),
        ];
        let mut exact = ExactFilters::new();
        exact.set("year".to_string(), Value::Int(2024));
        let matched: Vec<bool> = rows.iter().map(|r| exact.matches(r)).collect();
        assert_eq!(matched, vec![true, false]);

        exact.set("year".to_string(), Value::from("2024"));
        exact.set("id".to_string(), Value::Int(17));
        assert!(exact.matches(&rows[0]));

        let numeric = Row::new().with("year", 2024);
        exact.clear();
        exact.set("year".to_string(), Value::from("2024"));
        assert!(exact.matches(&numeric));
        exact.set("year".to_string(), Value::from("2024.0"));
        assert!(!exact.matches(&numeric));
    }

    #[test]
    fn test_remove_exact_filter() {
        let mut exact: ExactFilters<String> = ExactFilters::new();
        exact.set("status".to_string(), Value::from("active"));
        assert!(exact.remove(&"status".to_string()));
        assert!(!exact.remove(&"status".to_string()));
        assert!(exact.is_empty());
    }

    #[test]
    fn test_query_matches_nested_and_dates() {
        let row = Row::from(
            serde_json::json!({
                "user": {"username": "jdoe"},
                "date": "2024-05-01"
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        let query = TextQuery::new("JDOE");
        assert!(query.matches(&row, &fields(&["user"])));
        let query = TextQuery::new("2024-05");
        assert!(query.matches(&row, &fields(&["date"])));
    }
}
