//! Table configuration: which columns a table has and how it behaves.
//!
//! A config is usually a small JSON file next to the data:
//!
//! ```json
//! {
//!   "columns": [
//!     {"id": "title", "label": "Title"},
//!     {"id": "seats", "label": "Seats", "format": {"kind": "fixed", "decimals": 0}},
//!     {"id": "notes", "label": "Notes", "sortable": false}
//!   ],
//!   "searchable": ["title", "notes"],
//!   "page_sizes": [10, 25, 50],
//!   "nulls": "last",
//!   "sort": {"field": "title", "direction": "descending"}
//! }
//! ```
//!
//! Without a file, [`TableConfig::infer`] derives one column per field.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::data::{ColumnDescriptor, Row};
use crate::error::TableViewError;
use crate::query::{NullPlacement, PageSizes, SortDirection, SortState};
use crate::view::TableViewController;
use crate::Result;

/// Initial sort declared in a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Static configuration for one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub columns: Vec<ColumnDescriptor<String>>,
    /// Fields the free-text query searches. All columns when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable: Option<Vec<String>>,
    pub page_sizes: PageSizes,
    pub nulls: NullPlacement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,
}

impl TableConfig {
    /// Read a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| TableViewError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: TableConfig =
            serde_json::from_str(&content).map_err(|e| TableViewError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// One column per field seen in `rows`, `id` first, the rest sorted.
    pub fn infer(rows: &[Row]) -> Self {
        let fields: BTreeSet<&str> = rows.iter().flat_map(|r| r.field_names()).collect();
        let mut columns: Vec<ColumnDescriptor<String>> = Vec::with_capacity(fields.len());
        if fields.contains("id") {
            columns.push(ColumnDescriptor::new("id".to_string(), "ID"));
        }
        columns.extend(
            fields
                .iter()
                .filter(|f| **f != "id")
                .map(|f| ColumnDescriptor::new(f.to_string(), humanize(f))),
        );
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Check that every referenced field is a declared column.
    pub fn validate(&self) -> Result<()> {
        let referenced = self
            .searchable
            .iter()
            .flatten()
            .chain(self.sort.as_ref().map(|s| &s.field));
        for field in referenced {
            if !self.columns.iter().any(|c| &c.id == field) {
                return Err(TableViewError::UnknownColumn(field.clone()));
            }
        }
        Ok(())
    }

    /// Build a controller over `rows` with this configuration.
    pub fn build(&self, rows: Vec<Row>) -> Result<TableViewController<Row>> {
        self.validate()?;
        let mut view = TableViewController::new(self.columns.clone())
            .page_sizes(self.page_sizes.clone())
            .nulls(self.nulls);
        if let Some(fields) = &self.searchable {
            view = view.searchable(fields.clone());
        }
        if let Some(sort) = &self.sort {
            view.set_sort_state(SortState {
                order_by: Some(sort.field.clone()),
                direction: sort.direction,
            });
        }
        view.set_rows(rows);
        Ok(view)
    }
}

/// `first_name` / `startDate` → `First Name` / `Start Date`.
fn humanize(field: &str) -> String {
    field.to_case(Case::Title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ValueFormat;
    use tempfile::tempdir;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("first_name"), "First Name");
        assert_eq!(humanize("startDate"), "Start Date");
        assert_eq!(humanize("email"), "Email");
        assert_eq!(humanize("max-seats"), "Max Seats");
    }

    #[test]
    fn test_infer_columns() {
        let rows = vec![
            Row::new().with("title", "Dune").with("id", 1),
            Row::new().with("author", "Herbert").with("id", 2),
        ];
        let config = TableConfig::infer(&rows);
        let ids: Vec<&str> = config.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["id", "author", "title"]);
        assert_eq!(config.columns[0].label, "ID");
        assert_eq!(config.columns[1].label, "Author");
    }

    #[test]
    fn test_load_full_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("events.table.json");
        fs::write(
            &path,
            r#"{
                "columns": [
                    {"id": "title", "label": "Title"},
                    {"id": "seats", "label": "Seats", "format": {"kind": "fixed", "decimals": 0}},
                    {"id": "notes", "label": "Notes", "sortable": false}
                ],
                "searchable": ["title", "notes"],
                "page_sizes": [10, 25],
                "nulls": "last",
                "sort": {"field": "title", "direction": "descending"}
            }"#,
        )
        .unwrap();

        let config = TableConfig::load(&path).unwrap();
        assert_eq!(config.columns.len(), 3);
        assert_eq!(config.columns[1].format, ValueFormat::Fixed { decimals: 0 });
        assert!(!config.columns[2].sortable);
        assert_eq!(config.page_sizes.options(), &[10, 25]);
        assert_eq!(config.nulls, NullPlacement::Last);
        assert_eq!(
            config.sort,
            Some(SortConfig {
                field: "title".to_string(),
                direction: SortDirection::Descending,
            })
        );
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("t.json");
        fs::write(&path, r#"{"columns": [{"id": "name", "label": "Name"}]}"#).unwrap();

        let config = TableConfig::load(&path).unwrap();
        assert_eq!(config.page_sizes, PageSizes::default());
        assert_eq!(config.nulls, NullPlacement::First);
        assert!(config.searchable.is_none());
        assert!(config.sort.is_none());
    }

    #[test]
    fn test_validate_unknown_column() {
        let config = TableConfig {
            columns: vec![ColumnDescriptor::new("name".to_string(), "Name")],
            searchable: Some(vec!["email".to_string()]),
            ..TableConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TableViewError::UnknownColumn(f) if f == "email"));

        let config = TableConfig {
            columns: vec![ColumnDescriptor::new("name".to_string(), "Name")],
            sort: Some(SortConfig {
                field: "age".to_string(),
                direction: SortDirection::Ascending,
            }),
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_applies_config() {
        let config = TableConfig {
            columns: vec![
                ColumnDescriptor::new("name".to_string(), "Name"),
                ColumnDescriptor::new("city".to_string(), "City"),
            ],
            searchable: Some(vec!["name".to_string()]),
            page_sizes: PageSizes::new([2, 4]),
            nulls: NullPlacement::Last,
            sort: Some(SortConfig {
                field: "city".to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        let rows = vec![
            Row::new().with("name", "Ana"),
            Row::new().with("name", "Ben").with("city", "Oslo"),
            Row::new().with("name", "Cid").with("city", "Lima"),
        ];
        let mut view = config.build(rows).unwrap();
        assert_eq!(view.page_state().size, 2);
        let names: Vec<String> = view
            .filtered_rows()
            .iter()
            .map(|r| r.get("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Cid", "Ben", "Ana"]);

        view.set_query("oslo");
        assert_eq!(view.filtered_count(), 0);
    }
}
