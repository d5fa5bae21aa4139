//! Load rows from JSON dumps.
//!
//! Accepts either a bare array of objects or the usual REST envelope with
//! the array under `data`, `results` or `items`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::data::Row;
use crate::error::TableViewError;
use crate::Result;

/// Envelope keys checked, in order, when the top level is an object.
const ENVELOPE_KEYS: [&str; 3] = ["data", "results", "items"];

/// Read and parse a row dump from disk.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| TableViewError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rows = parse_rows(&content, path)?;
    debug!(path = %path.display(), rows = rows.len(), "rows loaded");
    Ok(rows)
}

/// Parse a row dump. `origin` only labels errors.
pub fn parse_rows(content: &str, origin: &Path) -> Result<Vec<Row>> {
    let json: serde_json::Value =
        serde_json::from_str(content).map_err(|e| TableViewError::Json {
            path: origin.to_path_buf(),
            source: e,
        })?;

    let items = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(serde_json::Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| TableViewError::NotAnArray(origin.to_path_buf()))?,
        _ => return Err(TableViewError::NotAnArray(origin.to_path_buf())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(map) => Ok(Row::from(map)),
            _ => Err(TableViewError::NotAnObject {
                path: origin.to_path_buf(),
                index,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn origin() -> PathBuf {
        PathBuf::from("rows.json")
    }

    #[test]
    fn test_parse_array() {
        let rows = parse_rows(r#"[{"id": 1, "title": "Dune"}, {"id": 2}]"#, &origin()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("title"), Some(&Value::from("Dune")));
        assert_eq!(rows[1].get("title"), None);
    }

    #[test]
    fn test_parse_envelope() {
        let rows = parse_rows(
            r#"{"count": 1, "results": [{"id": "e-1", "name": "Book fair"}]}"#,
            &origin(),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&Value::from("Book fair")));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_rows(r#"{"count": 3}"#, &origin()).unwrap_err();
        assert!(matches!(err, TableViewError::NotAnArray(_)));

        let err = parse_rows("42", &origin()).unwrap_err();
        assert!(matches!(err, TableViewError::NotAnArray(_)));
    }

    #[test]
    fn test_parse_rejects_non_object_row() {
        let err = parse_rows(r#"[{"id": 1}, "oops"]"#, &origin()).unwrap_err();
        assert!(matches!(err, TableViewError::NotAnObject { index: 1, .. }));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_rows("[{", &origin()).unwrap_err();
        assert!(matches!(err, TableViewError::Json { .. }));
        assert!(err.to_string().contains("rows.json"));
    }

    #[test]
    fn test_load_rows_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("books.json");
        fs::write(&path, r#"[{"id": 1, "published": "1965-08-01"}]"#).unwrap();

        let rows = load_rows(&path).unwrap();
        assert!(matches!(rows[0].get("published"), Some(Value::Date(_))));
    }

    #[test]
    fn test_load_rows_missing_file() {
        let temp = tempdir().unwrap();
        let err = load_rows(temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TableViewError::FileRead { .. }));
    }
}
