//! Column descriptors: static configuration of how a field is labeled,
//! sorted and rendered.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Value transform applied when a cell is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValueFormat {
    /// `Value`'s own display text
    #[default]
    Plain,
    /// Numbers with a fixed number of decimals
    Fixed { decimals: usize },
    /// Dates through a strftime pattern
    Date { pattern: String },
    /// Booleans as "Yes"/"No"
    YesNo,
}

impl ValueFormat {
    /// Render `value` as display text.
    ///
    /// Values the format doesn't apply to fall back to plain display.
    pub fn apply(&self, value: &Value) -> String {
        match (self, value) {
            (ValueFormat::Fixed { decimals }, Value::Int(i)) => format!("{:.*}", *decimals, *i as f64),
            (ValueFormat::Fixed { decimals }, Value::Float(x)) => format!("{:.*}", *decimals, x),
            (ValueFormat::Date { pattern }, Value::Date(dt)) => {
                // chrono reports a bad pattern as a fmt error
                let mut out = String::new();
                match write!(out, "{}", dt.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => value.to_string(),
                }
            }
            (ValueFormat::YesNo, Value::Bool(true)) => "Yes".to_string(),
            (ValueFormat::YesNo, Value::Bool(false)) => "No".to_string(),
            (_, v) => v.to_string(),
        }
    }
}

/// Describes one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor<F> {
    /// Field this column shows
    pub id: F,
    /// Header text
    pub label: String,
    /// Whether clicking the header sorts by this column
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    /// Cell formatting
    #[serde(default)]
    pub format: ValueFormat,
}

fn default_sortable() -> bool {
    true
}

impl<F> ColumnDescriptor<F> {
    /// Sortable, plain-formatted column.
    pub fn new(id: F, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            sortable: true,
            format: ValueFormat::Plain,
        }
    }

    /// Builder: mark as not sortable
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Builder: set formatting
    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    /// Render a cell of this column. Missing values render empty.
    pub fn render(&self, value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(v) => self.format.apply(v),
        }
    }
}
