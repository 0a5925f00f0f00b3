//! Column schemas and rows shared by every view

use serde::Serialize;

use crate::error::{Result, SeerError};
use crate::sort::ColumnType;

/// A column name tagged with how its cells sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Column { name, column_type }
    }
}

/// One displayed row; `id` is the stable identity used to keep focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(id: impl Into<String>, cells: Vec<String>) -> Self {
        Row {
            id: id.into(),
            cells,
        }
    }

    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Rows laid out against a fixed schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: &'static [Column],
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: &'static [Column]) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.cells.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Find a column by name, ignoring case
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Like [`Table::column_index`], with an error naming the view's columns
    pub fn resolve_column(&self, view: &str, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SeerError::UnknownColumn {
                view: view.to_string(),
                column: name.to_string(),
                available: self
                    .columns
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Position of the row with `id`
    pub fn row_index(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }
}
