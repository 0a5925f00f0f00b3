//! Sort state machine
//!
//! ```text
//! Unsorted          --request(c)--> SortedBy(c, Ascending)
//! SortedBy(o, _)    --request(c)--> SortedBy(c, Ascending)    (o != c)
//! SortedBy(c, d)    --request(c)--> SortedBy(c, !d)
//! ```
//!
//! Every transition re-orders the whole row set with a stable sort, then
//! looks the previously focused row up again by id.

use std::cmp::Reverse;

use serde::Serialize;

use crate::error::{Result, SeerError};
use crate::sort::key::{resolve_key, ColumnType};
use crate::table::{Row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Active sort of one view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SortState {
    #[default]
    Unsorted,
    SortedBy { column: usize, direction: Direction },
}

impl SortState {
    /// State after a sort request on `column`
    pub fn next(self, column: usize) -> SortState {
        let direction = match self {
            SortState::SortedBy {
                column: current,
                direction,
            } if current == column => direction.toggled(),
            _ => Direction::Ascending,
        };
        SortState::SortedBy { column, direction }
    }
}

/// Result of a sort request: the new state and the row index to focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOutcome {
    pub state: SortState,
    pub focus: usize,
}

/// Owns the sort state of a single view
#[derive(Debug, Clone, Default)]
pub struct SortController {
    state: SortState,
}

impl SortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    /// Advance the state for `column` and re-order `table`
    ///
    /// `focused` is the id of the row the user was on; the returned focus is
    /// its new index, or 0 when it is gone.
    pub fn request(
        &mut self,
        table: &mut Table,
        column: usize,
        focused: Option<&str>,
    ) -> Result<SortOutcome> {
        let column_type = column_type(table, column)?;
        self.state = self.state.next(column);
        if let SortState::SortedBy { direction, .. } = self.state {
            sort_rows(&mut table.rows, column, column_type, direction);
        }
        tracing::debug!(column = table.columns[column].name, state = ?self.state, "Sorted rows");

        Ok(SortOutcome {
            state: self.state,
            focus: focus_index(&table.rows, focused),
        })
    }

    /// Re-apply the current state to freshly loaded rows without toggling
    pub fn reapply(&self, table: &mut Table, focused: Option<&str>) -> Result<usize> {
        if let SortState::SortedBy { column, direction } = self.state {
            let column_type = column_type(table, column)?;
            sort_rows(&mut table.rows, column, column_type, direction);
        }
        Ok(focus_index(&table.rows, focused))
    }
}

fn column_type(table: &Table, column: usize) -> Result<ColumnType> {
    table
        .columns
        .get(column)
        .map(|c| c.column_type)
        .ok_or_else(|| SeerError::invalid_value("sort column index", column))
}

/// Stable sort of `rows` on the resolved key of `column`
///
/// Rows with equal keys keep their relative order in both directions.
pub fn sort_rows(rows: &mut [Row], column: usize, column_type: ColumnType, direction: Direction) {
    match direction {
        Direction::Ascending => {
            rows.sort_by_cached_key(|row| resolve_key(column_type, row.cell(column)))
        }
        Direction::Descending => {
            rows.sort_by_cached_key(|row| Reverse(resolve_key(column_type, row.cell(column))))
        }
    }
}

/// Index of the row with id `focused`, falling back to the first row
pub fn focus_index(rows: &[Row], focused: Option<&str>) -> usize {
    focused
        .and_then(|id| rows.iter().position(|r| r.id == id))
        .unwrap_or(0)
}
