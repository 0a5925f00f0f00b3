//! Generic, type-aware row sorting
//!
//! Columns carry a [`ColumnType`] from the moment their schema is defined;
//! [`resolve_key`] turns a cell into a total-order key and
//! [`SortController`] owns the per-view sort state.

pub mod controller;
pub mod key;

pub use controller::{focus_index, sort_rows, Direction, SortController, SortOutcome, SortState};
pub use key::{resolve_key, ColumnType, SortKey};
