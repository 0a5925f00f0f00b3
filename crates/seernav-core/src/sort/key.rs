//! Type-aware sort keys for displayed cells
//!
//! [`resolve_key`] is a pure function of the column type and the cell text.
//! Sentinels always map below every real value of their column, so ascending
//! puts them first and descending puts them last, never interleaved.

use std::cmp::Ordering;

use serde::Serialize;

use crate::format::{ERROR, FAIL, MISSING, PASS};

/// Semantic type of a column, fixed when the schema is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Plain text, compared lexicographically
    Identifier,
    /// Pass / fail / error / unknown glyph
    SymbolFlag,
    /// Integer, possibly comma-grouped, `-` when absent
    Count,
    /// Float, `-` when absent
    Score,
    /// `HH:MM:SS`, `-` when absent
    Duration,
    /// Non-negative integer or an `ERR` / `?` sentinel
    WeightOrError,
}

/// Totally ordered key produced for one cell
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // a column never mixes kinds; numbers first keeps this total
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Key of a missing or unparsable numeric cell
const BOTTOM: f64 = f64::NEG_INFINITY;

/// Resolve the sort key of `cell` in a column of type `column_type`
pub fn resolve_key(column_type: ColumnType, cell: &str) -> SortKey {
    let cell = cell.trim();
    match column_type {
        ColumnType::Identifier => SortKey::Text(cell.to_string()),
        ColumnType::SymbolFlag => SortKey::Number(flag_rank(cell)),
        ColumnType::Count | ColumnType::Score => SortKey::Number(parse_number(cell)),
        ColumnType::Duration => SortKey::Number(parse_duration(cell)),
        ColumnType::WeightOrError => SortKey::Number(parse_weight(cell)),
    }
}

/// error < fail < unknown < pass
fn flag_rank(cell: &str) -> f64 {
    match cell {
        ERROR => -2.0,
        FAIL => -1.0,
        PASS => 1.0,
        _ => 0.0,
    }
}

fn parse_number(cell: &str) -> f64 {
    if cell == MISSING {
        return BOTTOM;
    }
    cell.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .unwrap_or_else(|| {
            tracing::debug!(cell, "Unparsable numeric cell sorts as missing");
            BOTTOM
        })
}

/// `H:MM:SS` to seconds; `-` is -1, anything else unparsable is bottom
fn parse_duration(cell: &str) -> f64 {
    if cell == MISSING {
        return -1.0;
    }
    let parts: Vec<_> = cell.split(':').map(str::parse::<u64>).collect();
    match parts.as_slice() {
        [Ok(h), Ok(m), Ok(s)] => *h as f64 * 3600.0 + *m as f64 * 60.0 + *s as f64,
        _ => {
            tracing::debug!(cell, "Unparsable duration sorts as missing");
            BOTTOM
        }
    }
}

/// `ERR`, `?`, `-` and anything non-numeric sit below every valid weight
fn parse_weight(cell: &str) -> f64 {
    cell.replace(',', "")
        .parse::<u64>()
        .map(|v| v as f64)
        .unwrap_or(BOTTOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(key: SortKey) -> f64 {
        match key {
            SortKey::Number(n) => n,
            SortKey::Text(t) => panic!("expected number, got text {t}"),
        }
    }

    #[test]
    fn test_identifier_is_lexicographic() {
        assert!(
            resolve_key(ColumnType::Identifier, "abc")
                < resolve_key(ColumnType::Identifier, "abd")
        );
    }

    #[test]
    fn test_flag_order() {
        let ranks: Vec<f64> = [ERROR, FAIL, MISSING, PASS]
            .iter()
            .map(|c| num(resolve_key(ColumnType::SymbolFlag, c)))
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        // unknown glyphs sit with "-" in the middle
        assert_eq!(num(resolve_key(ColumnType::SymbolFlag, "?")), 0.0);
    }

    #[test]
    fn test_count_strips_grouping() {
        assert_eq!(num(resolve_key(ColumnType::Count, "1,234")), 1234.0);
        assert_eq!(num(resolve_key(ColumnType::Count, "-")), f64::NEG_INFINITY);
        assert_eq!(num(resolve_key(ColumnType::Count, "n/a")), f64::NEG_INFINITY);
        assert_eq!(num(resolve_key(ColumnType::Score, " 0.50 ")), 0.5);
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(num(resolve_key(ColumnType::Duration, "01:02:05")), 3725.0);
        assert_eq!(num(resolve_key(ColumnType::Duration, "100:00:00")), 360000.0);
        assert_eq!(num(resolve_key(ColumnType::Duration, "-")), -1.0);
        assert_eq!(
            num(resolve_key(ColumnType::Duration, "5:00")),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_huge_duration_still_orders_above_smaller_ones() {
        let huge = resolve_key(ColumnType::Duration, "5124095576040000:00:00");
        assert!(num(huge.clone()) > 1.8e19);
        assert!(resolve_key(ColumnType::Duration, "99:59:59") < huge);
        // hours beyond u64 do not parse at all
        assert_eq!(
            num(resolve_key(ColumnType::Duration, "99999999999999999999:00:00")),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_weight_sentinels_below_zero() {
        let zero = resolve_key(ColumnType::WeightOrError, "0");
        for sentinel in ["ERR", "?", "-"] {
            assert!(resolve_key(ColumnType::WeightOrError, sentinel) < zero);
        }
        assert_eq!(num(resolve_key(ColumnType::WeightOrError, "12,345")), 12345.0);
    }

    #[test]
    fn test_resolution_is_pure() {
        for _ in 0..3 {
            assert_eq!(
                resolve_key(ColumnType::Duration, "00:00:10"),
                SortKey::Number(10.0)
            );
        }
    }
}
