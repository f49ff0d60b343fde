//! Flattening of rows and per-column statistics for the encoder.

use crate::header::ColumnType;
use crate::inline::render_value;
use crate::{Error, Number, Result, ZoonOptions, ZoonValue};
use std::collections::{BTreeMap, BTreeSet};

static NULL: ZoonValue = ZoonValue::Null;

/// A row reduced to `dotted.path -> leaf value`, paths sorted.
pub(crate) type FlatRow<'a> = BTreeMap<String, &'a ZoonValue>;

/// Flattens one row. Nested objects are descended into; scalars and arrays
/// are leaves. A null row counts as an empty record.
pub(crate) fn flatten_row(row: &ZoonValue) -> Result<FlatRow<'_>> {
    let mut out = FlatRow::new();
    match row {
        ZoonValue::Object(map) => {
            for (key, value) in map {
                flatten_into(key.clone(), value, &mut out);
            }
        }
        ZoonValue::Null => {}
        other => {
            return Err(Error::unsupported_type(&format!(
                "tabular rows must be records, found {}",
                other.kind_name()
            )))
        }
    }
    Ok(out)
}

fn flatten_into<'a>(path: String, value: &'a ZoonValue, out: &mut FlatRow<'a>) {
    match value {
        ZoonValue::Object(map) => {
            for (key, child) in map {
                flatten_into(format!("{}.{}", path, key), child, out);
            }
        }
        leaf => {
            out.insert(path, leaf);
        }
    }
}

/// Value of `path` in `row`, null when the row lacks it.
pub(crate) fn cell<'a>(row: &FlatRow<'a>, path: &str) -> &'a ZoonValue {
    row.get(path).copied().unwrap_or(&NULL)
}

/// Widened scalar kind of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

impl Kind {
    fn of(value: &ZoonValue) -> Kind {
        match value {
            ZoonValue::Null => Kind::Null,
            ZoonValue::Bool(_) => Kind::Bool,
            ZoonValue::Number(Number::Integer(_)) => Kind::Int,
            ZoonValue::Number(Number::Float(_)) => Kind::Float,
            ZoonValue::String(_) | ZoonValue::Array(_) | ZoonValue::Object(_) => Kind::Str,
        }
    }

    fn widen(self, other: Kind) -> Kind {
        match (self, other) {
            (Kind::Null, k) | (k, Kind::Null) => k,
            (a, b) if a == b => a,
            _ => Kind::Str,
        }
    }
}

/// Aggregate over every row for one active column.
pub(crate) struct ColumnStat<'a> {
    pub path: &'a str,
    pub kind: Kind,
    pub cells: Vec<&'a ZoonValue>,
    /// Token form of each cell, in row order.
    pub rendered: Vec<String>,
    /// Distinct token forms, null marker included.
    pub distinct: BTreeSet<String>,
}

impl<'a> ColumnStat<'a> {
    pub fn collect(path: &'a str, rows: &[FlatRow<'a>]) -> Self {
        let cells: Vec<&'a ZoonValue> = rows.iter().map(|row| cell(row, path)).collect();
        let kind = cells
            .iter()
            .fold(Kind::Null, |kind, value| kind.widen(Kind::of(value)));
        let rendered: Vec<String> = cells.iter().map(|value| render_value(value)).collect();
        let distinct = rendered.iter().cloned().collect();

        ColumnStat {
            path,
            kind,
            cells,
            rendered,
            distinct,
        }
    }

    /// Picks the column type from the statistics.
    pub fn decide(&self, options: &ZoonOptions) -> ColumnType {
        let row_count = self.cells.len();

        if self.path == "id" && self.kind == Kind::Int {
            return if options.auto_increment && self.is_sequence() {
                ColumnType::AutoIncrement
            } else {
                ColumnType::Int
            };
        }

        match self.kind {
            Kind::Bool => return ColumnType::Bool,
            Kind::Int => return ColumnType::Int,
            _ => {}
        }

        if self.distinct.len() <= options.max_enum_values && self.distinct.len() < row_count {
            return self.enum_type(row_count);
        }

        let total: usize = self.rendered.iter().map(String::len).sum();
        if total / row_count.max(1) > options.text_threshold {
            ColumnType::Text
        } else {
            ColumnType::Str
        }
    }

    fn is_sequence(&self) -> bool {
        self.cells
            .iter()
            .zip(1i64..)
            .all(|(value, expected)| matches!(value, ZoonValue::Number(Number::Integer(i)) if *i == expected))
    }

    fn enum_type(&self, row_count: usize) -> ColumnType {
        let keys: Vec<String> = self
            .distinct
            .iter()
            .filter(|key| key.as_str() != crate::coerce::NULL_MARKER)
            .cloned()
            .collect();

        if keys.is_empty() || keys.iter().any(|key| !is_option_safe(key)) {
            return ColumnType::Str;
        }
        if keys.len() < 3 {
            return ColumnType::Enum(keys);
        }

        let avg_len = keys.iter().map(String::len).sum::<usize>() / keys.len();
        let literal_cost = avg_len * row_count;
        let index_cost = keys.iter().map(String::len).sum::<usize>() + keys.len() - 1 + row_count * 2;

        if literal_cost > index_cost {
            ColumnType::IndexedEnum(keys)
        } else {
            ColumnType::Enum(keys)
        }
    }
}

fn is_option_safe(key: &str) -> bool {
    !key.contains(|c: char| c == '|' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoon;

    fn stat_for<'a>(path: &'a str, rows: &'a [FlatRow<'a>]) -> ColumnStat<'a> {
        ColumnStat::collect(path, rows)
    }

    #[test]
    fn test_flatten_nested_paths() {
        let row = zoon!({ "a": { "b": 1, "c": { "d": "x" } }, "e": [1, 2] });
        let flat = flatten_row(&row).unwrap();
        let paths: Vec<_> = flat.keys().cloned().collect();
        assert_eq!(paths, vec!["a.b", "a.c.d", "e"]);
    }

    #[test]
    fn test_flatten_rejects_scalars() {
        assert!(flatten_row(&ZoonValue::from(1)).is_err());
        assert!(flatten_row(&ZoonValue::Null).unwrap().is_empty());
    }

    #[test]
    fn test_kind_widening() {
        let values = [zoon!({ "v": 1 }), zoon!({ "v": null }), zoon!({ "v": "x" })];
        let rows: Vec<_> = values.iter().map(|v| flatten_row(v).unwrap()).collect();
        assert_eq!(stat_for("v", &rows).kind, Kind::Str);
        assert_eq!(stat_for("missing", &rows).kind, Kind::Null);
    }

    #[test]
    fn test_id_sequence_detection() {
        let values = [zoon!({ "id": 1 }), zoon!({ "id": 2 }), zoon!({ "id": 3 })];
        let rows: Vec<_> = values.iter().map(|v| flatten_row(v).unwrap()).collect();
        let options = ZoonOptions::default();
        assert_eq!(stat_for("id", &rows).decide(&options), ColumnType::AutoIncrement);
        assert_eq!(
            stat_for("id", &rows).decide(&options.clone().with_auto_increment(false)),
            ColumnType::Int
        );

        let values = [zoon!({ "id": 1 }), zoon!({ "id": 3 })];
        let rows: Vec<_> = values.iter().map(|v| flatten_row(v).unwrap()).collect();
        assert_eq!(stat_for("id", &rows).decide(&options), ColumnType::Int);
    }

    #[test]
    fn test_indexed_enum_when_cheaper() {
        let statuses = ["approved", "pending_review", "rejected"];
        let values: Vec<_> = (0..12)
            .map(|i| zoon!({ "status": (statuses[i % 3]) }))
            .collect();
        let rows: Vec<_> = values.iter().map(|v| flatten_row(v).unwrap()).collect();
        assert_eq!(
            stat_for("status", &rows).decide(&ZoonOptions::default()),
            ColumnType::IndexedEnum(statuses.iter().map(|s| s.to_string()).collect())
        );
    }

    #[test]
    fn test_literal_enum_for_short_values() {
        let values: Vec<_> = ["a", "b", "c", "a", "b", "c"]
            .iter()
            .map(|s| zoon!({ "k": (*s) }))
            .collect();
        let rows: Vec<_> = values.iter().map(|v| flatten_row(v).unwrap()).collect();
        assert_eq!(
            stat_for("k", &rows).decide(&ZoonOptions::default()),
            ColumnType::Enum(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_text_threshold() {
        let long = "x".repeat(31);
        let values = [zoon!({ "bio": (long.clone()) }), zoon!({ "bio": (format!("{long}y")) })];
        let rows: Vec<_> = values.iter().map(|v| flatten_row(v).unwrap()).collect();
        assert_eq!(stat_for("bio", &rows).decide(&ZoonOptions::default()), ColumnType::Text);
        assert_eq!(
            stat_for("bio", &rows).decide(&ZoonOptions::default().with_text_threshold(40)),
            ColumnType::Str
        );
    }
}
