use crate::alias::AliasTable;
use crate::coerce::{TypeHint, NULL_MARKER};
use crate::grammar::{tokenize_row, RowToken};
use crate::header::{ColumnType, Header};
use crate::path::{set_deep_field, set_value_at};
use crate::{Error, Result, ZoonMap, ZoonValue};

/// Decodes a tabular document into one record per row.
///
/// Alias lines (`%`) may precede the `#` header; blank lines are skipped
/// everywhere. With an explicit `+N` row count the document yields `N` rows
/// and any further lines are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] when a data line comes before the header
/// or the header is missing, and [`Error::Traversal`] when a column path runs
/// through a scalar.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::tabular::decode_tabular;
/// use serde_zoon::ZoonValue;
///
/// let rows = decode_tabular("# @status=ok id:i+ +3").unwrap();
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[2].pointer("id"), Some(&ZoonValue::from(3)));
/// assert_eq!(rows[2].pointer("status"), Some(&ZoonValue::from("ok")));
/// ```
pub fn decode_tabular(input: &str) -> Result<Vec<ZoonValue>> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut aliases = AliasTable::new();
    let header = loop {
        match lines.next() {
            Some((_, line)) if line.starts_with('%') => aliases.absorb_line(line),
            Some((_, line)) if line.starts_with('#') => break Header::parse(line, &aliases),
            Some((line_no, _)) => {
                return Err(Error::invalid_format(line_no, "data line before header"))
            }
            None => {
                let last = input.lines().count().max(1);
                return Err(Error::invalid_format(last, "missing header line"));
            }
        }
    };

    tracing::debug!(
        aliases = aliases.len(),
        constants = header.constants.len(),
        columns = header.columns.len(),
        row_count = ?header.row_count,
        "decoding tabular document"
    );

    let mut assembler = RowAssembler::new(&header);
    let mut rows = Vec::new();

    if let Some(count) = header.row_count {
        for _ in 0..count {
            rows.push(assembler.assemble(&[])?);
        }
        let ignored = lines.count();
        if ignored > 0 {
            tracing::debug!(ignored, "ignoring data lines after explicit row count");
        }
        return Ok(rows);
    }

    for (_, line) in lines {
        let cells = tokenize_row(line);
        rows.push(assembler.assemble(&cells)?);
    }

    Ok(rows)
}

/// Builds rows from cells. Holds the `i+` counter for one document.
struct RowAssembler<'h> {
    header: &'h Header,
    counter: i64,
}

impl<'h> RowAssembler<'h> {
    fn new(header: &'h Header) -> Self {
        RowAssembler { header, counter: 0 }
    }

    fn assemble(&mut self, cells: &[RowToken<'_>]) -> Result<ZoonValue> {
        let mut row = ZoonMap::new();

        for constant in &self.header.constants {
            set_deep_field(&mut row, &constant.name, constant.hint(), &constant.raw)?;
        }

        let mut cells = cells.iter();
        for column in &self.header.columns {
            if !column.ty.consumes_cell() {
                self.counter += 1;
                set_value_at(&mut row, &column.name, ZoonValue::from(self.counter))?;
                continue;
            }

            match cells.next() {
                Some(cell) if cell.quoted || cell.as_str() != NULL_MARKER => {
                    let (raw, hint) = resolve_cell(&column.ty, cell);
                    set_deep_field(&mut row, &column.name, hint, raw)?;
                }
                // Short rows pad with null.
                _ => set_null(&mut row, &column.name)?,
            }
        }

        let surplus = cells.count();
        if surplus > 0 {
            tracing::trace!(surplus, "ignoring cells beyond the declared columns");
        }

        Ok(ZoonValue::Object(row))
    }
}

/// Maps an indexed-enum cell to its option and picks the coercion.
/// Quoted cells are literal text unless the column is numeric or boolean.
fn resolve_cell<'a>(ty: &'a ColumnType, cell: &'a RowToken<'_>) -> (&'a str, TypeHint) {
    let hint = ty.hint();
    if cell.quoted {
        return match hint {
            TypeHint::Int | TypeHint::Bool => (cell.as_str(), hint),
            _ => (cell.as_str(), TypeHint::Text),
        };
    }
    if let ColumnType::IndexedEnum(options) = ty {
        if let Some(option) = cell.as_str().parse::<usize>().ok().and_then(|i| options.get(i)) {
            return (option.as_str(), hint);
        }
    }
    (cell.as_str(), hint)
}

/// Nulls a column. A null below a parent that is not an object leaves the
/// row untouched, so an absent nested record stays absent.
fn set_null(row: &mut ZoonMap, path: &str) -> Result<()> {
    if let Some((parent, _)) = path.rsplit_once('.') {
        if !has_object_at(row, parent) {
            return Ok(());
        }
    }
    set_value_at(row, path, ZoonValue::Null)
}

fn has_object_at(row: &ZoonMap, path: &str) -> bool {
    let mut current = row;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(ZoonValue::Object(map)) => current = map,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoon;

    #[test]
    fn test_canonical_users() {
        let rows = decode_tabular(
            "# active:b id:i+ name:s role=Admin|User\n1 Alice Admin\n1 Bob User\n0 Carol User\n",
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![
                zoon!({ "active": true, "id": 1, "name": "Alice", "role": "Admin" }),
                zoon!({ "active": true, "id": 2, "name": "Bob", "role": "User" }),
                zoon!({ "active": false, "id": 3, "name": "Carol", "role": "User" }),
            ]
        );
    }

    #[test]
    fn test_aliases_expand() {
        let rows =
            decode_tabular("%i=infrastructure\n# %i.postgres.state:s %i.redis.state:s\nup down\n")
                .unwrap();
        assert_eq!(
            rows,
            vec![zoon!({ "infrastructure": { "postgres": { "state": "up" }, "redis": { "state": "down" } } })]
        );
    }

    #[test]
    fn test_indexed_enum_and_bad_index() {
        let rows = decode_tabular("# s!low|mid|high\n2\n0\n9\n").unwrap();
        let values: Vec<_> = rows.iter().map(|r| r.pointer("s").cloned()).collect();
        assert_eq!(
            values,
            vec![
                Some(ZoonValue::from("high")),
                Some(ZoonValue::from("low")),
                Some(ZoonValue::from("9")),
            ]
        );
    }

    #[test]
    fn test_short_rows_pad_with_null() {
        let rows = decode_tabular("# a:i b:s c:b\n1\n").unwrap();
        assert_eq!(rows, vec![zoon!({ "a": 1, "b": null, "c": null })]);
    }

    #[test]
    fn test_null_below_missing_parent_is_skipped() {
        let rows = decode_tabular("# owner:s owner.name:s\n~ ~\n~ Ann\n").unwrap();
        assert_eq!(rows[0], zoon!({ "owner": null }));
        assert_eq!(rows[1], zoon!({ "owner": { "name": "Ann" } }));
    }

    #[test]
    fn test_quoted_cells_are_literal() {
        let rows = decode_tabular("# a:s b:t n:i\n\"~\" \"x_y\" \"12\"\n").unwrap();
        assert_eq!(rows, vec![zoon!({ "a": "~", "b": "x_y", "n": 12 })]);
    }

    #[test]
    fn test_counter_is_per_document() {
        let first = decode_tabular("# id:i+ +2").unwrap();
        let second = decode_tabular("# id:i+ +2").unwrap();
        assert_eq!(first, second);
        assert_eq!(second[1].pointer("id"), Some(&ZoonValue::from(2)));
    }

    #[test]
    fn test_explicit_count_ignores_trailing_lines() {
        let rows = decode_tabular("# id:i+ +1\nstray line\n").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_blank_lines_and_unknown_alias_lines() {
        let rows = decode_tabular("\n%garbage\n\n# n:i\n\n5\n\n").unwrap();
        assert_eq!(rows, vec![zoon!({ "n": 5 })]);
    }

    #[test]
    fn test_data_before_header() {
        let err = decode_tabular("%a=x\n1 2 3\n# a:i").unwrap_err();
        match err {
            Error::InvalidFormat { line, .. } => assert_eq!(line, 2),
            other => panic!("expected invalid format, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            decode_tabular("%a=x\n%b=y").unwrap_err(),
            Error::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_traversal_through_scalar() {
        let err = decode_tabular("# a:i a.b:i\n1 2\n").unwrap_err();
        assert!(matches!(err, Error::Traversal { .. }));
    }
}
