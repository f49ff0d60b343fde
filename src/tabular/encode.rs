use super::column::{cell, flatten_row, ColumnStat, FlatRow};
use crate::alias::AliasTable;
use crate::coerce::NULL_MARKER;
use crate::grammar::{quote, Separator};
use crate::header::{Column, ColumnType, Constant, Header};
use crate::inline::render_value;
use crate::{Result, ZoonOptions, ZoonValue};
use std::collections::BTreeSet;

/// Encodes an array of records in tabular form.
///
/// Every line, header included, ends with `\n`. An empty array encodes as
/// the empty string.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`](crate::Error::UnsupportedType) when a
/// row is neither a record nor null.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::tabular::encode_tabular;
/// use serde_zoon::{zoon, ZoonOptions};
///
/// let rows = [
///     zoon!({ "id": 1, "name": "Alice" }),
///     zoon!({ "id": 2, "name": "Bob" }),
/// ];
/// let text = encode_tabular(&rows, &ZoonOptions::default()).unwrap();
/// assert_eq!(text, "# id:i+ name:s\nAlice\nBob\n");
/// ```
pub fn encode_tabular(rows: &[ZoonValue], options: &ZoonOptions) -> Result<String> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let flat: Vec<FlatRow<'_>> = rows.iter().map(flatten_row).collect::<Result<_>>()?;
    let paths: BTreeSet<&str> = flat
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut constants = Vec::new();
    let mut active = Vec::new();
    for path in paths {
        let hoisted = if options.hoist_constants && flat.len() > 1 {
            constant_value(path, &flat)
        } else {
            None
        };
        match hoisted {
            Some(value) => constants.push(render_constant(path, value)),
            None => active.push(path),
        }
    }

    let aliases = if options.aliases_enabled() {
        let all_paths = active
            .iter()
            .copied()
            .chain(constants.iter().map(|c| c.name.as_str()));
        AliasTable::detect(all_paths, options.max_aliases)
    } else {
        AliasTable::new()
    };

    let stats: Vec<ColumnStat<'_>> = active
        .iter()
        .map(|path| ColumnStat::collect(path, &flat))
        .collect();
    let columns: Vec<Column> = stats
        .iter()
        .map(|stat| {
            let ty = stat.decide(options);
            tracing::trace!(column = stat.path, ty = ?ty, "column type chosen");
            Column {
                name: stat.path.to_string(),
                ty,
            }
        })
        .collect();

    let all_generated = columns.iter().all(|column| !column.ty.consumes_cell());
    let header = Header {
        row_count: all_generated.then_some(flat.len()),
        constants,
        columns,
    };

    tracing::debug!(
        rows = flat.len(),
        columns = header.columns.len(),
        constants = header.constants.len(),
        aliases = aliases.len(),
        "encoding tabular document"
    );

    let mut out = String::new();
    if let Some(line) = aliases.definition_line() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&header.render(&aliases));
    out.push('\n');

    if all_generated {
        return Ok(out);
    }

    for (row_idx, row) in flat.iter().enumerate() {
        let cells: Vec<String> = header
            .columns
            .iter()
            .zip(&stats)
            .filter(|(column, _)| column.ty.consumes_cell())
            .map(|(column, stat)| render_cell(&column.ty, cell(row, stat.path), &stat.rendered[row_idx]))
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    Ok(out)
}

/// The shared value of `path` when it is the same, non-null, in every row.
fn constant_value<'a>(path: &str, rows: &[FlatRow<'a>]) -> Option<&'a ZoonValue> {
    let first = cell(rows.first()?, path);
    if !is_hoistable(first) {
        return None;
    }
    rows.iter()
        .all(|row| cell(row, path) == first)
        .then_some(first)
}

fn is_hoistable(value: &ZoonValue) -> bool {
    match value {
        ZoonValue::Null | ZoonValue::Array(_) | ZoonValue::Object(_) => false,
        ZoonValue::String(s) => {
            s != NULL_MARKER && !s.contains(|c: char| c.is_whitespace() && c != ' ')
        }
        ZoonValue::Bool(_) | ZoonValue::Number(_) => true,
    }
}

fn render_constant(path: &str, value: &ZoonValue) -> Constant {
    let (separator, raw) = match value {
        ZoonValue::String(_) => (Separator::Text, render_value(value)),
        ZoonValue::Bool(b) => (Separator::Typed, (if *b { "y" } else { "n" }).to_string()),
        other => (Separator::Typed, render_value(other)),
    };
    Constant {
        name: path.to_string(),
        separator,
        raw,
    }
}

fn render_cell(ty: &ColumnType, value: &ZoonValue, rendered: &str) -> String {
    match (ty, value) {
        (_, ZoonValue::Null) => NULL_MARKER.to_string(),
        (ColumnType::Bool, ZoonValue::Bool(b)) => (if *b { "1" } else { "0" }).to_string(),
        (ColumnType::Text, ZoonValue::String(s)) => quote(s),
        (ColumnType::Text, _) => quote(rendered),
        (ColumnType::IndexedEnum(options), _) => match options.iter().position(|o| o == rendered) {
            Some(idx) => idx.to_string(),
            None => literal_cell(value, rendered),
        },
        _ => literal_cell(value, rendered),
    }
}

/// A plain cell, quoted when the token form would not read back as itself.
fn literal_cell(value: &ZoonValue, rendered: &str) -> String {
    match value {
        ZoonValue::String(s) if needs_quotes(rendered) => quote(s),
        _ => rendered.to_string(),
    }
}

fn needs_quotes(rendered: &str) -> bool {
    rendered.is_empty()
        || rendered == NULL_MARKER
        || rendered.starts_with(['"', '['])
        || rendered.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoon;

    fn encode(rows: &[ZoonValue]) -> String {
        encode_tabular(rows, &ZoonOptions::default()).unwrap()
    }

    #[test]
    fn test_canonical_users() {
        let rows = [
            zoon!({ "id": 1, "name": "Alice", "role": "Admin", "active": true }),
            zoon!({ "id": 2, "name": "Bob", "role": "User", "active": true }),
            zoon!({ "id": 3, "name": "Carol", "role": "User", "active": false }),
        ];
        assert_eq!(
            encode(&rows),
            "# active:b id:i+ name:s role=Admin|User\n1 Alice Admin\n1 Bob User\n0 Carol User\n"
        );
    }

    #[test]
    fn test_constants_are_hoisted() {
        let rows = [
            zoon!({ "level": "INFO", "msg": "a", "region": "us-east-1" }),
            zoon!({ "level": "INFO", "msg": "b", "region": "us-east-1" }),
            zoon!({ "level": "INFO", "msg": "c", "region": "us-east-1" }),
        ];
        assert_eq!(
            encode(&rows),
            "# @level=INFO @region=us-east-1 msg:s\na\nb\nc\n"
        );
    }

    #[test]
    fn test_row_count_shorthand() {
        let rows = [
            zoon!({ "id": 1, "status": "ok" }),
            zoon!({ "id": 2, "status": "ok" }),
            zoon!({ "id": 3, "status": "ok" }),
        ];
        assert_eq!(encode(&rows), "# @status=ok id:i+ +3\n");
    }

    #[test]
    fn test_typed_constants() {
        let rows = [
            zoon!({ "on": true, "rate": 1.5, "n": 7, "k": "x" }),
            zoon!({ "on": true, "rate": 1.5, "n": 7, "k": "y" }),
        ];
        assert_eq!(encode(&rows), "# @n:7 @on:y @rate:1.5 k:s\nx\ny\n");
    }

    #[test]
    fn test_aliases_for_repeated_prefix() {
        let rows = [
            zoon!({ "infrastructure": { "postgres": { "state": "up" }, "redis": { "state": "up" } } }),
            zoon!({ "infrastructure": { "postgres": { "state": "down" }, "redis": { "state": "down" } } }),
        ];
        assert_eq!(
            encode(&rows),
            "%i=infrastructure\n# %i.postgres.state:s %i.redis.state:s\nup up\ndown down\n"
        );
    }

    #[test]
    fn test_nulls_and_quoting() {
        let rows = [
            zoon!({ "a": "", "b": null, "c": "[x]" }),
            zoon!({ "a": "~", "b": 1, "c": "\"q\"" }),
        ];
        assert_eq!(
            encode(&rows),
            "# a:s b:i c:s\n\"\" ~ \"[x]\"\n\"~\" 1 \"\\\"q\\\"\"\n"
        );
    }

    #[test]
    fn test_indexed_enum_rows() {
        let statuses = ["approved", "pending_review", "rejected"];
        let rows: Vec<_> = (0..12)
            .map(|i| zoon!({ "status": (statuses[i % 3]), "n": (i as i64) }))
            .collect();
        let text = encode(&rows);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("# n:i status!approved|pending_review|rejected")
        );
        assert_eq!(lines.next(), Some("0 0"));
        assert_eq!(lines.next(), Some("1 1"));
        assert_eq!(lines.next(), Some("2 2"));
        assert_eq!(lines.next(), Some("3 0"));
    }

    #[test]
    fn test_text_column_is_quoted() {
        let quoted = "said \"hello\" to everyone in the room today";
        let long = "x".repeat(60);
        let rows = [
            zoon!({ "bio": (quoted) }),
            zoon!({ "bio": (long.clone()) }),
            zoon!({ "bio": null }),
        ];
        assert_eq!(
            encode(&rows),
            format!(
                "# bio:t\n\"said \\\"hello\\\" to everyone in the room today\"\n\"{}\"\n~\n",
                long
            )
        );
    }

    #[test]
    fn test_verbatim_options() {
        let rows = [zoon!({ "id": 1, "k": "x" }), zoon!({ "id": 2, "k": "x" })];
        let text = encode_tabular(&rows, &ZoonOptions::verbatim()).unwrap();
        assert_eq!(text, "# id:i k:s\n1 x\n2 x\n");
    }

    #[test]
    fn test_rejects_scalar_rows() {
        assert!(encode_tabular(&[ZoonValue::from(1)], &ZoonOptions::default()).is_err());
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(encode(&[]), "");
    }
}
