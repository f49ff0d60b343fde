//! The `#` header line of a tabular document.
//!
//! ```text
//! # @region=us-east-1 id:i+ name:s role=Admin|User status!active|idle|gone +3
//! ```
//!
//! Tokens are `+N` (explicit row count), `@name<sep>value` (constant) or
//! `name<sep>spec` (column). Names may start with a `%alias`.

use crate::alias::AliasTable;
use crate::coerce::{encode_spaces, parse_primitive, TypeHint};
use crate::grammar::Separator;
use crate::ZoonValue;

/// Declared type of a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// `:i`
    Int,
    /// `:i+`, generated `1..=N`, no cell per row
    AutoIncrement,
    /// `:b`, cells are `1`/`0`
    Bool,
    /// `:s`
    Str,
    /// `:t`, cells are quoted
    Text,
    /// `=a|b|c`, cells hold the literal value
    Enum(Vec<String>),
    /// `!a|b|c`, cells hold the index of the value
    IndexedEnum(Vec<String>),
    /// `:` followed by an unknown code, decoded by inference
    Inferred(String),
}

impl ColumnType {
    fn parse(separator: Separator, spec: &str) -> ColumnType {
        match separator {
            Separator::Text => ColumnType::Enum(split_options(spec)),
            Separator::Indexed => ColumnType::IndexedEnum(split_options(spec)),
            Separator::Typed => match spec {
                "i" => ColumnType::Int,
                "i+" => ColumnType::AutoIncrement,
                "b" => ColumnType::Bool,
                "s" => ColumnType::Str,
                "t" => ColumnType::Text,
                other => ColumnType::Inferred(other.to_string()),
            },
        }
    }

    /// Coercion applied to this column's cells.
    #[must_use]
    pub fn hint(&self) -> TypeHint {
        match self {
            ColumnType::Int | ColumnType::AutoIncrement => TypeHint::Int,
            ColumnType::Bool => TypeHint::Bool,
            ColumnType::Str | ColumnType::Enum(_) | ColumnType::IndexedEnum(_) => TypeHint::Str,
            ColumnType::Text => TypeHint::Text,
            ColumnType::Inferred(_) => TypeHint::Auto,
        }
    }

    /// Whether each row carries a cell for this column.
    #[must_use]
    pub fn consumes_cell(&self) -> bool {
        !matches!(self, ColumnType::AutoIncrement)
    }

    fn render_spec(&self) -> String {
        match self {
            ColumnType::Int => ":i".to_string(),
            ColumnType::AutoIncrement => ":i+".to_string(),
            ColumnType::Bool => ":b".to_string(),
            ColumnType::Str => ":s".to_string(),
            ColumnType::Text => ":t".to_string(),
            ColumnType::Enum(options) => format!("={}", options.join("|")),
            ColumnType::IndexedEnum(options) => format!("!{}", options.join("|")),
            ColumnType::Inferred(code) => format!(":{}", code),
        }
    }
}

fn split_options(spec: &str) -> Vec<String> {
    spec.split('|').map(str::to_string).collect()
}

/// A column declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Full dotted path, aliases expanded.
    pub name: String,
    pub ty: ColumnType,
}

/// A constant declaration, applied to every row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant {
    /// Full dotted path, aliases expanded.
    pub name: String,
    pub separator: Separator,
    /// Value as written, spaces still encoded as `_`.
    pub raw: String,
}

impl Constant {
    /// `=` constants are strings; `:` constants are inferred.
    #[must_use]
    pub fn hint(&self) -> TypeHint {
        match self.separator {
            Separator::Text => TypeHint::Str,
            Separator::Typed | Separator::Indexed => TypeHint::Auto,
        }
    }

    #[must_use]
    pub fn value(&self) -> ZoonValue {
        parse_primitive(&self.raw, self.hint())
    }
}

/// A parsed header line.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::alias::AliasTable;
/// use serde_zoon::header::{ColumnType, Header};
///
/// let header = Header::parse("# @level=INFO id:i+ msg:s +2", &AliasTable::new());
/// assert_eq!(header.row_count, Some(2));
/// assert_eq!(header.constants[0].name, "level");
/// assert_eq!(header.columns[0].ty, ColumnType::AutoIncrement);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub row_count: Option<usize>,
    pub constants: Vec<Constant>,
    pub columns: Vec<Column>,
}

impl Header {
    /// Parses a header line, expanding aliases through `aliases`.
    ///
    /// Tokens without a separator and malformed row counts are skipped.
    #[must_use]
    pub fn parse(line: &str, aliases: &AliasTable) -> Header {
        let body = line.strip_prefix('#').unwrap_or(line);
        let mut header = Header::default();

        for token in body.split_whitespace() {
            if let Some(count) = token.strip_prefix('+') {
                match count.parse() {
                    Ok(n) => header.row_count = Some(n),
                    Err(_) => tracing::trace!(token, "ignoring malformed row count"),
                }
                continue;
            }

            let (is_constant, decl) = match token.strip_prefix('@') {
                Some(rest) => (true, rest),
                None => (false, token),
            };
            let Some(sep_idx) = decl.find([':', '=', '!']) else {
                tracing::trace!(token, "ignoring header token without separator");
                continue;
            };

            let name = aliases.expand(&decl[..sep_idx]).into_owned();
            let Some(separator) = decl[sep_idx..].chars().next().and_then(Separator::from_char)
            else {
                continue;
            };
            let spec = &decl[sep_idx + 1..];

            if is_constant {
                header.constants.push(Constant {
                    name,
                    separator,
                    raw: spec.to_string(),
                });
            } else {
                header.columns.push(Column {
                    name,
                    ty: ColumnType::parse(separator, spec),
                });
            }
        }

        header
    }

    /// Renders the header line, compressing names through `aliases`.
    ///
    /// Constants come first, then columns, then the row count.
    #[must_use]
    pub fn render(&self, aliases: &AliasTable) -> String {
        let mut line = String::from("#");

        for constant in &self.constants {
            line.push_str(" @");
            line.push_str(&render_name(&constant.name, aliases));
            line.push(constant.separator.as_char());
            line.push_str(&constant.raw);
        }
        for column in &self.columns {
            line.push(' ');
            line.push_str(&render_name(&column.name, aliases));
            line.push_str(&column.ty.render_spec());
        }
        if let Some(n) = self.row_count {
            line.push_str(&format!(" +{}", n));
        }

        line
    }
}

fn render_name(path: &str, aliases: &AliasTable) -> String {
    encode_spaces(&aliases.compress(path)).into_owned()
}
