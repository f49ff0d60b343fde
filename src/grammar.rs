//! Lexical rules shared by the tabular and inline codecs.
//!
//! - [`InlineParser`] splits `key:value key=value key:{...}` text into [`InlinePair`]s
//! - [`tokenize_row`] splits a tabular data line into [`RowToken`]s
//! - [`alias_definitions`] reads the `%alias=prefix` tokens of an alias line

use crate::{Error, Result};
use std::borrow::Cow;

/// Separator between a name and its value or type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    /// `:` typed or inferred value
    Typed,
    /// `=` string value, spaces written as `_`
    Text,
    /// `!` indexed enum
    Indexed,
}

impl Separator {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ':' => Some(Separator::Typed),
            '=' => Some(Separator::Text),
            '!' => Some(Separator::Indexed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Separator::Typed => ':',
            Separator::Text => '=',
            Separator::Indexed => '!',
        }
    }
}

/// One `key<sep>value` unit of the inline form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlinePair<'a> {
    pub key: &'a str,
    pub separator: Separator,
    pub value: &'a str,
}

/// Parser for the inline form.
///
/// Pairs are separated by runs of whitespace. A `:` value opening with `{`
/// runs to its matching `}`, and one opening with `[` to its matching `]`, so
/// nested records and lists may contain spaces. A `=` value is text up to the
/// next space.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::grammar::{InlineParser, Separator};
///
/// let pairs = InlineParser::new("host=db port:5432 tls:{on:y}").parse().unwrap();
/// assert_eq!(pairs.len(), 3);
/// assert_eq!(pairs[0].separator, Separator::Text);
/// assert_eq!(pairs[2].value, "{on:y}");
/// ```
pub struct InlineParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> InlineParser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        InlineParser { input, pos: 0 }
    }

    /// Parses every pair in the input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when a key has no separator or a brace or
    /// bracket is never closed.
    pub fn parse(mut self) -> Result<Vec<InlinePair<'a>>> {
        let mut pairs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                return Ok(pairs);
            }
            pairs.push(self.parse_pair()?);
        }
    }

    fn parse_pair(&mut self) -> Result<InlinePair<'a>> {
        let bytes = self.input.as_bytes();
        let key_start = self.pos;
        while self.pos < bytes.len() && !matches!(bytes[self.pos], b':' | b'=') {
            if is_separator_space(bytes[self.pos]) {
                return Err(self.error_at(key_start, "expected `:` or `=` after key"));
            }
            self.pos += 1;
        }
        let key = &self.input[key_start..self.pos];

        let separator = match bytes.get(self.pos) {
            Some(b':') => Separator::Typed,
            Some(b'=') => Separator::Text,
            _ => return Err(self.error_at(key_start, "unexpected end of input after key")),
        };
        if key.is_empty() {
            return Err(self.error_at(key_start, "empty key"));
        }
        self.pos += 1;

        let value_start = self.pos;
        match (separator, bytes.get(self.pos)) {
            (Separator::Typed, Some(b'{')) => self.skip_record()?,
            (Separator::Typed, Some(b'[')) => self.skip_balanced(b'[', b']')?,
            // `=` values are plain text up to the next space.
            _ => {
                while self.pos < bytes.len() && !is_separator_space(bytes[self.pos]) {
                    self.pos += 1;
                }
            }
        }

        Ok(InlinePair {
            key,
            separator,
            value: &self.input[value_start..self.pos],
        })
    }

    /// Skips a `{...}` record. Braces inside `=` values are text, except a
    /// run of `}` ending the value, which closes records.
    fn skip_record(&mut self) -> Result<()> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_text = false;
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            self.pos += 1;
            if in_text {
                if is_separator_space(b) {
                    in_text = false;
                    continue;
                }
                let closes = b == b'}'
                    && bytes[self.pos..]
                        .iter()
                        .take_while(|c| !is_separator_space(**c))
                        .all(|c| *c == b'}');
                if !closes {
                    continue;
                }
            } else if b == b'=' {
                in_text = true;
                continue;
            } else if b == b'{' {
                depth += 1;
                continue;
            } else if b != b'}' {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                return Ok(());
            }
        }
        Err(self.error_at(start, "unterminated `{`"))
    }

    fn skip_balanced(&mut self, open: u8, close: u8) -> Result<()> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut depth = 0usize;
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            self.pos += 1;
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        let msg = format!("unterminated `{}`", open as char);
        Err(self.error_at(start, &msg))
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && is_separator_space(bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn error_at(&self, offset: usize, msg: &str) -> Error {
        let before = &self.input[..offset];
        let line = before.matches('\n').count() + 1;
        let col = offset - before.rfind('\n').map_or(0, |i| i + 1) + 1;
        Error::syntax(line, col, msg)
    }
}

fn is_separator_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// Parses the inline form into pairs.
///
/// # Errors
///
/// See [`InlineParser::parse`].
pub fn parse_inline(input: &str) -> Result<Vec<InlinePair<'_>>> {
    InlineParser::new(input).parse()
}

/// One cell of a tabular data line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowToken<'a> {
    pub text: Cow<'a, str>,
    /// The cell was written in double quotes and is literal text.
    pub quoted: bool,
}

impl RowToken<'_> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Splits a data line into cells.
///
/// Cells are separated by spaces. A cell opening with `"` runs to the closing
/// quote; `\"`, `\\`, `\n`, `\r` and `\t` inside it are unescaped. A cell
/// opening with `[` runs to the matching `]` and is kept verbatim.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::grammar::tokenize_row;
///
/// let cells = tokenize_row(r#"1 "say \"hi\"" [a b] x"#);
/// let texts: Vec<&str> = cells.iter().map(|c| c.as_str()).collect();
/// assert_eq!(texts, vec!["1", "say \"hi\"", "[a b]", "x"]);
/// assert!(cells[1].quoted);
/// ```
#[must_use]
pub fn tokenize_row(line: &str) -> Vec<RowToken<'_>> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && matches!(bytes[i], b' ' | b'\t') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        match bytes[i] {
            b'"' => {
                let (text, end) = read_quoted(line, i + 1);
                tokens.push(RowToken { text, quoted: true });
                i = end;
            }
            b'[' => {
                let mut depth = 0usize;
                let mut end = i;
                while end < bytes.len() {
                    match bytes[end] {
                        b'[' => depth += 1,
                        b']' => {
                            depth -= 1;
                            if depth == 0 {
                                end += 1;
                                break;
                            }
                        }
                        _ => {}
                    }
                    end += 1;
                }
                tokens.push(RowToken {
                    text: Cow::Borrowed(&line[i..end]),
                    quoted: false,
                });
                i = end;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t') {
                    i += 1;
                }
                tokens.push(RowToken {
                    text: Cow::Borrowed(&line[start..i]),
                    quoted: false,
                });
            }
        }
    }

    tokens
}

/// Reads a quoted cell whose body starts at `start`, returning the text and
/// the offset just past the closing quote. An unterminated cell runs to the end.
fn read_quoted(line: &str, start: usize) -> (Cow<'_, str>, usize) {
    let bytes = line.as_bytes();
    let mut end = start;
    let mut escaped = false;
    while end < bytes.len() {
        match bytes[end] {
            b'\\' if end + 1 < bytes.len() => {
                escaped = true;
                end += 2;
            }
            b'"' => {
                let body = &line[start..end];
                let text = if escaped {
                    Cow::Owned(unescape(body))
                } else {
                    Cow::Borrowed(body)
                };
                return (text, end + 1);
            }
            _ => end += 1,
        }
    }
    let body = &line[start.min(bytes.len())..];
    let text = if escaped {
        Cow::Owned(unescape(body))
    } else {
        Cow::Borrowed(body)
    };
    (text, bytes.len())
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Writes `text` as a quoted cell, escaping what [`tokenize_row`] unescapes.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Reads the `%alias=prefix` tokens of an alias line.
///
/// Tokens without `=` or without a leading `%` are skipped.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::grammar::alias_definitions;
///
/// let defs: Vec<_> = alias_definitions("%i=infrastructure %s=services junk").collect();
/// assert_eq!(defs, vec![("i", "infrastructure"), ("s", "services")]);
/// ```
pub fn alias_definitions(line: &str) -> impl Iterator<Item = (&str, &str)> {
    line.split_whitespace().filter_map(|token| {
        let body = token.strip_prefix('%')?;
        let (alias, prefix) = body.split_once('=')?;
        let alias = alias.strip_prefix('%').unwrap_or(alias);
        if alias.is_empty() || prefix.is_empty() {
            tracing::trace!(token, "skipping malformed alias definition");
            return None;
        }
        Some((alias, prefix))
    })
}
