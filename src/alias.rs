//! Short aliases for repeated dotted-path prefixes.
//!
//! A tabular document whose columns share a long prefix declares it once on an
//! alias line (`%i=infrastructure`) and refers to it as `%i.redis.state`.
//! Each document builds its own table; nothing is shared between calls.

use crate::coerce::encode_spaces;
use crate::grammar::alias_definitions;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

/// Bidirectional alias ⇄ prefix table for one document.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::alias::AliasTable;
///
/// let mut table = AliasTable::new();
/// table.insert("i", "infrastructure");
///
/// assert_eq!(table.compress("infrastructure.redis.state"), "%i.redis.state");
/// assert_eq!(table.expand("%i.redis.state"), "infrastructure.redis.state");
/// assert_eq!(table.definition_line().as_deref(), Some("%i=infrastructure"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    by_alias: BTreeMap<String, String>,
    by_prefix: BTreeMap<String, String>,
}

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` for `prefix`, replacing any earlier definition of the alias.
    pub fn insert(&mut self, alias: &str, prefix: &str) {
        if let Some(old_prefix) = self.by_alias.insert(alias.to_string(), prefix.to_string()) {
            self.by_prefix.remove(&old_prefix);
        }
        self.by_prefix.insert(prefix.to_string(), alias.to_string());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }

    #[must_use]
    pub fn prefix_of(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    #[must_use]
    pub fn alias_of(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    /// Adds the definitions found on an alias line. Malformed tokens are ignored.
    pub fn absorb_line(&mut self, line: &str) {
        for (alias, prefix) in alias_definitions(line) {
            self.insert(alias, prefix);
        }
    }

    /// Renders the alias line, definitions sorted by alias, or `None` when empty.
    /// Spaces in a prefix are written as `_`, as in header names.
    #[must_use]
    pub fn definition_line(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let defs: Vec<String> = self
            .by_alias
            .iter()
            .map(|(alias, prefix)| format!("%{}={}", alias, encode_spaces(prefix)))
            .collect();
        Some(defs.join(" "))
    }

    /// Rewrites `path` with the alias of its longest registered prefix.
    #[must_use]
    pub fn compress<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let best = self
            .by_prefix
            .iter()
            .filter(|(prefix, _)| {
                path == prefix.as_str()
                    || (path.starts_with(prefix.as_str())
                        && path.as_bytes().get(prefix.len()) == Some(&b'.'))
            })
            .max_by_key(|(prefix, _)| prefix.len());

        match best {
            Some((prefix, alias)) => Cow::Owned(format!("%{}{}", alias, &path[prefix.len()..])),
            None => Cow::Borrowed(path),
        }
    }

    /// Expands a leading `%alias` in `name`. Unknown aliases are left as written.
    #[must_use]
    pub fn expand<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let Some(body) = name.strip_prefix('%') else {
            return Cow::Borrowed(name);
        };
        let (alias, suffix) = match body.split_once('.') {
            Some((alias, suffix)) => (alias, Some(suffix)),
            None => (body, None),
        };
        match (self.prefix_of(alias), suffix) {
            (Some(prefix), Some(suffix)) => Cow::Owned(format!("{}.{}", prefix, suffix)),
            (Some(prefix), None) => Cow::Owned(prefix.to_string()),
            (None, _) => {
                tracing::trace!(name, "unknown alias left unexpanded");
                Cow::Borrowed(name)
            }
        }
    }

    /// Chooses aliases for the prefixes shared by `paths`.
    ///
    /// Every proper prefix is scored as `(len - 2) * count - (len + 4)`, where
    /// `count` is the number of paths under it. Positive scores win, highest
    /// first. An alias is the lowercase first character of the prefix's last
    /// segment, or the next free letter from `a` when that is taken.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::alias::AliasTable;
    ///
    /// let paths = ["infrastructure.postgres.state", "infrastructure.redis.state"];
    /// let table = AliasTable::detect(paths.iter().copied(), 10);
    /// assert_eq!(table.prefix_of("i"), Some("infrastructure"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn detect<'a, I>(paths: I, max_aliases: usize) -> AliasTable
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut prefix_counts: BTreeMap<&str, i64> = BTreeMap::new();
        for path in paths {
            for (idx, _) in path.match_indices('.') {
                *prefix_counts.entry(&path[..idx]).or_insert(0) += 1;
            }
        }

        let mut scored: Vec<(&str, i64)> = prefix_counts
            .into_iter()
            .filter_map(|(prefix, count)| {
                let len = prefix.len() as i64;
                let score = (len - 2) * count - (len + 4);
                (score > 0).then_some((prefix, score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let mut table = AliasTable::new();
        let mut used = BTreeSet::new();
        let mut fallback = b'a';

        for (prefix, score) in scored {
            if table.len() >= max_aliases {
                break;
            }
            let last_segment = prefix.rsplit('.').next().unwrap_or(prefix);
            let preferred = last_segment
                .chars()
                .next()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase());

            let alias = match preferred {
                Some(c) if !used.contains(&c) => Some(c),
                _ => {
                    while fallback <= b'z' && used.contains(&(fallback as char)) {
                        fallback += 1;
                    }
                    (fallback <= b'z').then_some(fallback as char)
                }
            };

            let Some(alias) = alias else {
                break;
            };
            used.insert(alias);
            tracing::trace!(prefix, score, alias = %alias, "alias assigned");
            table.insert(&alias.to_string(), prefix);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prefixes_are_not_worth_it() {
        let paths = ["a.x", "a.y", "a.z"];
        let table = AliasTable::detect(paths.iter().copied(), 10);
        assert!(table.is_empty());
    }

    #[test]
    fn test_collision_falls_back_to_sequential_letters() {
        let paths = [
            "services.web.port",
            "services.web.host",
            "settings.web.port",
            "settings.web.host",
        ];
        let table = AliasTable::detect(paths.iter().copied(), 10);
        // Both "services.web" and "settings.web" end in "web".
        assert_eq!(table.alias_of("services.web"), Some("w"));
        assert_eq!(table.alias_of("settings.web"), Some("a"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_max_aliases_caps_table() {
        let paths = [
            "alpha_branch.one.x",
            "alpha_branch.one.y",
            "bravo_branch.two.x",
            "bravo_branch.two.y",
        ];
        let table = AliasTable::detect(paths.iter().copied(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_compress_prefers_longest_prefix() {
        let mut table = AliasTable::new();
        table.insert("a", "app");
        table.insert("d", "app.database");
        assert_eq!(table.compress("app.database.host"), "%d.host");
        assert_eq!(table.compress("app.cache"), "%a.cache");
        assert_eq!(table.compress("app"), "%a");
        assert_eq!(table.compress("apple.x"), "apple.x");
    }

    #[test]
    fn test_expand_unknown_alias_is_kept() {
        let mut table = AliasTable::new();
        table.insert("s", "server");
        assert_eq!(table.expand("%s"), "server");
        assert_eq!(table.expand("%q.port"), "%q.port");
        assert_eq!(table.expand("plain.name"), "plain.name");
    }

    #[test]
    fn test_prefix_with_spaces_stays_one_token() {
        let paths = [
            "long service name.alpha",
            "long service name.beta",
            "long service name.gamma",
        ];
        let table = AliasTable::detect(paths.iter().copied(), 10);
        let line = table.definition_line().unwrap();
        assert_eq!(line, "%l=long_service_name");

        let mut decoded = AliasTable::new();
        decoded.absorb_line(&line);
        assert_eq!(decoded.expand("%l.alpha"), "long_service_name.alpha");
    }

    #[test]
    fn test_absorb_line_overrides() {
        let mut table = AliasTable::new();
        table.absorb_line("%a=first %b=second");
        table.absorb_line("%a=third");
        assert_eq!(table.prefix_of("a"), Some("third"));
        assert_eq!(table.alias_of("first"), None);
        assert_eq!(
            table.definition_line().as_deref(),
            Some("%a=third %b=second")
        );
    }
}
