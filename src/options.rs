//! Configuration options for ZOON encoding.
//!
//! The tabular encoder compresses arrays of records with a handful of
//! heuristics. [`ZoonOptions`] switches them on or off and tunes their
//! thresholds. Decoding needs no options: every document describes itself.
//!
//! ## Examples
//!
//! ```rust
//! use serde_zoon::{to_string_with_options, ZoonOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Log { level: String, msg: String }
//!
//! let logs = vec![
//!     Log { level: "INFO".into(), msg: "start".into() },
//!     Log { level: "INFO".into(), msg: "stop".into() },
//! ];
//!
//! // Default: `level` is hoisted into the header as a constant
//! let zoon = serde_zoon::to_string(&logs).unwrap();
//! assert!(zoon.starts_with("# @level=INFO"));
//!
//! // Keep every column explicit
//! let options = ZoonOptions::new().with_hoist_constants(false);
//! let zoon = to_string_with_options(&logs, options).unwrap();
//! assert!(zoon.starts_with("# level=INFO msg:s"));
//! ```

/// Encoder configuration for the tabular form.
///
/// The defaults are the values the format is tuned for:
///
/// | option | default |
/// |---|---|
/// | `hoist_constants` | `true` |
/// | `detect_aliases` | `true` |
/// | `max_aliases` | `10` |
/// | `max_enum_values` | `10` |
/// | `text_threshold` | `30` |
/// | `auto_increment` | `true` |
///
/// # Examples
///
/// ```rust
/// use serde_zoon::ZoonOptions;
///
/// let options = ZoonOptions::new()
///     .with_max_enum_values(4)
///     .with_text_threshold(60);
/// assert_eq!(options.max_enum_values, 4);
/// assert!(options.detect_aliases);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoonOptions {
    /// Promote columns whose value is identical in every row to `@name` header constants.
    pub hoist_constants: bool,
    /// Replace repeated dotted-path prefixes with `%alias` tokens.
    pub detect_aliases: bool,
    /// Upper bound on the number of aliases declared per document.
    pub max_aliases: usize,
    /// Largest number of distinct values (null included) a column may have to become an enum.
    pub max_enum_values: usize,
    /// Average cell length above which a string column is emitted as quoted text.
    pub text_threshold: usize,
    /// Encode an `id` column holding exactly `1..=N` as `i+` with no per-row values.
    pub auto_increment: bool,
}

impl Default for ZoonOptions {
    fn default() -> Self {
        ZoonOptions {
            hoist_constants: true,
            detect_aliases: true,
            max_aliases: 10,
            max_enum_values: 10,
            text_threshold: 30,
            auto_increment: true,
        }
    }
}

impl ZoonOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every compression heuristic switched off.
    ///
    /// Each column is written out on every row, with no constants, aliases,
    /// enums or generated ids. Useful when the output is diffed or post-processed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::ZoonOptions;
    ///
    /// let options = ZoonOptions::verbatim();
    /// assert!(!options.hoist_constants);
    /// assert_eq!(options.max_enum_values, 0);
    /// ```
    #[must_use]
    pub fn verbatim() -> Self {
        ZoonOptions {
            hoist_constants: false,
            detect_aliases: false,
            max_aliases: 0,
            max_enum_values: 0,
            text_threshold: 30,
            auto_increment: false,
        }
    }

    #[must_use]
    pub fn with_hoist_constants(mut self, enabled: bool) -> Self {
        self.hoist_constants = enabled;
        self
    }

    #[must_use]
    pub fn with_detect_aliases(mut self, enabled: bool) -> Self {
        self.detect_aliases = enabled;
        self
    }

    /// Sets the maximum number of aliases. Zero disables alias detection.
    #[must_use]
    pub fn with_max_aliases(mut self, max: usize) -> Self {
        self.max_aliases = max;
        self
    }

    /// Sets the enum threshold. Zero disables enum columns.
    #[must_use]
    pub fn with_max_enum_values(mut self, max: usize) -> Self {
        self.max_enum_values = max;
        self
    }

    #[must_use]
    pub fn with_text_threshold(mut self, threshold: usize) -> Self {
        self.text_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = enabled;
        self
    }

    pub(crate) fn aliases_enabled(&self) -> bool {
        self.detect_aliases && self.max_aliases > 0
    }
}
