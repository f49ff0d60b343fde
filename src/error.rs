//! Error types for ZOON serialization and deserialization.
//!
//! Errors fall into two groups:
//!
//! - **Structural**: the document or the value cannot be represented at all
//!   (missing header, data before the header, unsupported top-level shape,
//!   a decode target of the wrong shape, a path that runs through a scalar).
//! - **Serde**: messages raised by `Serialize`/`Deserialize` implementations.
//!
//! Malformed scalars are not errors. Unparsable numbers decode as zero and
//! unknown fields are ignored, so hand-edited documents still load.
//!
//! ## Examples
//!
//! ```rust
//! use serde_zoon::{from_str, Error};
//!
//! #[derive(Debug, serde::Deserialize)]
//! struct Row { id: i64 }
//!
//! let result: Result<Vec<Row>, Error> = from_str("%a=x\n1 2 3");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during ZOON serialization/deserialization.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed inline pair or brace nesting
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Tabular document without a usable header
    #[error("Invalid ZOON format at line {line}: {msg}")]
    InvalidFormat { line: usize, msg: String },

    /// Value shape that has no ZOON encoding
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Decode target of the wrong shape for the document
    #[error("Invalid decode target: {0}")]
    InvalidTarget(String),

    /// Dotted path that runs through a non-container value
    #[error("Cannot traverse `{segment}` of path `{path}`: found {found}")]
    Traversal {
        path: String,
        segment: String,
        found: String,
    },

    /// Map keys must serialize as strings
    #[error("Map key must be a string, found {0}")]
    MapKey(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::Error;
    ///
    /// let err = Error::syntax(1, 5, "expected `:` or `=` after key");
    /// assert!(err.to_string().contains("column 5"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid format error for a malformed tabular document.
    pub fn invalid_format(line: usize, msg: &str) -> Self {
        Error::InvalidFormat {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error for values that cannot be encoded.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an error for a decode target whose shape does not fit the document.
    pub fn invalid_target(msg: &str) -> Self {
        Error::InvalidTarget(msg.to_string())
    }

    /// Creates a traversal error for `segment` of `path`, naming what was found there.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::Error;
    ///
    /// let err = Error::traversal("a.b", "b", "integer");
    /// assert!(err.to_string().contains("found integer"));
    /// ```
    pub fn traversal(path: &str, segment: &str, found: &str) -> Self {
        Error::Traversal {
            path: path.to_string(),
            segment: segment.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an error for a map key that is not string-like.
    pub fn map_key(found: &str) -> Self {
        Error::MapKey(found.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
