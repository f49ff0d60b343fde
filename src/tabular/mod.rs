//! The tabular form: an array of records as a typed header plus one line
//! per row.
//!
//! ```text
//! %i=infrastructure
//! # @region=us-east-1 id:i+ %i.postgres.state=up|down name:s
//! up web-1
//! down web-2
//! ```
//!
//! Nested records are flattened to dotted column paths. The encoder picks a
//! column type from the data: `i`, `i+` for an `id` counting from one, `b`,
//! `s`, `t` for long text, and literal (`=a|b`) or indexed (`!a|b`) enums.
//! Fields equal in every row are hoisted into `@` constants, and repeated
//! path prefixes are shortened through `%` aliases.

mod column;
mod decode;
mod encode;

pub use decode::decode_tabular;
pub use encode::encode_tabular;
