//! tuple_diagnostics renders the records of an ordered key-value store whose keys and values are
//! lexicographic tuples.
//!
//! A format string names the typed fields of one side of a record, in order:
//!
//! ```text
//! uint32,-string,[]int64,raw_string
//! ```
//!
//! Each token is a [FieldType](lex_tuple::FieldType) token.  A leading `-` decodes the field
//! without printing it.  `raw` and `raw_string` print whatever follows the last field as a byte
//! dump or as text.  See [parse_format] for the full grammar, [build_prefix] for restricting a
//! scan to a key prefix, and [RecordPrinter] for driving a scan.

use std::fmt::{Display, Formatter};

pub mod catalog;
pub mod cli;
mod format;
mod formatter;
mod prefix;
mod scan;
mod summary;

pub use format::{parse_format, FieldSpec, RawMode, Schema};
pub use formatter::{format_side, RecordFormatter};
pub use prefix::build_prefix;
pub use scan::{DecodePolicy, RecordPrinter, ScanStats};
pub use summary::{summarize, Summary};

/////////////////////////////////////////////// Side ///////////////////////////////////////////////

/// The half of a record being decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Key,
    Value,
}

impl Display for Side {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Key => write!(fmt, "key"),
            Side::Value => write!(fmt, "value"),
        }
    }
}

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// The tuple_diagnostics Error type.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A format string contained a token that names no field type.
    #[error("invalid format token {token:?}")]
    InvalidFormatToken { token: String },
    /// A key-prefix literal does not parse as the type of its field.
    #[error("key prefix value {index} ({literal:?}) is not a valid {field_type}: {what}")]
    InvalidPrefixValue {
        index: usize,
        field_type: lex_tuple::FieldType,
        literal: String,
        what: String,
    },
    /// The key prefix names more values than the key format has fields.
    #[error("key prefix has {literals} values but the key format has {fields} fields")]
    PrefixExceedsSchema { literals: usize, fields: usize },
    /// A record does not decode under its format.
    #[error("cannot decode {side} of record with key \"{key}\": {what}")]
    CorruptRecord { side: Side, key: String, what: String },
    /// The store failed.
    #[error("store error: {what}")]
    Store { what: String },
    /// Writing output failed.
    #[error("i/o error: {what}")]
    Io { what: String },
    /// The command line is unusable.
    #[error("{what}")]
    CommandLine { what: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            what: err.to_string(),
        }
    }
}

/// Escape a key for inclusion in a message.
pub(crate) fn escape_key(key: &[u8]) -> String {
    key.iter()
        .flat_map(|b| std::ascii::escape_default(*b))
        .map(char::from)
        .collect()
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_printable_and_not() {
        assert_eq!("abc", escape_key(b"abc"));
        assert_eq!("\\x00\\x01a\\xff", escape_key(b"\x00\x01a\xff"));
        assert_eq!("\\\"q\\\"", escape_key(b"\"q\""));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            "invalid format token \"uint99\"",
            Error::InvalidFormatToken {
                token: "uint99".to_string()
            }
            .to_string()
        );
        assert_eq!(
            "key prefix has 3 values but the key format has 2 fields",
            Error::PrefixExceedsSchema {
                literals: 3,
                fields: 2
            }
            .to_string()
        );
        assert_eq!(
            "cannot decode value of record with key \"k\\x00\": truncated",
            Error::CorruptRecord {
                side: Side::Value,
                key: escape_key(b"k\x00"),
                what: "truncated".to_string(),
            }
            .to_string()
        );
    }
}
