//! Parse format strings into schemas.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lex_tuple::FieldType;

use super::catalog;
use super::Error;

///////////////////////////////////////////// RawMode //////////////////////////////////////////////

/// How to print the bytes that remain after the last field of a schema.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RawMode {
    /// Consume the remainder silently.
    #[default]
    None,
    /// Print the remainder as a list of decimal bytes.
    Bytes,
    /// Print the remainder as text, replacing invalid UTF-8.
    Text,
}

///////////////////////////////////////////// FieldSpec ////////////////////////////////////////////

/// One field of a schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    pub field_type: FieldType,
    /// Ignored fields are decoded but not printed.
    pub ignored: bool,
}

impl Display for FieldSpec {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ignored {
            write!(fmt, "-")?;
        }
        write!(fmt, "{}", self.field_type)
    }
}

////////////////////////////////////////////// Schema //////////////////////////////////////////////

/// The ordered fields of one side of a record, plus what to do with the bytes that follow them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    raw: RawMode,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>, raw: RawMode) -> Self {
        Self { fields, raw }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn raw_mode(&self) -> RawMode {
        self.raw
    }

    /// True when the schema declares no fields.  It may still print raw bytes.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The layout to decode with, ignored fields included.
    pub fn field_types(&self) -> Vec<FieldType> {
        self.fields.iter().map(|f| f.field_type).collect()
    }
}

impl Display for Schema {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for field in self.fields.iter() {
            write!(fmt, "{}{}", sep, field)?;
            sep = ",";
        }
        match self.raw {
            RawMode::None => Ok(()),
            RawMode::Bytes => write!(fmt, "{}raw", sep),
            RawMode::Text => write!(fmt, "{}raw_string", sep),
        }
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_format(s)
    }
}

/////////////////////////////////////////// parse_format ///////////////////////////////////////////

/// Parse a comma-separated format string.
///
/// Tokens are trimmed and empty tokens are skipped, so `""` is the empty schema.  A leading `-`
/// marks a field ignored.  `raw` and `raw_string` select the [RawMode] wherever they appear and the
/// last one wins; `-raw` and `-raw_string` reset it to [RawMode::None].  Every other token must be
/// in the [catalog].
pub fn parse_format(format: &str) -> Result<Schema, Error> {
    let mut fields = Vec::new();
    let mut raw = RawMode::None;
    for token in format.split(',') {
        let token = token.trim();
        let (ignored, name) = match token.strip_prefix('-') {
            Some(name) => (true, name.trim()),
            None => (false, token),
        };
        if name.is_empty() {
            continue;
        }
        match (name, ignored) {
            ("raw", false) => raw = RawMode::Bytes,
            ("raw_string", false) => raw = RawMode::Text,
            ("raw", true) | ("raw_string", true) => raw = RawMode::None,
            _ => match catalog::lookup(name) {
                Some(field_type) => fields.push(FieldSpec {
                    field_type,
                    ignored,
                }),
                None => {
                    return Err(Error::InvalidFormatToken {
                        token: token.to_string(),
                    });
                }
            },
        }
    }
    Ok(Schema { fields, raw })
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
