use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::{append_list, parse_list, Element, Error, FieldType, TupleParser};

/////////////////////////////////////////////// Value //////////////////////////////////////////////

/// A single decoded field.  There is exactly one variant per [FieldType].
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Value {
    Bytes(Vec<u8>),
    BytesList(Vec<Vec<u8>>),
    String(String),
    StringList(Vec<String>),
    Bool(bool),
    Int8(i8),
    Int8List(Vec<i8>),
    Uint8(u8),
    Int16(i16),
    Int16List(Vec<i16>),
    Int32(i32),
    Int32List(Vec<i32>),
    Uint32(u32),
    Uint32List(Vec<u32>),
    Int64(i64),
    Int64List(Vec<i64>),
    Uint64(u64),
    Uint64List(Vec<u64>),
}

impl Value {
    /// The type of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Bytes(_) => FieldType::Bytes,
            Value::BytesList(_) => FieldType::BytesList,
            Value::String(_) => FieldType::String,
            Value::StringList(_) => FieldType::StringList,
            Value::Bool(_) => FieldType::Bool,
            Value::Int8(_) => FieldType::Int8,
            Value::Int8List(_) => FieldType::Int8List,
            Value::Uint8(_) => FieldType::Uint8,
            Value::Int16(_) => FieldType::Int16,
            Value::Int16List(_) => FieldType::Int16List,
            Value::Int32(_) => FieldType::Int32,
            Value::Int32List(_) => FieldType::Int32List,
            Value::Uint32(_) => FieldType::Uint32,
            Value::Uint32List(_) => FieldType::Uint32List,
            Value::Int64(_) => FieldType::Int64,
            Value::Int64List(_) => FieldType::Int64List,
            Value::Uint64(_) => FieldType::Uint64,
            Value::Uint64List(_) => FieldType::Uint64List,
        }
    }

    /// Append the order-preserving encoding of this value to `buf`.
    pub fn append_to(&self, buf: &mut Vec<u8>) {
        match self {
            Value::Bytes(x) => x.append_to(buf),
            Value::BytesList(x) => append_list(x, buf),
            Value::String(x) => x.append_to(buf),
            Value::StringList(x) => append_list(x, buf),
            Value::Bool(x) => x.append_to(buf),
            Value::Int8(x) => x.append_to(buf),
            Value::Int8List(x) => append_list(x, buf),
            Value::Uint8(x) => x.append_to(buf),
            Value::Int16(x) => x.append_to(buf),
            Value::Int16List(x) => append_list(x, buf),
            Value::Int32(x) => x.append_to(buf),
            Value::Int32List(x) => append_list(x, buf),
            Value::Uint32(x) => x.append_to(buf),
            Value::Uint32List(x) => append_list(x, buf),
            Value::Int64(x) => x.append_to(buf),
            Value::Int64List(x) => append_list(x, buf),
            Value::Uint64(x) => x.append_to(buf),
            Value::Uint64List(x) => append_list(x, buf),
        }
    }

    /// Parse the next field of `parser` as a value of `field_type`.
    pub fn parse_from(field_type: FieldType, parser: &mut TupleParser<'_>) -> Result<Self, Error> {
        Ok(match field_type {
            FieldType::Bytes => Value::Bytes(Element::parse_from(parser)?),
            FieldType::BytesList => Value::BytesList(parse_list(parser, field_type)?),
            FieldType::String => Value::String(Element::parse_from(parser)?),
            FieldType::StringList => Value::StringList(parse_list(parser, field_type)?),
            FieldType::Bool => Value::Bool(Element::parse_from(parser)?),
            FieldType::Int8 => Value::Int8(Element::parse_from(parser)?),
            FieldType::Int8List => Value::Int8List(parse_list(parser, field_type)?),
            FieldType::Uint8 => Value::Uint8(Element::parse_from(parser)?),
            FieldType::Int16 => Value::Int16(Element::parse_from(parser)?),
            FieldType::Int16List => Value::Int16List(parse_list(parser, field_type)?),
            FieldType::Int32 => Value::Int32(Element::parse_from(parser)?),
            FieldType::Int32List => Value::Int32List(parse_list(parser, field_type)?),
            FieldType::Uint32 => Value::Uint32(Element::parse_from(parser)?),
            FieldType::Uint32List => Value::Uint32List(parse_list(parser, field_type)?),
            FieldType::Int64 => Value::Int64(Element::parse_from(parser)?),
            FieldType::Int64List => Value::Int64List(parse_list(parser, field_type)?),
            FieldType::Uint64 => Value::Uint64(Element::parse_from(parser)?),
            FieldType::Uint64List => Value::Uint64List(parse_list(parser, field_type)?),
        })
    }

    /// Parse a human-written literal as a value of `field_type`.
    ///
    /// Text and byte strings are taken verbatim.  Integers are decimal.  Booleans accept `1`, `t`,
    /// `T`, `TRUE`, `true`, `True` and their false counterparts.  Sequences are written the way
    /// [Value] displays them, `[1 2 3]`, with the brackets optional.
    pub fn parse(field_type: FieldType, literal: &str) -> Result<Self, Error> {
        let invalid = |what: String| Error::InvalidLiteral {
            field_type,
            literal: literal.to_string(),
            what,
        };
        Ok(match field_type {
            FieldType::Bytes => Value::Bytes(literal.as_bytes().to_vec()),
            FieldType::BytesList => Value::BytesList(
                list_elements(literal)
                    .map(|elem| elem.as_bytes().to_vec())
                    .collect(),
            ),
            FieldType::String => Value::String(literal.to_string()),
            FieldType::StringList => {
                Value::StringList(list_elements(literal).map(str::to_string).collect())
            }
            FieldType::Bool => Value::Bool(parse_bool(literal.trim()).ok_or_else(|| {
                invalid("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False".to_string())
            })?),
            FieldType::Int8 => Value::Int8(parse_number(literal).map_err(invalid)?),
            FieldType::Int8List => Value::Int8List(parse_numbers(literal).map_err(invalid)?),
            FieldType::Uint8 => Value::Uint8(parse_number(literal).map_err(invalid)?),
            FieldType::Int16 => Value::Int16(parse_number(literal).map_err(invalid)?),
            FieldType::Int16List => Value::Int16List(parse_numbers(literal).map_err(invalid)?),
            FieldType::Int32 => Value::Int32(parse_number(literal).map_err(invalid)?),
            FieldType::Int32List => Value::Int32List(parse_numbers(literal).map_err(invalid)?),
            FieldType::Uint32 => Value::Uint32(parse_number(literal).map_err(invalid)?),
            FieldType::Uint32List => Value::Uint32List(parse_numbers(literal).map_err(invalid)?),
            FieldType::Int64 => Value::Int64(parse_number(literal).map_err(invalid)?),
            FieldType::Int64List => Value::Int64List(parse_numbers(literal).map_err(invalid)?),
            FieldType::Uint64 => Value::Uint64(parse_number(literal).map_err(invalid)?),
            FieldType::Uint64List => Value::Uint64List(parse_numbers(literal).map_err(invalid)?),
        })
    }
}

impl Display for Value {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bytes(x) => write_bytes(fmt, x),
            Value::BytesList(x) => {
                write!(fmt, "[")?;
                for (idx, bytes) in x.iter().enumerate() {
                    if idx > 0 {
                        write!(fmt, " ")?;
                    }
                    write_bytes(fmt, bytes)?;
                }
                write!(fmt, "]")
            }
            Value::String(x) => write!(fmt, "{x}"),
            Value::StringList(x) => write_list(fmt, x),
            Value::Bool(x) => write!(fmt, "{x}"),
            Value::Int8(x) => write!(fmt, "{x}"),
            Value::Int8List(x) => write_list(fmt, x),
            Value::Uint8(x) => write!(fmt, "{x}"),
            Value::Int16(x) => write!(fmt, "{x}"),
            Value::Int16List(x) => write_list(fmt, x),
            Value::Int32(x) => write!(fmt, "{x}"),
            Value::Int32List(x) => write_list(fmt, x),
            Value::Uint32(x) => write!(fmt, "{x}"),
            Value::Uint32List(x) => write_list(fmt, x),
            Value::Int64(x) => write!(fmt, "{x}"),
            Value::Int64List(x) => write_list(fmt, x),
            Value::Uint64(x) => write!(fmt, "{x}"),
            Value::Uint64List(x) => write_list(fmt, x),
        }
    }
}

/// Write `bytes` as a bracketed list of decimal bytes, e.g. `[104 105]`.
fn write_bytes(fmt: &mut Formatter<'_>, bytes: &[u8]) -> std::fmt::Result {
    write_list(fmt, bytes)
}

fn write_list<T: Display>(fmt: &mut Formatter<'_>, elems: &[T]) -> std::fmt::Result {
    write!(fmt, "[")?;
    for (idx, elem) in elems.iter().enumerate() {
        if idx > 0 {
            write!(fmt, " ")?;
        }
        write!(fmt, "{elem}")?;
    }
    write!(fmt, "]")
}

fn list_elements(literal: &str) -> impl Iterator<Item = &str> {
    let trimmed = literal.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(trimmed)
        .split_whitespace()
}

fn parse_bool(literal: &str) -> Option<bool> {
    match literal {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_number<N>(literal: &str) -> Result<N, String>
where
    N: FromStr,
    <N as FromStr>::Err: Display,
{
    literal.trim().parse::<N>().map_err(|err| err.to_string())
}

fn parse_numbers<N>(literal: &str) -> Result<Vec<N>, String>
where
    N: FromStr,
    <N as FromStr>::Err: Display,
{
    list_elements(literal).map(parse_number).collect()
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
