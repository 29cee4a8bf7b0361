//! lex_tuple encodes tuples of typed fields so that comparing the encodings byte-wise agrees with
//! comparing the tuples field-wise.
//!
//! The encoding carries no type information.  A reader must know the [FieldType] of every field
//! it wants to decode, and anything after the last decoded field is handed back as a remainder.
//!
//! - Booleans and integers are fixed width and big-endian.  Signed integers are shifted so that
//!   the most negative value encodes as all zeroes.
//! - Byte strings and text are spread across 7-bit chunks with the low bit of every chunk set and
//!   end with a single zero byte.
//! - Sequences prefix every element with `0x01` and end with `0x00`.
//!
//! Every encoding is prefix-free, so the concatenation of encodings sorts as the tuple does.

use std::fmt::{Display, Formatter};

mod combine7;
mod iter7;
mod ordered;
mod value;

use combine7::Combine7BitChunks;
use iter7::Iterate7BitChunks;

pub use value::Value;

///////////////////////////////////////////// Constants ////////////////////////////////////////////

const TERMINATOR: u8 = 0x00;
const ELEMENT: u8 = 0x01;

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// The lex_tuple Error type.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input ended in the middle of a field.
    #[error("{field_type} at offset {offset} is truncated")]
    Truncated {
        /// The type of the field being decoded.
        field_type: FieldType,
        /// Where the field started.
        offset: usize,
    },
    /// The input is not a valid encoding of the field.
    #[error("{field_type} at offset {offset} is corrupt: {what}")]
    Corrupt {
        /// The type of the field being decoded.
        field_type: FieldType,
        /// Where the corruption was observed.
        offset: usize,
        /// What was wrong.
        what: &'static str,
    },
    /// A text field decoded to bytes that are not UTF-8.
    #[error("{field_type} at offset {offset} is not valid UTF-8")]
    NotValidUtf8 {
        /// The type of the field being decoded.
        field_type: FieldType,
        /// Where the field started.
        offset: usize,
    },
    /// A textual literal could not be parsed as the requested type.
    #[error("cannot parse {literal:?} as {field_type}: {what}")]
    InvalidLiteral {
        /// The requested type.
        field_type: FieldType,
        /// The literal as provided.
        literal: String,
        /// Why it failed.
        what: String,
    },
}

///////////////////////////////////////////// FieldType ////////////////////////////////////////////

/// The closed set of field types a tuple may hold.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FieldType {
    Bytes,
    BytesList,
    String,
    StringList,
    Bool,
    Int8,
    Int8List,
    Uint8,
    Int16,
    Int16List,
    Int32,
    Int32List,
    Uint32,
    Uint32List,
    Int64,
    Int64List,
    Uint64,
    Uint64List,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 18] = [
        FieldType::Bytes,
        FieldType::BytesList,
        FieldType::String,
        FieldType::StringList,
        FieldType::Bool,
        FieldType::Int8,
        FieldType::Int8List,
        FieldType::Uint8,
        FieldType::Int16,
        FieldType::Int16List,
        FieldType::Int32,
        FieldType::Int32List,
        FieldType::Uint32,
        FieldType::Uint32List,
        FieldType::Int64,
        FieldType::Int64List,
        FieldType::Uint64,
        FieldType::Uint64List,
    ];

    /// The canonical name of this type as written in a format string.
    pub fn token(&self) -> &'static str {
        match self {
            FieldType::Bytes => "[]byte",
            FieldType::BytesList => "[][]byte",
            FieldType::String => "string",
            FieldType::StringList => "[]string",
            FieldType::Bool => "bool",
            FieldType::Int8 => "int8",
            FieldType::Int8List => "[]int8",
            FieldType::Uint8 => "uint8",
            FieldType::Int16 => "int16",
            FieldType::Int16List => "[]int16",
            FieldType::Int32 => "int32",
            FieldType::Int32List => "[]int32",
            FieldType::Uint32 => "uint32",
            FieldType::Uint32List => "[]uint32",
            FieldType::Int64 => "int64",
            FieldType::Int64List => "[]int64",
            FieldType::Uint64 => "uint64",
            FieldType::Uint64List => "[]uint64",
        }
    }

    /// True for the sequence types.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FieldType::BytesList
                | FieldType::StringList
                | FieldType::Int8List
                | FieldType::Int16List
                | FieldType::Int32List
                | FieldType::Uint32List
                | FieldType::Int64List
                | FieldType::Uint64List
        )
    }
}

impl Display for FieldType {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "{}", self.token())
    }
}

////////////////////////////////////////////// Element /////////////////////////////////////////////

/// A scalar that knows its own order-preserving encoding.
pub trait Element: Sized {
    const FIELD_TYPE: FieldType;

    fn append_to(&self, buf: &mut Vec<u8>);
    fn parse_from(parser: &mut TupleParser<'_>) -> Result<Self, Error>;
}

macro_rules! unsigned_element {
    ($t:ty, $field_type:ident) => {
        impl Element for $t {
            const FIELD_TYPE: FieldType = FieldType::$field_type;

            fn append_to(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_be_bytes());
            }

            fn parse_from(parser: &mut TupleParser<'_>) -> Result<Self, Error> {
                const SZ: usize = std::mem::size_of::<$t>();
                let mut bytes = [0u8; SZ];
                bytes.copy_from_slice(parser.take(SZ, Self::FIELD_TYPE)?);
                Ok(<$t>::from_be_bytes(bytes))
            }
        }
    };
}

macro_rules! signed_element {
    ($t:ty, $u:ty, $field_type:ident, $encode:path, $decode:path) => {
        impl Element for $t {
            const FIELD_TYPE: FieldType = FieldType::$field_type;

            fn append_to(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&$encode(*self).to_be_bytes());
            }

            fn parse_from(parser: &mut TupleParser<'_>) -> Result<Self, Error> {
                const SZ: usize = std::mem::size_of::<$t>();
                let mut bytes = [0u8; SZ];
                bytes.copy_from_slice(parser.take(SZ, Self::FIELD_TYPE)?);
                Ok($decode(<$u>::from_be_bytes(bytes)))
            }
        }
    };
}

unsigned_element!(u8, Uint8);
unsigned_element!(u32, Uint32);
unsigned_element!(u64, Uint64);
signed_element!(i8, u8, Int8, ordered::encode_i8, ordered::decode_i8);
signed_element!(i16, u16, Int16, ordered::encode_i16, ordered::decode_i16);
signed_element!(i32, u32, Int32, ordered::encode_i32, ordered::decode_i32);
signed_element!(i64, u64, Int64, ordered::encode_i64, ordered::decode_i64);

impl Element for bool {
    const FIELD_TYPE: FieldType = FieldType::Bool;

    fn append_to(&self, buf: &mut Vec<u8>) {
        buf.push(u8::from(*self));
    }

    fn parse_from(parser: &mut TupleParser<'_>) -> Result<Self, Error> {
        let offset = parser.offset();
        match parser.take(1, Self::FIELD_TYPE)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::Corrupt {
                field_type: Self::FIELD_TYPE,
                offset,
                what: "boolean is neither 0 nor 1",
            }),
        }
    }
}

impl Element for Vec<u8> {
    const FIELD_TYPE: FieldType = FieldType::Bytes;

    fn append_to(&self, buf: &mut Vec<u8>) {
        append_byte_string(self, buf);
    }

    fn parse_from(parser: &mut TupleParser<'_>) -> Result<Self, Error> {
        parser.take_byte_string(Self::FIELD_TYPE)
    }
}

impl Element for String {
    const FIELD_TYPE: FieldType = FieldType::String;

    fn append_to(&self, buf: &mut Vec<u8>) {
        append_byte_string(self.as_bytes(), buf);
    }

    fn parse_from(parser: &mut TupleParser<'_>) -> Result<Self, Error> {
        let offset = parser.offset();
        let bytes = parser.take_byte_string(Self::FIELD_TYPE)?;
        String::from_utf8(bytes).map_err(|_| Error::NotValidUtf8 {
            field_type: Self::FIELD_TYPE,
            offset,
        })
    }
}

fn append_byte_string(bytes: &[u8], buf: &mut Vec<u8>) {
    buf.extend(Iterate7BitChunks::new(bytes));
    buf.push(TERMINATOR);
}

/// Append a sequence of elements.
pub fn append_list<E: Element>(elems: &[E], buf: &mut Vec<u8>) {
    for elem in elems {
        buf.push(ELEMENT);
        elem.append_to(buf);
    }
    buf.push(TERMINATOR);
}

/// Parse a sequence of elements written by [append_list].
pub fn parse_list<E: Element>(
    parser: &mut TupleParser<'_>,
    field_type: FieldType,
) -> Result<Vec<E>, Error> {
    let mut elems = vec![];
    loop {
        let offset = parser.offset();
        match parser.take(1, field_type)?[0] {
            TERMINATOR => return Ok(elems),
            ELEMENT => elems.push(E::parse_from(parser)?),
            _ => {
                return Err(Error::Corrupt {
                    field_type,
                    offset,
                    what: "sequence marker is neither 0 nor 1",
                });
            }
        }
    }
}

//////////////////////////////////////////// TupleParser ///////////////////////////////////////////

/// A TupleParser walks a buffer field by field.
#[derive(Clone, Debug)]
pub struct TupleParser<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> TupleParser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// The offset of the next unparsed byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The bytes not yet parsed.
    pub fn remainder(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Parse the next field as `field_type`.
    pub fn parse(&mut self, field_type: FieldType) -> Result<Value, Error> {
        Value::parse_from(field_type, self)
    }

    fn take(&mut self, sz: usize, field_type: FieldType) -> Result<&'a [u8], Error> {
        if self.buf.len() - self.offset < sz {
            return Err(Error::Truncated {
                field_type,
                offset: self.offset,
            });
        }
        let ret = &self.buf[self.offset..self.offset + sz];
        self.offset += sz;
        Ok(ret)
    }

    fn take_byte_string(&mut self, field_type: FieldType) -> Result<Vec<u8>, Error> {
        let start = self.offset;
        let chunks = self.buf[start..]
            .iter()
            .take_while(|c| *c & 0x1 != 0)
            .count();
        let limit = start + chunks;
        if limit >= self.buf.len() {
            return Err(Error::Truncated {
                field_type,
                offset: start,
            });
        }
        if self.buf[limit] != TERMINATOR {
            return Err(Error::Corrupt {
                field_type,
                offset: limit,
                what: "byte string terminator is not zero",
            });
        }
        let bytes: Vec<u8> = Combine7BitChunks::new(&self.buf[start..limit]).collect();
        if iter7::chunk_count(bytes.len()) != chunks {
            return Err(Error::Corrupt {
                field_type,
                offset: start,
                what: "byte string has a dangling chunk",
            });
        }
        self.offset = limit + 1;
        Ok(bytes)
    }
}

////////////////////////////////////////////// Decoded /////////////////////////////////////////////

/// The values decoded from a buffer and the bytes that followed them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded<'a> {
    pub values: Vec<Value>,
    pub remainder: &'a [u8],
}

/////////////////////////////////////////// encode/decode //////////////////////////////////////////

/// Encode `values` in order.
pub fn encode(values: &[Value]) -> Vec<u8> {
    let mut buf = Vec::new();
    for value in values {
        value.append_to(&mut buf);
    }
    buf
}

/// Decode one value per entry of `field_types` from the front of `buf`.
pub fn decode<'a>(buf: &'a [u8], field_types: &[FieldType]) -> Result<Decoded<'a>, Error> {
    let mut parser = TupleParser::new(buf);
    let values = field_types
        .iter()
        .map(|field_type| parser.parse(*field_type))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Decoded {
        values,
        remainder: parser.remainder(),
    })
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn test_helper<E: Element + std::fmt::Debug + Eq>(elem: E, exp: &[u8]) {
        let mut buf = Vec::new();
        elem.append_to(&mut buf);
        assert_eq!(exp, &buf[..]);
        let mut parser = TupleParser::new(&buf);
        let got = E::parse_from(&mut parser).unwrap();
        assert_eq!(got, elem);
        assert!(parser.remainder().is_empty());
    }

    #[test]
    fn to_from_u32() {
        test_helper(0x1eaff00du32, &[0x1e, 0xaf, 0xf0, 0x0d]);
    }

    #[test]
    fn to_from_i32() {
        test_helper(0x1eaff00di32, &[0x9e, 0xaf, 0xf0, 0x0d]);
        test_helper(-1i32, &[0x7f, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn to_from_i8() {
        test_helper(-128i8, &[0x00]);
        test_helper(127i8, &[0xff]);
    }

    #[test]
    fn to_from_bool() {
        test_helper(false, &[0]);
        test_helper(true, &[1]);
    }

    #[test]
    fn to_from_vec_u8_empty() {
        test_helper(Vec::<u8>::new(), &[0]);
    }

    #[test]
    fn to_from_vec_u8() {
        test_helper(
            vec![0u8, 1, 2, 3],
            &[0b00000001, 0b00000001, 0b01000001, 0b01000001, 0b00110001, 0],
        );
    }

    #[test]
    fn to_from_string() {
        test_helper(
            "hello world".to_owned(),
            &[105, 51, 91, 141, 199, 121, 129, 239, 111, 185, 155, 141, 65, 0],
        );
    }

    #[test]
    fn list_of_u32() {
        let mut buf = Vec::new();
        append_list(&[1u32, 2u32], &mut buf);
        assert_eq!(&[1, 0, 0, 0, 1, 1, 0, 0, 0, 2, 0], &buf[..]);
        let mut parser = TupleParser::new(&buf);
        let got: Vec<u32> = parse_list(&mut parser, FieldType::Uint32List).unwrap();
        assert_eq!(vec![1, 2], got);
    }

    #[test]
    fn truncated_integer() {
        let err = decode(&[0, 0, 0], &[FieldType::Uint32]).unwrap_err();
        assert_eq!(
            Error::Truncated {
                field_type: FieldType::Uint32,
                offset: 0
            },
            err
        );
    }

    #[test]
    fn unterminated_string() {
        let err = decode(&[105, 51], &[FieldType::String]).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }), "{err:?}");
    }

    #[test]
    fn bad_terminator() {
        let err = decode(&[105, 50], &[FieldType::String]).unwrap_err();
        assert!(matches!(err, Error::Corrupt { offset: 1, .. }), "{err:?}");
    }

    #[test]
    fn dangling_chunk() {
        // A lone chunk holds seven bits, which is not enough for a byte.
        let err = decode(&[1, 0], &[FieldType::Bytes]).unwrap_err();
        assert!(matches!(err, Error::Corrupt { .. }), "{err:?}");
    }

    #[test]
    fn invalid_utf8() {
        let mut buf = Vec::new();
        vec![0xffu8, 0xfe].append_to(&mut buf);
        let err = decode(&buf, &[FieldType::String]).unwrap_err();
        assert_eq!(
            Error::NotValidUtf8 {
                field_type: FieldType::String,
                offset: 0
            },
            err
        );
    }

    #[test]
    fn decode_leaves_remainder() {
        let mut buf = encode(&[Value::Uint32(42)]);
        buf.extend_from_slice(b"tail");
        let decoded = decode(&buf, &[FieldType::Uint32]).unwrap();
        assert_eq!(vec![Value::Uint32(42)], decoded.values);
        assert_eq!(b"tail", decoded.remainder);
    }

    #[test]
    fn names_are_unique() {
        for (idx, lhs) in FieldType::ALL.iter().enumerate() {
            for rhs in FieldType::ALL[idx + 1..].iter() {
                assert_ne!(lhs.token(), rhs.token());
            }
        }
    }
}
