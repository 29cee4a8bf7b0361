//! The tokens a format string may use to name a field type.

use lex_tuple::FieldType;

/// Every accepted token and the type it names.  `[]uint8` is another name for `[]byte`.
pub const TOKENS: &[(&str, FieldType)] = &[
    ("[]byte", FieldType::Bytes),
    ("[]uint8", FieldType::Bytes),
    ("[][]byte", FieldType::BytesList),
    ("string", FieldType::String),
    ("[]string", FieldType::StringList),
    ("bool", FieldType::Bool),
    ("int8", FieldType::Int8),
    ("[]int8", FieldType::Int8List),
    ("uint8", FieldType::Uint8),
    ("int16", FieldType::Int16),
    ("[]int16", FieldType::Int16List),
    ("int32", FieldType::Int32),
    ("[]int32", FieldType::Int32List),
    ("uint32", FieldType::Uint32),
    ("[]uint32", FieldType::Uint32List),
    ("int64", FieldType::Int64),
    ("[]int64", FieldType::Int64List),
    ("uint64", FieldType::Uint64),
    ("[]uint64", FieldType::Uint64List),
];

/// Look up the type named by `token`.  Tokens are case sensitive and must match exactly.
pub fn lookup(token: &str) -> Option<FieldType> {
    TOKENS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, field_type)| *field_type)
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
