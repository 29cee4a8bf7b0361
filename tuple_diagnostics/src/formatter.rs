//! Render one record as one line of text.

use lex_tuple::Value;

use super::{escape_key, Error, RawMode, Schema, Side};

////////////////////////////////////////// RecordFormatter /////////////////////////////////////////

/// Formats records according to a key schema and a value schema.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordFormatter {
    key: Schema,
    value: Schema,
}

impl RecordFormatter {
    pub fn new(key: Schema, value: Schema) -> Self {
        Self { key, value }
    }

    pub fn key_schema(&self) -> &Schema {
        &self.key
    }

    pub fn value_schema(&self) -> &Schema {
        &self.value
    }

    /// Render `key` and `value` as `<key>: <value>`, without a trailing newline.
    ///
    /// The separator is always present, even when neither side prints anything.
    pub fn format_record(&self, key: &[u8], value: &[u8]) -> Result<String, Error> {
        let corrupt = |side: Side, err: lex_tuple::Error| Error::CorruptRecord {
            side,
            key: escape_key(key),
            what: err.to_string(),
        };
        let mut line = String::new();
        format_side(&self.key, key, &mut line).map_err(|err| corrupt(Side::Key, err))?;
        line.push_str(": ");
        format_side(&self.value, value, &mut line).map_err(|err| corrupt(Side::Value, err))?;
        Ok(line)
    }
}

//////////////////////////////////////////// format_side ///////////////////////////////////////////

/// Append the rendering of one side of a record to `out`.
///
/// Fields are separated by commas and ignored fields are skipped.  A schema without fields
/// renders the whole side according to its [RawMode], so an empty side in [RawMode::Bytes]
/// renders as `[]`.  On error `out` may hold a partial rendering.
pub fn format_side(schema: &Schema, bytes: &[u8], out: &mut String) -> Result<(), lex_tuple::Error> {
    if schema.is_empty() {
        push_raw(schema.raw_mode(), bytes, out);
        return Ok(());
    }
    let start = out.len();
    let decoded = lex_tuple::decode(bytes, &schema.field_types())?;
    for (field, value) in schema.fields().iter().zip(decoded.values.iter()) {
        if field.ignored {
            continue;
        }
        if out.len() > start {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
    if decoded.remainder.is_empty() || schema.raw_mode() == RawMode::None {
        return Ok(());
    }
    if out.len() > start {
        out.push(',');
    }
    push_raw(schema.raw_mode(), decoded.remainder, out);
    Ok(())
}

fn push_raw(raw: RawMode, bytes: &[u8], out: &mut String) {
    match raw {
        RawMode::None => {}
        RawMode::Bytes => out.push_str(&Value::Bytes(bytes.to_vec()).to_string()),
        RawMode::Text => out.push_str(&String::from_utf8_lossy(bytes)),
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use lex_tuple::{encode, FieldType};

    use super::*;
    use crate::{catalog, parse_format};

    fn formatter(key: &str, value: &str) -> RecordFormatter {
        RecordFormatter::new(parse_format(key).unwrap(), parse_format(value).unwrap())
    }

    #[test]
    fn hides_ignored_fields() {
        let key = encode(&[Value::Uint32(42), Value::String("hidden".to_string())]);
        let got = formatter("uint32,-string", "").format_record(&key, b"").unwrap();
        assert_eq!("42: ", got);
    }

    #[test]
    fn leading_ignored_field_emits_no_comma() {
        let key = encode(&[Value::Uint32(42), Value::String("shown".to_string())]);
        let got = formatter("-uint32,string", "").format_record(&key, b"").unwrap();
        assert_eq!("shown: ", got);
    }

    #[test]
    fn raw_text_remainder() {
        let mut key = encode(&[Value::String("field".to_string())]);
        key.extend_from_slice(b"tail");
        let got = formatter("string,raw_string", "").format_record(&key, b"").unwrap();
        assert_eq!("field,tail: ", got);
    }

    #[test]
    fn raw_bytes_remainder() {
        let mut key = encode(&[Value::Uint8(1)]);
        key.extend_from_slice(&[2, 3]);
        let got = formatter("uint8,raw", "").format_record(&key, b"").unwrap();
        assert_eq!("1,[2 3]: ", got);
    }

    #[test]
    fn remainder_without_raw_is_dropped() {
        let mut key = encode(&[Value::Uint8(1)]);
        key.extend_from_slice(&[2, 3]);
        let got = formatter("uint8", "").format_record(&key, b"").unwrap();
        assert_eq!("1: ", got);
    }

    #[test]
    fn remainder_after_only_ignored_fields() {
        let mut key = encode(&[Value::Uint8(1)]);
        key.extend_from_slice(b"rest");
        let got = formatter("-uint8,raw_string", "").format_record(&key, b"").unwrap();
        assert_eq!("rest: ", got);
    }

    #[test]
    fn empty_key_schema_still_separates() {
        let got = formatter("", "raw_string").format_record(b"k", b"v").unwrap();
        assert_eq!(": v", got);
        let got = formatter("", "").format_record(b"k", b"v").unwrap();
        assert_eq!(": ", got);
    }

    #[test]
    fn whole_side_raw() {
        let got = formatter("raw", "raw_string").format_record(b"\x01\xff", b"v\xff").unwrap();
        assert_eq!("[1 255]: v\u{fffd}", got);
    }

    #[test]
    fn whole_side_raw_of_empty_bytes() {
        let got = formatter("raw_string", "raw").format_record(b"k", b"").unwrap();
        assert_eq!("k: []", got);
        let got = formatter("raw", "raw_string").format_record(b"", b"").unwrap();
        assert_eq!("[]: ", got);
    }

    fn sample(field_type: FieldType) -> (Value, &'static str) {
        match field_type {
            FieldType::Bytes => (Value::Bytes(vec![0, 7, 255]), "[0 7 255]"),
            FieldType::BytesList => (Value::BytesList(vec![vec![1, 2], vec![]]), "[[1 2] []]"),
            FieldType::String => (Value::String("hello, world".to_string()), "hello, world"),
            FieldType::StringList => (
                Value::StringList(vec!["x".to_string(), "yz".to_string()]),
                "[x yz]",
            ),
            FieldType::Bool => (Value::Bool(true), "true"),
            FieldType::Int8 => (Value::Int8(-128), "-128"),
            FieldType::Int8List => (Value::Int8List(vec![-1, 127]), "[-1 127]"),
            FieldType::Uint8 => (Value::Uint8(255), "255"),
            FieldType::Int16 => (Value::Int16(-300), "-300"),
            FieldType::Int16List => (Value::Int16List(vec![]), "[]"),
            FieldType::Int32 => (Value::Int32(i32::MIN), "-2147483648"),
            FieldType::Int32List => (Value::Int32List(vec![0, -5]), "[0 -5]"),
            FieldType::Uint32 => (Value::Uint32(42), "42"),
            FieldType::Uint32List => (Value::Uint32List(vec![1, 2, 3]), "[1 2 3]"),
            FieldType::Int64 => (Value::Int64(-9), "-9"),
            FieldType::Int64List => (Value::Int64List(vec![i64::MAX]), "[9223372036854775807]"),
            FieldType::Uint64 => (Value::Uint64(u64::MAX), "18446744073709551615"),
            FieldType::Uint64List => (Value::Uint64List(vec![0]), "[0]"),
        }
    }

    #[test]
    fn every_catalog_token_formats_through_its_schema() {
        for (token, field_type) in catalog::TOKENS.iter() {
            let (value, exp) = sample(*field_type);
            let mut encoded = encode(&[Value::Uint8(9), value]);
            encoded.extend_from_slice(b"tail");
            let format = format!("uint8,{},raw_string", token);
            let got = formatter(&format, &format)
                .format_record(&encoded, &encoded)
                .unwrap();
            assert_eq!(format!("9,{exp},tail: 9,{exp},tail"), got, "token {}", token);
            let format = format!("-uint8,-{}", token);
            let got = formatter(&format, "").format_record(&encoded, b"").unwrap();
            assert_eq!(": ", got, "token {}", token);
        }
    }

    #[test]
    fn lists_render_like_values() {
        let key = encode(&[
            Value::BytesList(vec![vec![1, 2], vec![3]]),
            Value::Int64List(vec![-1, 0, 1]),
            Value::Bool(false),
        ]);
        let value = encode(&[Value::StringList(vec!["a".to_string(), "b".to_string()])]);
        let got = formatter("[][]byte,[]int64,bool", "[]string")
            .format_record(&key, &value)
            .unwrap();
        assert_eq!("[[1 2] [3]],[-1 0 1],false: [a b]", got);
    }

    #[test]
    fn corrupt_value() {
        let key = b"k\x00".to_vec();
        let got = formatter("", "uint64").format_record(&key, &[0, 1]);
        match got {
            Err(Error::CorruptRecord { side, key, what: _ }) => {
                assert_eq!(Side::Value, side);
                assert_eq!("k\\x00", key);
            }
            other => panic!("expected CorruptRecord, got {:?}", other),
        }
    }

    #[test]
    fn corrupt_key() {
        let got = formatter("string", "").format_record(b"\x01", b"");
        assert!(matches!(
            got,
            Err(Error::CorruptRecord {
                side: Side::Key,
                ..
            })
        ));
    }
}
