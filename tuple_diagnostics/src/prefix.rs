//! Build the key prefix that bounds a scan.

use lex_tuple::Value;

use super::{Error, Schema};

/// Encode the comma-separated `literals` as the leading fields of a key with `schema`.
///
/// Literals bind to fields by position, ignored fields included.  An empty string yields the
/// empty prefix, which matches every key.  Text and byte-string literals are taken verbatim and,
/// since such fields carry a terminator, match only keys whose field is exactly the literal.
pub fn build_prefix(schema: &Schema, literals: &str) -> Result<Vec<u8>, Error> {
    if literals.is_empty() {
        return Ok(Vec::new());
    }
    let literals: Vec<&str> = literals.split(',').collect();
    if literals.len() > schema.len() {
        return Err(Error::PrefixExceedsSchema {
            literals: literals.len(),
            fields: schema.len(),
        });
    }
    let mut prefix = Vec::new();
    for (index, (literal, field)) in literals.iter().zip(schema.fields()).enumerate() {
        let value = Value::parse(field.field_type, literal).map_err(|err| {
            let what = match err {
                lex_tuple::Error::InvalidLiteral { what, .. } => what,
                err => err.to_string(),
            };
            Error::InvalidPrefixValue {
                index,
                field_type: field.field_type,
                literal: literal.to_string(),
                what,
            }
        })?;
        value.append_to(&mut prefix);
    }
    Ok(prefix)
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
