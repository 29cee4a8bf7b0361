//! Map signed integers onto unsigned integers of the same width such that the unsigned order of
//! the output matches the signed order of the input.

macro_rules! ordered {
    ($encode:ident, $decode:ident, $signed:ty, $unsigned:ty) => {
        pub fn $encode(x: $signed) -> $unsigned {
            const DIVIDE: $unsigned = 1 << (<$unsigned>::BITS - 1);
            let offset = if x >= 0 { DIVIDE } else { <$signed>::MIN as $unsigned };
            (x as $unsigned).wrapping_add(offset)
        }

        pub fn $decode(x: $unsigned) -> $signed {
            const DIVIDE: $unsigned = 1 << (<$unsigned>::BITS - 1);
            let offset = if x >= DIVIDE { DIVIDE } else { <$signed>::MIN as $unsigned };
            x.wrapping_sub(offset) as $signed
        }
    };
}

ordered!(encode_i8, decode_i8, i8, u8);
ordered!(encode_i16, decode_i16, i16, u16);
ordered!(encode_i32, decode_i32, i32, u32);
ordered!(encode_i64, decode_i64, i64, u64);

/////////////////////////////////////////////// tests //////////////////////////////////////////////
