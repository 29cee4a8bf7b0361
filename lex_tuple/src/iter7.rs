///////////////////////////////////////// Iterate7BitChunks ////////////////////////////////////////

/// Spread bytes across 7-bit chunks.  Every chunk carries its payload in the high seven bits and
/// has the low bit set, so a zero byte can terminate the sequence.  The final chunk is padded with
/// zero bits.
pub struct Iterate7BitChunks<'a> {
    bytes: &'a [u8],
    offset: usize,
    remains: u64,
    remains_bits: usize,
}

impl<'a> Iterate7BitChunks<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            remains: 0,
            remains_bits: 0,
        }
    }
}

impl<'a> Iterator for Iterate7BitChunks<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remains_bits >= 7 {
            let x = (self.remains >> (self.remains_bits - 7)) as u8 & 0x7f;
            self.remains_bits -= 7;
            Some((x << 1) | 1)
        } else if self.offset < self.bytes.len() {
            self.remains <<= 8;
            self.remains |= self.bytes[self.offset] as u64;
            self.offset += 1;
            self.remains_bits += 8;
            self.next()
        } else if self.remains_bits > 0 {
            let mut x: u8 = self.remains as u8;
            x <<= 8 - self.remains_bits;
            self.remains_bits = 0;
            Some(x | 1)
        } else {
            None
        }
    }
}

/// The number of chunks [Iterate7BitChunks] produces for `len` bytes.
pub fn chunk_count(len: usize) -> usize {
    (len * 8 + 6) / 7
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
