///////////////////////////////////////// Combine7BitChunks ////////////////////////////////////////

/// The inverse of [crate::iter7::Iterate7BitChunks].  Padding bits in the final chunk are dropped.
pub struct Combine7BitChunks<'a> {
    bytes: &'a [u8],
    offset: usize,
    remains: u64,
    remains_bits: usize,
}

impl<'a> Combine7BitChunks<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            remains: 0,
            remains_bits: 0,
        }
    }
}

impl<'a> Iterator for Combine7BitChunks<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        while self.offset < self.bytes.len() && self.remains_bits < 8 {
            self.remains <<= 7;
            self.remains |= (self.bytes[self.offset] >> 1) as u64;
            self.remains_bits += 7;
            self.offset += 1;
        }
        if self.remains_bits >= 8 {
            let ret = (self.remains >> (self.remains_bits - 8)) as u8;
            self.remains_bits -= 8;
            Some(ret)
        } else {
            None
        }
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter7::Iterate7BitChunks;

    #[test]
    fn empty() {
        let mut iter = Combine7BitChunks::new(&[]);
        assert_eq!(None, iter.next());
    }

    #[test]
    fn one_byte() {
        let mut iter = Combine7BitChunks::new(&[0b00000001, 0b00000001]);
        assert_eq!(Some(0), iter.next());
        assert_eq!(None, iter.next());

        let mut iter = Combine7BitChunks::new(&[0b00000001, 0b10000001]);
        assert_eq!(Some(1), iter.next());
        assert_eq!(None, iter.next());

        let mut iter = Combine7BitChunks::new(&[0b11111111, 0b00000001]);
        assert_eq!(Some(254), iter.next());
        assert_eq!(None, iter.next());

        let mut iter = Combine7BitChunks::new(&[0b11111111, 0b10000001]);
        assert_eq!(Some(255), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn two_bytes() {
        let mut iter = Combine7BitChunks::new(&[0b00000001, 0b00000001, 0b00000001]);
        assert_eq!(Some(0), iter.next());
        assert_eq!(Some(0), iter.next());
        assert_eq!(None, iter.next());

        let mut iter = Combine7BitChunks::new(&[0b11111111, 0b11111111, 0b11000001]);
        assert_eq!(Some(255), iter.next());
        assert_eq!(Some(255), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn inverts_iterate() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        for len in 0..bytes.len() {
            let chunks: Vec<u8> = Iterate7BitChunks::new(&bytes[..len]).collect();
            let combined: Vec<u8> = Combine7BitChunks::new(&chunks).collect();
            assert_eq!(&bytes[..len], &combined[..]);
        }
    }
}
