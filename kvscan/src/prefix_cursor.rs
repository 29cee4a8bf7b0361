//! Prefix cursor restricts a general cursor to the keys that start with a byte prefix.

use super::Cursor;

////////////////////////////////////////////// Bounds //////////////////////////////////////////////

#[derive(Eq, PartialEq)]
enum Bounds {
    BeforeStart,
    Positioned,
    AfterEnd,
}

/////////////////////////////////////////// PrefixCursor ///////////////////////////////////////////

/// A PrefixCursor restricts another cursor to keys that begin with `prefix`.
///
/// An empty prefix matches every key.  Because the underlying store is ordered, the first key
/// that does not begin with the prefix ends the scan.
pub struct PrefixCursor<C: Cursor> {
    cursor: C,
    bounds: Bounds,
    prefix: Vec<u8>,
}

impl<C: Cursor> PrefixCursor<C> {
    /// Create a new [PrefixCursor] positioned before the first key matching `prefix`.
    pub fn new<P: AsRef<[u8]>>(cursor: C, prefix: P) -> Result<Self, C::Error> {
        let mut cursor = Self {
            cursor,
            bounds: Bounds::BeforeStart,
            prefix: prefix.as_ref().to_vec(),
        };
        cursor.seek_to_first()?;
        Ok(cursor)
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn into_inner(self) -> C {
        self.cursor
    }

    fn check_for_prefix_exceeded(&mut self) {
        match self.cursor.key() {
            Some(key) if key.starts_with(&self.prefix) => {
                self.bounds = Bounds::Positioned;
            }
            _ => {
                self.bounds = Bounds::AfterEnd;
            }
        }
    }
}

impl<C: Cursor> Cursor for PrefixCursor<C> {
    type Error = C::Error;

    fn seek_to_first(&mut self) -> Result<(), Self::Error> {
        self.bounds = Bounds::BeforeStart;
        if self.prefix.is_empty() {
            self.cursor.seek_to_first()
        } else {
            self.cursor.seek(&self.prefix)
        }
    }

    fn seek(&mut self, key: &[u8]) -> Result<(), Self::Error> {
        if key < self.prefix.as_slice() {
            self.seek_to_first()
        } else {
            self.bounds = Bounds::BeforeStart;
            self.cursor.seek(key)
        }
    }

    fn next(&mut self) -> Result<(), Self::Error> {
        if self.bounds != Bounds::AfterEnd {
            self.cursor.next()?;
            self.check_for_prefix_exceeded();
        }
        Ok(())
    }

    fn key(&self) -> Option<&[u8]> {
        if self.bounds == Bounds::Positioned {
            self.cursor.key()
        } else {
            None
        }
    }

    fn value(&self) -> Option<&[u8]> {
        if self.bounds == Bounds::Positioned {
            self.cursor.value()
        } else {
            None
        }
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
