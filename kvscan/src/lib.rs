//! kvscan provides read-only, ordered scans over key-value stores.
//!
//! A store is anything that can hand out a [Cursor].  Keys are compared bytewise, so a cursor
//! visits entries in lexicographic key order.  [PrefixCursor] restricts any cursor to the keys
//! that start with a given byte prefix.

use std::fmt::Display;

mod prefix_cursor;

#[cfg(feature = "reference")]
pub mod reference;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;

pub use prefix_cursor::PrefixCursor;

/////////////////////////////////////////// KeyValuePair ///////////////////////////////////////////

/// An owned key-value pair.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct KeyValuePair {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl KeyValuePair {
    pub fn new<K: AsRef<[u8]>, V: AsRef<[u8]>>(key: K, value: V) -> Self {
        Self {
            key: key.as_ref().to_vec(),
            value: value.as_ref().to_vec(),
        }
    }
}

////////////////////////////////////////////// Cursor //////////////////////////////////////////////

/// A Cursor walks a store in key order.
///
/// A freshly-positioned cursor sits before its target.  After `seek_to_first` the first call to
/// `next` moves onto the first entry; after `seek(key)` the first call to `next` moves onto the
/// first entry whose key is greater than or equal to `key`.  While the cursor is before its
/// target or past the last entry, `key` and `value` return `None`.
pub trait Cursor {
    type Error: Display;

    /// Position the cursor before the first entry of the store.
    fn seek_to_first(&mut self) -> Result<(), Self::Error>;
    /// Position the cursor before the first entry with a key at or after `key`.
    fn seek(&mut self, key: &[u8]) -> Result<(), Self::Error>;
    /// Advance the cursor one entry.  Advancing past the end is not an error.
    fn next(&mut self) -> Result<(), Self::Error>;

    /// The key of the current entry.
    fn key(&self) -> Option<&[u8]>;
    /// The value of the current entry.
    fn value(&self) -> Option<&[u8]>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Error = C::Error;

    fn seek_to_first(&mut self) -> Result<(), Self::Error> {
        (**self).seek_to_first()
    }

    fn seek(&mut self, key: &[u8]) -> Result<(), Self::Error> {
        (**self).seek(key)
    }

    fn next(&mut self) -> Result<(), Self::Error> {
        (**self).next()
    }

    fn key(&self) -> Option<&[u8]> {
        (**self).key()
    }

    fn value(&self) -> Option<&[u8]> {
        (**self).value()
    }
}
