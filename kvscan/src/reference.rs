//! An in-memory, sorted store used for testing and as a reference for other stores.

use std::convert::Infallible;
use std::rc::Rc;

use super::{Cursor, KeyValuePair};

////////////////////////////////////////////// Builder /////////////////////////////////////////////

/// Collect key-value pairs in any order, then seal them into a sorted [Table].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    entries: Vec<KeyValuePair>,
}

impl Builder {
    /// Add `key` with `value`.  Putting the same key twice keeps the last value.
    pub fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&mut self, key: K, value: V) -> &mut Self {
        self.entries.push(KeyValuePair::new(key, value));
        self
    }

    pub fn seal(self) -> Table {
        let mut entries = self.entries;
        // Stable sort keeps insertion order among equal keys; the last one wins.
        entries.sort_by(|lhs, rhs| lhs.key.cmp(&rhs.key));
        let mut deduped: Vec<KeyValuePair> = Vec::with_capacity(entries.len());
        for kvp in entries.into_iter() {
            match deduped.last_mut() {
                Some(last) if last.key == kvp.key => *last = kvp,
                _ => deduped.push(kvp),
            }
        }
        Table {
            entries: Rc::new(deduped),
        }
    }
}

impl<K: AsRef<[u8]>, V: AsRef<[u8]>> FromIterator<(K, V)> for Builder {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = Builder::default();
        for (key, value) in iter {
            builder.put(key, value);
        }
        builder
    }
}

/////////////////////////////////////////////// Table //////////////////////////////////////////////

/// An immutable, sorted collection of key-value pairs.
#[derive(Clone, Debug, Default)]
pub struct Table {
    entries: Rc<Vec<KeyValuePair>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> TableCursor {
        TableCursor {
            entries: Rc::clone(&self.entries),
            next_index: 0,
            current: None,
        }
    }
}

//////////////////////////////////////////// TableCursor ///////////////////////////////////////////

/// A [Cursor] over a [Table].
#[derive(Clone, Debug)]
pub struct TableCursor {
    entries: Rc<Vec<KeyValuePair>>,
    next_index: usize,
    current: Option<usize>,
}

impl TableCursor {
    fn entry(&self) -> Option<&KeyValuePair> {
        self.current.and_then(|idx| self.entries.get(idx))
    }
}

impl Cursor for TableCursor {
    type Error = Infallible;

    fn seek_to_first(&mut self) -> Result<(), Self::Error> {
        self.next_index = 0;
        self.current = None;
        Ok(())
    }

    fn seek(&mut self, key: &[u8]) -> Result<(), Self::Error> {
        self.next_index = self
            .entries
            .partition_point(|kvp| kvp.key.as_slice() < key);
        self.current = None;
        Ok(())
    }

    fn next(&mut self) -> Result<(), Self::Error> {
        if self.next_index < self.entries.len() {
            self.current = Some(self.next_index);
            self.next_index += 1;
        } else {
            self.current = None;
        }
        Ok(())
    }

    fn key(&self) -> Option<&[u8]> {
        self.entry().map(|kvp| kvp.key.as_slice())
    }

    fn value(&self) -> Option<&[u8]> {
        self.entry().map(|kvp| kvp.value.as_slice())
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
