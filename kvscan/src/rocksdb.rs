//! Read-only access to a RocksDB database.

use std::path::Path;

use rocksdb::{DBRawIterator, Options, DB};

use super::Cursor;

///////////////////////////////////////////// Database /////////////////////////////////////////////

/// A RocksDB database opened read-only.
pub struct Database {
    db: DB,
}

impl Database {
    /// Open the database at `path` without taking the write lock.  The database must exist.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let mut options = Options::default();
        options.create_if_missing(false);
        let db = DB::open_for_read_only(&options, path.as_ref(), false).map_err(|err| {
            format!(
                "could not open {} read-only: {}",
                path.as_ref().display(),
                err
            )
        })?;
        Ok(Self { db })
    }

    pub fn cursor(&self) -> DatabaseCursor<'_> {
        DatabaseCursor {
            iter: self.db.raw_iterator(),
            position: Position::Before,
        }
    }
}

///////////////////////////////////////////// Position /////////////////////////////////////////////

#[derive(Eq, PartialEq)]
enum Position {
    // The raw iterator is on the entry the next call to next() should surface.
    Before,
    Positioned,
}

////////////////////////////////////////// DatabaseCursor //////////////////////////////////////////

/// A [Cursor] over a RocksDB raw iterator.
pub struct DatabaseCursor<'a> {
    iter: DBRawIterator<'a>,
    position: Position,
}

impl<'a> DatabaseCursor<'a> {
    fn status(&self) -> Result<(), String> {
        self.iter
            .status()
            .map_err(|err| format!("rocksdb iterator error: {}", err))
    }
}

impl<'a> Cursor for DatabaseCursor<'a> {
    type Error = String;

    fn seek_to_first(&mut self) -> Result<(), Self::Error> {
        self.iter.seek_to_first();
        self.position = Position::Before;
        self.status()
    }

    fn seek(&mut self, key: &[u8]) -> Result<(), Self::Error> {
        self.iter.seek(key);
        self.position = Position::Before;
        self.status()
    }

    fn next(&mut self) -> Result<(), Self::Error> {
        match self.position {
            Position::Before => {
                self.position = Position::Positioned;
            }
            Position::Positioned => {
                if self.iter.valid() {
                    self.iter.next();
                }
            }
        }
        self.status()
    }

    fn key(&self) -> Option<&[u8]> {
        if self.position == Position::Positioned {
            self.iter.key()
        } else {
            None
        }
    }

    fn value(&self) -> Option<&[u8]> {
        if self.position == Position::Positioned {
            self.iter.value()
        } else {
            None
        }
    }
}
