//! Drive a scan over a store and print every record.

use std::io::Write;

use kvscan::{Cursor, PrefixCursor};
use tracing::{debug, warn};

use super::{build_prefix, escape_key, parse_format, Error, RecordFormatter};

/////////////////////////////////////////// DecodePolicy ///////////////////////////////////////////

/// What to do with a record that does not decode under its format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DecodePolicy {
    /// Stop the scan and return the error.
    #[default]
    Halt,
    /// Log a warning and move on to the next record.
    Skip,
}

///////////////////////////////////////////// ScanStats ////////////////////////////////////////////

/// Counters from one scan.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScanStats {
    /// Records printed.
    pub records: u64,
    /// Records skipped because they did not decode.
    pub skipped: u64,
}

/////////////////////////////////////////// RecordPrinter //////////////////////////////////////////

/// A RecordPrinter prints every record whose key starts with a prefix, one line per record.
#[derive(Clone, Debug)]
pub struct RecordPrinter {
    formatter: RecordFormatter,
    prefix: Vec<u8>,
    policy: DecodePolicy,
}

impl RecordPrinter {
    /// Parse both formats and the key prefix.  Every configuration error surfaces here, before
    /// any record is read.
    pub fn new(key_format: &str, value_format: &str, key_prefix: &str) -> Result<Self, Error> {
        let key = parse_format(key_format)?;
        let value = parse_format(value_format)?;
        let prefix = build_prefix(&key, key_prefix)?;
        Ok(Self {
            formatter: RecordFormatter::new(key, value),
            prefix,
            policy: DecodePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Print the records under the prefix to `out` in cursor order.
    ///
    /// Each line is written with a single call to `write_all`.  A write error ends the scan; the
    /// lines before it stay written.
    pub fn print<C: Cursor, W: Write>(&self, cursor: C, mut out: W) -> Result<ScanStats, Error> {
        let store_error = |err: C::Error| Error::Store {
            what: err.to_string(),
        };
        let mut cursor = PrefixCursor::new(cursor, &self.prefix).map_err(store_error)?;
        debug!(
            prefix = %escape_key(&self.prefix),
            key_format = %self.formatter.key_schema(),
            value_format = %self.formatter.value_schema(),
            "starting scan"
        );
        let mut stats = ScanStats::default();
        loop {
            cursor.next().map_err(store_error)?;
            let (key, value) = match (cursor.key(), cursor.value()) {
                (Some(key), Some(value)) => (key, value),
                _ => break,
            };
            match self.formatter.format_record(key, value) {
                Ok(mut line) => {
                    line.push('\n');
                    out.write_all(line.as_bytes())?;
                    stats.records += 1;
                }
                Err(err) => match self.policy {
                    DecodePolicy::Halt => return Err(err),
                    DecodePolicy::Skip => {
                        warn!(key = %escape_key(key), "skipping record: {}", err);
                        stats.skipped += 1;
                    }
                },
            }
        }
        out.flush()?;
        debug!(
            records = stats.records,
            skipped = stats.skipped,
            "finished scan"
        );
        Ok(stats)
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_surface_at_construction() {
        assert_eq!(
            Err(Error::InvalidFormatToken {
                token: "uint99".to_string()
            }),
            RecordPrinter::new("uint99", "", "").map(|_| ())
        );
        assert_eq!(
            Err(Error::InvalidFormatToken {
                token: "nope".to_string()
            }),
            RecordPrinter::new("", "nope", "").map(|_| ())
        );
        assert_eq!(
            Err(Error::PrefixExceedsSchema {
                literals: 1,
                fields: 0
            }),
            RecordPrinter::new("", "", "1").map(|_| ())
        );
    }

    #[test]
    fn defaults() {
        let printer = RecordPrinter::new("uint8", "", "3").unwrap();
        assert_eq!(DecodePolicy::Halt, printer.policy());
        assert_eq!(&[3u8], printer.prefix());
        let printer = printer.with_policy(DecodePolicy::Skip);
        assert_eq!(DecodePolicy::Skip, printer.policy());
    }
}
