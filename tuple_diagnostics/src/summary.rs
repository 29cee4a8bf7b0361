//! Count the records and bytes in a store.

use std::fmt::{Display, Formatter};

use kvscan::Cursor;
use tracing::debug;

use super::Error;

////////////////////////////////////////////// Summary /////////////////////////////////////////////

/// Totals over every record of a store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub records: u64,
    pub key_bytes: u64,
    pub value_bytes: u64,
}

impl Summary {
    pub fn add(&mut self, key: &[u8], value: &[u8]) {
        self.records += 1;
        self.key_bytes += key.len() as u64;
        self.value_bytes += value.len() as u64;
    }

    pub fn total_bytes(&self) -> u64 {
        self.key_bytes + self.value_bytes
    }

    /// Mean key size, rounded down.  Zero when there are no records.
    pub fn average_key_size(&self) -> u64 {
        self.key_bytes.checked_div(self.records).unwrap_or(0)
    }

    /// Mean value size, rounded down.  Zero when there are no records.
    pub fn average_value_size(&self) -> u64 {
        self.value_bytes.checked_div(self.records).unwrap_or(0)
    }
}

impl Display for Summary {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(fmt, "Records: {}", format_count(self.records))?;
        writeln!(
            fmt,
            "Size: {} ({} for keys and {} for values)",
            format_bytes(self.total_bytes()),
            format_bytes(self.key_bytes),
            format_bytes(self.value_bytes)
        )?;
        writeln!(fmt, "Average key size: {}", format_bytes(self.average_key_size()))?;
        write!(
            fmt,
            "Average value size: {}",
            format_bytes(self.average_value_size())
        )
    }
}

/// Format a count with thousands separators.
fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format bytes with SI units: one decimal place below ten, none at or above it.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
    if bytes < 10 {
        return format!("{} B", bytes);
    }
    let mut exp = 0;
    let mut base = 1u64;
    while exp + 1 < UNITS.len() && bytes / base >= 1000 {
        base *= 1000;
        exp += 1;
    }
    let val = (bytes as f64 / base as f64 * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 {
        format!("{:.1} {}", val, UNITS[exp])
    } else {
        format!("{:.0} {}", val, UNITS[exp])
    }
}

///////////////////////////////////////////// summarize ////////////////////////////////////////////

/// Scan the whole store behind `cursor`.
pub fn summarize<C: Cursor>(mut cursor: C) -> Result<Summary, Error> {
    let store_error = |err: C::Error| Error::Store {
        what: err.to_string(),
    };
    cursor.seek_to_first().map_err(store_error)?;
    let mut summary = Summary::default();
    loop {
        cursor.next().map_err(store_error)?;
        match (cursor.key(), cursor.value()) {
            (Some(key), Some(value)) => summary.add(key, value),
            _ => break,
        }
    }
    debug!(records = summary.records, "summarized store");
    Ok(summary)
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
