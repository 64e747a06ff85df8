//! Delimiter-framed persistence of the alarm set.
//!
//! Layout, starting at offset 0 of the store:
//!
//! ```text
//! TABLE_DELIM record_1 RECORD_DELIM record_2 ... record_n TABLE_DELIM
//! ```
//!
//! An empty set is just two table delimiters. A store whose first byte is not
//! a table delimiter has never held a table and is initialized on load.

mod error;


use tracing::{debug, info};

use crate::store::{write_if_changed, Store};

pub use self::error::{CodecError, Result};

/// Frames the whole table.
pub const TABLE_DELIM: u8 = 0x1D;
/// Separates consecutive records.
pub const RECORD_DELIM: u8 = 0x1E;

/// Whether `byte` is reserved for framing and may not appear in a record.
pub fn is_sentinel(byte: u8) -> bool {
    byte == TABLE_DELIM || byte == RECORD_DELIM
}

/// Bytes [`save`] writes for `set`: two framing bytes, every record, and one
/// delimiter between each pair of records.
pub fn length<T: AsRef<str>>(set: &[T]) -> usize {
    let records: usize = set.iter().map(|r| r.as_ref().len()).sum();
    2 + records + set.len().saturating_sub(1)
}

/// Read the alarm set from the first `max_length` bytes of `store`.
///
/// An uninitialized store is given an empty table and yields an empty set.
/// A record that is not valid UTF-8 marks the table as corrupted.
pub fn load<S: Store + ?Sized>(store: &mut S, max_length: usize) -> Result<Vec<String>> {
    if store.read(0) != TABLE_DELIM {
        let writes = usize::from(write_if_changed(store, 0, TABLE_DELIM))
            + usize::from(write_if_changed(store, 1, TABLE_DELIM));
        info!(writes, "initialized empty alarm table");
        return Ok(Vec::new());
    }

    let mut set = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for index in 1..max_length {
        match store.read(index) {
            RECORD_DELIM => flush_record(&mut pending, index, &mut set)?,
            TABLE_DELIM => {
                flush_record(&mut pending, index, &mut set)?;
                debug!(count = set.len(), bytes = index + 1, "alarm table loaded");
                return Ok(set);
            }
            byte => pending.push(byte),
        }
    }

    Err(CodecError::Unterminated { max_length })
}

/// Move a completed record into `set`. `end` is the offset of the delimiter
/// that closed it.
fn flush_record(pending: &mut Vec<u8>, end: usize, set: &mut Vec<String>) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let offset = end - pending.len();
    let record = String::from_utf8(std::mem::take(pending))
        .map_err(|_| CodecError::InvalidRecord { offset })?;
    set.push(record);
    Ok(())
}

/// Write `set` to the start of `store`, touching only bytes that change.
///
/// Returns the number of physical writes performed.
pub fn save<S: Store + ?Sized, T: AsRef<str>>(
    store: &mut S,
    max_length: usize,
    set: &[T],
) -> Result<usize> {
    let required = length(set);
    if required > max_length {
        return Err(CodecError::Overflow {
            required,
            max_length,
        });
    }

    let mut writes = usize::from(write_if_changed(store, 0, TABLE_DELIM));
    let mut index = 0;

    for (i, record) in set.iter().enumerate() {
        if i != 0 {
            index += 1;
            writes += usize::from(write_if_changed(store, index, RECORD_DELIM));
        }
        for &byte in record.as_ref().as_bytes() {
            index += 1;
            writes += usize::from(write_if_changed(store, index, byte));
        }
    }

    index += 1;
    writes += usize::from(write_if_changed(store, index, TABLE_DELIM));

    debug!(count = set.len(), bytes = index + 1, writes, "alarm table saved");
    Ok(writes)
}
