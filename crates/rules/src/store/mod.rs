//! Byte-addressable persistent store capability.
//!
//! The alarm table lives in a small store with limited write endurance
//! (an EEPROM or an image of one). All writes made by this crate go through
//! [`write_if_changed`], so a byte is only physically written when its value
//! actually differs.

mod file;
mod memory;

#[cfg(test)]
mod tests;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

/// Value of a byte that has never been written.
pub const ERASED: u8 = 0xFF;

/// A synchronous, byte-addressable store.
///
/// Reads past [`capacity`](Store::capacity) return [`ERASED`]; writes past it
/// are dropped.
pub trait Store {
    /// Number of addressable bytes.
    fn capacity(&self) -> usize;

    /// Read the byte at `index`.
    fn read(&self, index: usize) -> u8;

    /// Physically write `value` at `index`.
    fn write(&mut self, index: usize, value: u8);
}

impl<S: Store + ?Sized> Store for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&self, index: usize) -> u8 {
        (**self).read(index)
    }

    fn write(&mut self, index: usize, value: u8) {
        (**self).write(index, value)
    }
}

/// Write `value` at `index` only if the stored byte differs.
///
/// Returns whether a physical write happened.
pub fn write_if_changed<S: Store + ?Sized>(store: &mut S, index: usize, value: u8) -> bool {
    if store.read(index) == value {
        return false;
    }
    store.write(index, value);
    true
}
