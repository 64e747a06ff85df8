//! RAM-backed store.

use tracing::warn;

use super::{Store, ERASED};

/// A store held entirely in memory, starting out erased.
///
/// Counts physical writes so callers can observe wear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    bytes: Vec<u8>,
    writes: usize,
}

impl MemoryStore {
    /// Create an erased store of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![ERASED; capacity],
            writes: 0,
        }
    }

    /// Create a store holding `bytes`, padded with erased bytes to `capacity`.
    pub fn with_contents(bytes: &[u8], capacity: usize) -> Self {
        let mut store = Self::new(capacity.max(bytes.len()));
        store.bytes[..bytes.len()].copy_from_slice(bytes);
        store
    }

    /// Total physical writes since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Store for MemoryStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(ERASED)
    }

    fn write(&mut self, index: usize, value: u8) {
        match self.bytes.get_mut(index) {
            Some(slot) => {
                *slot = value;
                self.writes += 1;
            }
            None => warn!(index, capacity = self.bytes.len(), "write past store capacity dropped"),
        }
    }
}
