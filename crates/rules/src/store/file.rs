//! Store image persisted as a regular file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{Store, ERASED};

/// A store image backed by a file of exactly `capacity` bytes.
///
/// The image is read once on [`open`](FileStore::open). Writes update the
/// in-memory image; [`flush`](FileStore::flush) persists it when dirty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    bytes: Vec<u8>,
    dirty: bool,
    writes: usize,
}

impl FileStore {
    /// Open the image at `path`, creating an erased one if it does not exist.
    ///
    /// A short image is padded with erased bytes; a long one is truncated
    /// to `capacity`.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (bytes, dirty) = match fs::read(&path) {
            Ok(mut bytes) => {
                let dirty = bytes.len() != capacity;
                if dirty {
                    warn!(
                        path = %path.display(),
                        found = bytes.len(),
                        capacity,
                        "store image size mismatch, resizing"
                    );
                }
                bytes.resize(capacity, ERASED);
                (bytes, dirty)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), capacity, "creating erased store image");
                (vec![ERASED; capacity], true)
            }
            Err(e) => return Err(e),
        };

        let mut store = Self {
            path,
            bytes,
            dirty,
            writes: 0,
        };
        store.flush()?;
        Ok(store)
    }

    /// Persist the image if anything changed since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, &self.bytes)?;
        debug!(path = %self.path.display(), writes = self.writes, "store image flushed");
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Physical byte writes since the image was opened.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Store for FileStore {
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
                self.dirty = true;
                self.writes += 1;
            }
            None => warn!(index, capacity = self.bytes.len(), "write past store capacity dropped"),
        }
    }
}
