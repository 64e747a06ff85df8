//! Tests for the store backends and the write-if-changed primitive.

use tempfile::TempDir;

use super::*;

#[test]
fn memory_store_starts_erased() {
    let store = MemoryStore::new(8);
    assert_eq!(store.capacity(), 8);
    assert!(store.as_bytes().iter().all(|&b| b == ERASED));
    assert_eq!(store.writes(), 0);
}

#[test]
fn write_if_changed_skips_equal_bytes() {
    let mut store = MemoryStore::new(4);
    assert!(write_if_changed(&mut store, 0, 0x41));
    assert!(!write_if_changed(&mut store, 0, 0x41));
    assert!(!write_if_changed(&mut store, 1, ERASED));
    assert_eq!(store.writes(), 1);
    assert_eq!(store.read(0), 0x41);
}

#[test]
fn out_of_range_access_is_harmless() {
    let mut store = MemoryStore::new(2);
    assert_eq!(store.read(10), ERASED);
    store.write(10, 0x00);
    assert_eq!(store.writes(), 0);
    assert_eq!(store.as_bytes(), &[ERASED, ERASED]);
}

#[test]
fn with_contents_pads_to_capacity() {
    let store = MemoryStore::with_contents(b"ab", 4);
    assert_eq!(store.as_bytes(), &[b'a', b'b', ERASED, ERASED]);
}

#[test]
fn mutable_reference_is_a_store() {
    let mut store = MemoryStore::new(3);
    {
        let mut borrowed = &mut store;
        assert!(write_if_changed(&mut borrowed, 2, 7));
    }
    assert_eq!(store.read(2), 7);
}

#[test]
fn file_store_creates_erased_image() {
    let dir = TempDir::new().expect("create tempdir");
    let path = dir.path().join("nested").join("alarms.eeprom");
    let store = FileStore::open(&path, 16).expect("open store");
    assert!(!store.is_dirty());
    let on_disk = std::fs::read(&path).expect("read image");
    assert_eq!(on_disk, vec![ERASED; 16]);
}

#[test]
fn file_store_persists_on_flush() {
    let dir = TempDir::new().expect("create tempdir");
    let path = dir.path().join("alarms.eeprom");

    let mut store = FileStore::open(&path, 8).expect("open store");
    assert!(write_if_changed(&mut store, 3, 0x2A));
    assert!(store.is_dirty());
    store.flush().expect("flush");
    assert!(!store.is_dirty());
    assert_eq!(store.writes(), 1);

    let reopened = FileStore::open(&path, 8).expect("reopen store");
    assert_eq!(reopened.read(3), 0x2A);
    assert_eq!(reopened.read(2), ERASED);
}

#[test]
fn file_store_resizes_mismatched_image() {
    let dir = TempDir::new().expect("create tempdir");
    let path = dir.path().join("alarms.eeprom");
    std::fs::write(&path, [1u8, 2, 3]).expect("seed image");

    let store = FileStore::open(&path, 5).expect("open store");
    assert_eq!(store.capacity(), 5);
    assert_eq!(store.read(2), 3);
    assert_eq!(store.read(4), ERASED);
    assert_eq!(std::fs::read(&path).expect("read image").len(), 5);
}
