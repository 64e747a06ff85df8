//! Persistent cron-style alarm table for small byte-addressable stores.
//!
//! This crate provides:
//! - Per-field cron matching with wildcards, lists, ranges, and steps
//! - A delimiter-framed codec that persists the alarm set with
//!   write-if-changed semantics
//! - A `Store` capability with in-memory and file-backed implementations
//! - `AlarmManager`, which owns the set, enforces capacity and
//!   de-duplication, and checks alarms against a clock

pub mod codec;
pub mod manager;
pub mod matcher;
pub mod store;

pub use codec::{CodecError, RECORD_DELIM, TABLE_DELIM};
pub use manager::{AlarmManager, AlarmReport, ManagerError, ReportEntry};
pub use matcher::{alarm_matches, matches};
pub use store::{write_if_changed, FileStore, MemoryStore, Store, ERASED};
