//! [`AlarmManager`] — owns, persists, and checks the alarm set.

use alarmtab_core::{Clock, Moment};
use tracing::{debug, info, warn};

use crate::codec::{self, CodecError};
use crate::matcher::alarm_matches;
use crate::store::Store;

use super::error::{ManagerError, Result};
use super::report::{AlarmReport, ReportEntry};

/// Manages a bounded, persisted set of alarm patterns.
///
/// The in-memory set is authoritative. Every successful
/// [`add`](AlarmManager::add), [`remove`](AlarmManager::remove) or
/// [`clear`](AlarmManager::clear) rewrites the table into the first
/// `max_length` bytes of the store. Not reentrant: callers sharing a manager
/// across execution contexts must serialize access themselves.
#[derive(Debug)]
pub struct AlarmManager<S, C> {
    alarms: Vec<String>,
    store: S,
    clock: C,
    max_length: usize,
}

impl<S: Store, C: Clock> AlarmManager<S, C> {
    /// Load the alarm table from `store`.
    ///
    /// An uninitialized store yields an empty table. A corrupted one is
    /// reported as [`CodecError::Unterminated`] or
    /// [`CodecError::InvalidRecord`].
    pub fn open(mut store: S, clock: C, max_length: usize) -> Result<Self> {
        check_region(&store, max_length)?;
        let alarms = codec::load(&mut store, max_length)?;
        info!(count = alarms.len(), max_length, "alarm table opened");
        Ok(Self {
            alarms,
            store,
            clock,
            max_length,
        })
    }

    /// Like [`open`](AlarmManager::open), but rewrites a corrupted table as
    /// empty instead of failing.
    pub fn open_or_reset(mut store: S, clock: C, max_length: usize) -> Result<Self> {
        check_region(&store, max_length)?;
        let alarms = match codec::load(&mut store, max_length) {
            Ok(alarms) => alarms,
            Err(e @ (CodecError::Unterminated { .. } | CodecError::InvalidRecord { .. })) => {
                warn!(max_length, error = %e, "alarm table corrupted, reinitializing");
                let empty: [&str; 0] = [];
                codec::save(&mut store, max_length, &empty)?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        info!(count = alarms.len(), max_length, "alarm table opened");
        Ok(Self {
            alarms,
            store,
            clock,
            max_length,
        })
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append `value` and persist. Returns `false` if it was refused.
    pub fn add(&mut self, value: &str) -> bool {
        self.try_add(value).is_ok()
    }

    /// Append `value` and persist, naming the reason on refusal.
    pub fn try_add(&mut self, value: &str) -> Result<()> {
        if value.is_empty() || value.bytes().any(codec::is_sentinel) {
            return Err(ManagerError::InvalidPattern(value.to_string()));
        }

        // One extra byte for the record delimiter the new entry needs.
        let required = self.length() + value.len() + 1;
        if required > self.max_length {
            debug!(pattern = value, required, max_length = self.max_length, "alarm rejected: capacity");
            return Err(ManagerError::CapacityExceeded {
                required,
                max_length: self.max_length,
            });
        }
        if self.contains(value) {
            debug!(pattern = value, "alarm rejected: duplicate");
            return Err(ManagerError::DuplicateEntry(value.to_string()));
        }

        self.alarms.push(value.to_string());
        if let Err(e) = self.persist() {
            self.alarms.pop();
            return Err(e);
        }
        info!(pattern = value, count = self.alarms.len(), "alarm added");
        Ok(())
    }

    /// Remove the first alarm equal to `value` and persist. Returns `false`
    /// if nothing was removed.
    pub fn remove(&mut self, value: &str) -> bool {
        self.try_remove(value).is_ok()
    }

    /// Remove the first alarm equal to `value` and persist, naming the
    /// reason on refusal.
    pub fn try_remove(&mut self, value: &str) -> Result<()> {
        if self.alarms.is_empty() {
            return Err(ManagerError::Empty);
        }
        let index = self
            .alarms
            .iter()
            .position(|alarm| alarm == value)
            .ok_or_else(|| ManagerError::NotFound(value.to_string()))?;

        let removed = self.alarms.remove(index);
        if let Err(e) = self.persist() {
            self.alarms.insert(index, removed);
            return Err(e);
        }
        info!(pattern = value, count = self.alarms.len(), "alarm removed");
        Ok(())
    }

    /// Remove every alarm and persist. Returns `false` if already empty.
    pub fn clear(&mut self) -> bool {
        self.try_clear().is_ok()
    }

    /// Remove every alarm and persist, naming the reason on refusal.
    pub fn try_clear(&mut self) -> Result<()> {
        if self.alarms.is_empty() {
            return Err(ManagerError::Empty);
        }
        let previous = std::mem::take(&mut self.alarms);
        if let Err(e) = self.persist() {
            self.alarms = previous;
            return Err(e);
        }
        info!(removed = previous.len(), "alarm table cleared");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let writes = codec::save(&mut self.store, self.max_length, &self.alarms)?;
        debug!(writes, bytes = self.length(), "alarm table persisted");
        Ok(())
    }

    // ── Checks ──────────────────────────────────────────────────────

    /// Whether any alarm matches the clock's current time.
    pub fn check(&self) -> bool {
        self.check_at(&self.clock.now())
    }

    /// Whether any alarm matches `now`.
    pub fn check_at(&self, now: &Moment) -> bool {
        self.first_match(now).is_some()
    }

    /// The first alarm, in insertion order, whose every field matches `now`.
    pub fn first_match(&self, now: &Moment) -> Option<&str> {
        self.alarms
            .iter()
            .map(String::as_str)
            .find(|alarm| alarm_matches(alarm, now))
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn alarms(&self) -> &[String] {
        &self.alarms
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.alarms.iter().any(|alarm| alarm == value)
    }

    /// Bytes the persisted table occupies.
    pub fn length(&self) -> usize {
        codec::length(&self.alarms)
    }

    /// Bytes left in the reserved region.
    pub fn available(&self) -> usize {
        self.max_length.saturating_sub(self.length())
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store, e.g. to flush a file-backed image.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Snapshot of the table for diagnostics.
    pub fn report(&self) -> AlarmReport {
        let total = self.length();
        AlarmReport {
            count: self.alarms.len(),
            entries: self
                .alarms
                .iter()
                .enumerate()
                .map(|(index, pattern)| ReportEntry {
                    index,
                    pattern: pattern.clone(),
                    length: pattern.len(),
                })
                .collect(),
            total,
            available: self.max_length.saturating_sub(total),
        }
    }
}

fn check_region<S: Store>(store: &S, max_length: usize) -> Result<()> {
    if max_length < 2 {
        return Err(ManagerError::Config(format!(
            "max_length {max_length} cannot hold an empty table"
        )));
    }
    if max_length > store.capacity() {
        return Err(ManagerError::Config(format!(
            "max_length {max_length} exceeds store capacity {}",
            store.capacity()
        )));
    }
    Ok(())
}
