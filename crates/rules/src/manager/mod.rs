//! Alarm table orchestration.
//!
//! [`AlarmManager`] owns the in-memory alarm set, enforces capacity and
//! de-duplication, persists the whole set after every successful mutation,
//! and checks the set against a clock.

mod core;
mod error;
mod report;


pub use self::core::AlarmManager;
pub use self::error::{ManagerError, Result};
pub use self::report::{AlarmReport, ReportEntry};
