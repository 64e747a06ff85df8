use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub store: StoreConfig,
    pub clock: ClockConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `ALARMTAB_PROFILE`. When set (e.g. `BENCH`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("ALARMTAB_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            store: StoreConfig::from_env_profiled(p),
            clock: ClockConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject settings the alarm table cannot operate with.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.store.validate()
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  store:  path={}, capacity={}, max_length={}",
            self.store.path.display(),
            self.store.capacity,
            self.store.max_length
        );
        tracing::info!(
            "  clock:  utc={}, watch_interval={}s",
            self.clock.utc,
            self.clock.watch_interval_secs
        );
    }
}

// ── Store ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store image file.
    pub path: PathBuf,
    /// Total store size in bytes.
    pub capacity: usize,
    /// Bytes reserved for the alarm table, starting at offset 0.
    pub max_length: usize,
}

impl StoreConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            path: PathBuf::from(profiled_env_or(p, "ALARMTAB_STORE_PATH", "data/alarms.eeprom")),
            capacity: profiled_env_usize(p, "ALARMTAB_STORE_CAPACITY", 512),
            max_length: profiled_env_usize(p, "ALARMTAB_MAX_LENGTH", 256),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_length < 2 {
            return Err(CoreError::Config(format!(
                "max_length {} cannot hold an empty table (needs 2 bytes)",
                self.max_length
            )));
        }
        if self.max_length > self.capacity {
            return Err(CoreError::Config(format!(
                "max_length {} exceeds store capacity {}",
                self.max_length, self.capacity
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/alarms.eeprom"),
            capacity: 512,
            max_length: 256,
        }
    }
}

// ── Clock ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Evaluate alarms against UTC instead of local time.
    pub utc: bool,
    /// Polling interval of the watch loop.
    pub watch_interval_secs: u64,
}

impl ClockConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            utc: profiled_env_or(p, "ALARMTAB_CLOCK", "local").eq_ignore_ascii_case("utc"),
            watch_interval_secs: profiled_env_u64(p, "ALARMTAB_WATCH_INTERVAL_SECS", 60),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc: false,
            watch_interval_secs: 60,
        }
    }
}
