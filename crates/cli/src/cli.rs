use std::path::PathBuf;

use clap::{Parser, Subcommand};

use alarmtab_core::Config;

/// Manage a persistent table of cron-style alarms.
///
/// The table lives in a fixed-size store image. Every change rewrites only
/// the bytes that differ.
#[derive(Parser, Debug)]
#[command(name = "alarmtab", version, about = "Manage a persistent table of cron-style alarms")]
pub struct CliArgs {
    /// Store image file (overrides ALARMTAB_STORE_PATH)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Store size in bytes (overrides ALARMTAB_STORE_CAPACITY)
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    /// Bytes reserved for the alarm table (overrides ALARMTAB_MAX_LENGTH)
    #[arg(long, global = true)]
    pub max_length: Option<usize>,

    /// Evaluate alarms in UTC instead of local time
    #[arg(long, global = true)]
    pub utc: bool,

    /// Reinitialize the table if the store holds a corrupted one
    #[arg(long, global = true)]
    pub reset: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add an alarm, e.g. `alarmtab add "30 6 * * 2-6"`
    Add {
        /// Pattern: minute hour day month weekday [year]
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        pattern: Vec<String>,
    },
    /// Remove an alarm by its exact pattern
    Remove {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        pattern: Vec<String>,
    },
    /// Remove every alarm
    Clear,
    /// Print the alarm table and its space usage
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether any alarm matches now (exit code 0) or not (1)
    Check {
        /// Check this RFC 3339 timestamp instead of the current time
        #[arg(long)]
        at: Option<String>,
    },
    /// Poll the clock and report matching alarms until interrupted
    Watch {
        /// Polling interval in seconds (overrides ALARMTAB_WATCH_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
    },
}

/// Join pattern words given as separate arguments with single spaces.
pub fn join_pattern(words: &[String]) -> String {
    words.join(" ")
}

impl CliArgs {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.store {
            config.store.path = path.clone();
        }
        if let Some(capacity) = self.capacity {
            config.store.capacity = capacity;
        }
        if let Some(max_length) = self.max_length {
            config.store.max_length = max_length;
        }
        if self.utc {
            config.clock.utc = true;
        }
        if let Command::Watch {
            interval: Some(secs),
        } = self.command
        {
            config.clock.watch_interval_secs = secs;
        }
    }
}
