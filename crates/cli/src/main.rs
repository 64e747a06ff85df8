mod cli;

use std::future::Future;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use tracing::{info, warn};

use alarmtab_core::config::load_dotenv;
use alarmtab_core::{Clock, Config, Moment, SystemClock};
use alarmtab_rules::{AlarmManager, FileStore, Store};

use crate::cli::{join_pattern, CliArgs, Command};

type Alarms = AlarmManager<FileStore, SystemClock>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;
    config.log_summary();

    let mut alarms = open_alarms(&config, args.reset)?;

    let code = match args.command {
        Command::Add { pattern } => {
            let pattern = join_pattern(&pattern);
            report_outcome(alarms.try_add(&pattern).map(|_| format!("added: {pattern}")))
        }
        Command::Remove { pattern } => {
            let pattern = join_pattern(&pattern);
            report_outcome(alarms.try_remove(&pattern).map(|_| format!("removed: {pattern}")))
        }
        Command::Clear => report_outcome(alarms.try_clear().map(|_| "cleared".to_string())),
        Command::List { json } => {
            let report = alarms.report();
            if json {
                let text = serde_json::to_string_pretty(&report)
                    .context("failed to serialize alarm report")?;
                println!("{text}");
            } else {
                print!("{report}");
            }
            ExitCode::SUCCESS
        }
        Command::Check { at } => {
            let now = match at.as_deref() {
                Some(text) => parse_moment(text)?,
                None => alarms.clock().now(),
            };
            match alarms.first_match(&now) {
                Some(pattern) => {
                    println!("match at {now}: {pattern}");
                    ExitCode::SUCCESS
                }
                None => {
                    println!("no match at {now}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Watch { .. } => {
            watch(&alarms, Duration::from_secs(config.clock.watch_interval_secs.max(1))).await;
            ExitCode::SUCCESS
        }
    };

    alarms
        .store_mut()
        .flush()
        .with_context(|| format!("failed to write store image {}", config.store.path.display()))?;

    Ok(code)
}

/// Open the store image and load the alarm table from it.
fn open_alarms(config: &Config, reset: bool) -> Result<Alarms> {
    let path = &config.store.path;
    let store = FileStore::open(path, config.store.capacity)
        .with_context(|| format!("failed to open store image {}", path.display()))?;
    let clock = if config.clock.utc {
        SystemClock::utc()
    } else {
        SystemClock::local()
    };

    let max_length = config.store.max_length;
    let mut alarms = if reset {
        AlarmManager::open_or_reset(store, clock, max_length)
    } else {
        AlarmManager::open(store, clock, max_length)
    }
    .with_context(|| {
        format!(
            "failed to load alarm table from {} (use --reset to reinitialize)",
            path.display()
        )
    })?;

    // Persist initialization of a fresh store right away.
    alarms
        .store_mut()
        .flush()
        .with_context(|| format!("failed to write store image {}", path.display()))?;
    Ok(alarms)
}

fn report_outcome(outcome: alarmtab_rules::manager::Result<String>) -> ExitCode {
    match outcome {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("refused: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Parse an RFC 3339 timestamp, keeping its own UTC offset.
fn parse_moment(text: &str) -> Result<Moment> {
    let dt = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("invalid RFC 3339 timestamp: {text}"))?;
    Ok(Moment::from_datetime(&dt))
}

/// Report each matching minute once until Ctrl-C.
async fn watch(alarms: &Alarms, period: Duration) {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
        }
    };
    let fired = watch_until(alarms, period, shutdown).await;
    info!(fired, "watch stopped");
}

/// Poll `alarms` every `period` until `shutdown` completes, reporting each
/// matching minute once. Returns the number of reports.
async fn watch_until<S, C, F>(alarms: &AlarmManager<S, C>, period: Duration, shutdown: F) -> usize
where
    S: Store,
    C: Clock,
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(period);
    let mut last_fired: Option<Moment> = None;
    let mut fired = 0;
    tokio::pin!(shutdown);
    info!(count = alarms.len(), period_secs = period.as_secs(), "watching alarms");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = alarms.clock().now();
                if last_fired == Some(now) {
                    continue;
                }
                if let Some(pattern) = alarms.first_match(&now) {
                    info!(pattern, moment = %now, "alarm matched");
                    println!("{now}: {pattern}");
                    last_fired = Some(now);
                    fired += 1;
                }
            }
            _ = &mut shutdown => break,
        }
    }
    fired
}
