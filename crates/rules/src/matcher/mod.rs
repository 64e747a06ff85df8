//! Cron-style field matching for alarm patterns.
//!
//! An alarm pattern is a space-separated list of field tokens in the order
//! `minute hour day month weekday [year]`. Each token is one of:
//!
//! - `*` — any value
//! - `?` — any value (day and weekday only)
//! - `n` — a single value, clamped into the field range
//! - `a-b` — an inclusive range, both bounds clamped; no wraparound
//! - `s/k` — every `k`-th value counted from 0 up to the field maximum
//! - a comma list of any of the above
//!
//! Malformed tokens never match; they are logged at debug level.

use std::num::IntErrorKind;

use alarmtab_core::{Moment, TimeField, PATTERN_FIELDS};
use tracing::debug;

#[cfg(test)]
mod tests;

/// Decide whether one field token matches the current value of `field`.
pub fn matches(pattern: &str, field: TimeField, current: u32) -> bool {
    if pattern.contains(',') {
        return pattern
            .split(',')
            .filter(|part| !part.is_empty())
            .any(|part| match_term(part, field, current));
    }
    match_term(pattern, field, current)
}

/// Decide whether every field of an alarm pattern matches `now`.
///
/// Tokens are separated by single spaces; a missing token counts as empty,
/// which only the trailing year field accepts. Tokens past the year are
/// ignored.
pub fn alarm_matches(alarm: &str, now: &Moment) -> bool {
    let mut tokens = alarm.split(' ');
    PATTERN_FIELDS.iter().all(|&field| {
        let token = tokens.next().unwrap_or("");
        match now.value_for(field) {
            Some(current) => matches(token, field, current),
            None => false,
        }
    })
}

/// Evaluate a token that contains no commas.
fn match_term(term: &str, field: TimeField, current: u32) -> bool {
    if term.is_empty() {
        return field == TimeField::Year;
    }
    if term == "*" {
        return true;
    }
    if term == "?" {
        return field.accepts_any_marker();
    }
    if let Some((start, interval)) = term.split_once('/') {
        return match_step(start, interval, field, current);
    }
    if let Some((start, end)) = term.split_once('-') {
        return match_range(start, end, field, current);
    }
    match parse_literal(term, field) {
        Some(value) => field.clamp(value) == current,
        None => false,
    }
}

fn match_step(start: &str, interval: &str, field: TimeField, current: u32) -> bool {
    let origin = if start.is_empty() || start == "*" {
        Some(field.min())
    } else {
        parse_literal(start, field).map(|s| field.clamp(s))
    };
    let Some(origin) = origin else {
        return false;
    };

    let step = match parse_literal(interval, field) {
        Some(k) if k > 0 => usize::try_from(k).unwrap_or(usize::MAX),
        _ => {
            debug!(field = %field, interval, "step interval must be a positive integer");
            return false;
        }
    };

    // The sequence always starts at 0; `origin` does not shift it.
    debug!(field = %field, origin, step, "evaluating step token");
    (0..=field.max()).step_by(step).any(|v| v == current)
}

fn match_range(start: &str, end: &str, field: TimeField, current: u32) -> bool {
    match (parse_literal(start, field), parse_literal(end, field)) {
        (Some(start), Some(end)) => {
            let start = field.clamp(start);
            let end = field.clamp(end);
            start <= current && current <= end
        }
        _ => false,
    }
}

/// Parse an integer token. Literals too large for `i64` saturate, so they
/// still clamp to the nearest field bound.
fn parse_literal(text: &str, field: TimeField) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Some(i64::MIN),
        Err(e) => {
            debug!(field = %field, token = text, error = %e, "malformed pattern token");
            None
        }
    }
}
