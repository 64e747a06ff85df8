//! Tests for field and alarm matching.

use alarmtab_core::{Moment, TimeField};

use super::{alarm_matches, matches};

fn at(minute: u32, hour: u32, day: u32, month: u32, weekday: u32, year: u32) -> Moment {
    Moment::new(minute, hour, day, month, weekday, year).unwrap()
}

// -- empty / wildcards -----------------------------------------------------

#[test]
fn empty_token_matches_only_year() {
    assert!(matches("", TimeField::Year, 2024));
    for field in [
        TimeField::Minute,
        TimeField::Hour,
        TimeField::Day,
        TimeField::Month,
        TimeField::Weekday,
    ] {
        assert!(!matches("", field, field.min()), "{field} accepted empty token");
    }
}

#[test]
fn star_matches_every_value_in_range() {
    for field in [
        TimeField::Minute,
        TimeField::Hour,
        TimeField::Day,
        TimeField::Month,
        TimeField::Weekday,
        TimeField::Year,
    ] {
        let (min, max) = field.range();
        assert!((min..=max).all(|v| matches("*", field, v)), "{field}");
    }
}

#[test]
fn question_mark_only_for_day_and_weekday() {
    assert!(matches("?", TimeField::Day, 17));
    assert!(matches("?", TimeField::Weekday, 3));
    assert!(!matches("?", TimeField::Minute, 0));
    assert!(!matches("?", TimeField::Hour, 12));
    assert!(!matches("?", TimeField::Month, 6));
    assert!(!matches("?", TimeField::Year, 2024));
}

// -- single values ---------------------------------------------------------

#[test]
fn literal_matches_equal_value() {
    assert!(matches("30", TimeField::Minute, 30));
    assert!(!matches("30", TimeField::Minute, 31));
    assert!(matches("2031", TimeField::Year, 2031));
}

#[test]
fn literal_is_clamped_to_field_range() {
    assert!(matches("99", TimeField::Minute, 59));
    assert!(matches("0", TimeField::Day, 1));
    assert!(matches("13", TimeField::Month, 12));
    assert!(matches("9", TimeField::Weekday, 7));
    assert!(matches("1900", TimeField::Year, 1970));
    assert!(matches("5000", TimeField::Year, 2099));
}

#[test]
fn oversized_literal_saturates_to_field_bound() {
    assert!(matches("99999999999999999999999", TimeField::Year, 2099));
    assert!(matches("99999999999999999999999", TimeField::Minute, 59));
    assert!(matches("0-99999999999999999999999", TimeField::Hour, 23));
    assert!(matches("99999999999999999999999,3", TimeField::Day, 31));
}

#[test]
fn malformed_literal_never_matches() {
    assert!(!matches("abc", TimeField::Minute, 0));
    assert!(!matches("1x", TimeField::Hour, 1));
}

// -- lists -----------------------------------------------------------------

#[test]
fn list_matches_any_member() {
    assert!(matches("5,10,15", TimeField::Minute, 10));
    assert!(matches("5,10,15", TimeField::Minute, 15));
    assert!(!matches("5,10,15", TimeField::Minute, 11));
}

#[test]
fn list_members_may_be_ranges_and_steps() {
    assert!(matches("1-3,20/20", TimeField::Minute, 2));
    assert!(matches("1-3,20/20", TimeField::Minute, 40));
    assert!(!matches("1-3,20/20", TimeField::Minute, 10));
    assert!(matches("?,3", TimeField::Weekday, 6));
    assert!(!matches("?,3", TimeField::Hour, 6));
}

#[test]
fn list_skips_empty_parts() {
    assert!(matches(",7", TimeField::Hour, 7));
    assert!(matches("7,", TimeField::Hour, 7));
    assert!(matches("1,,7", TimeField::Hour, 7));
    // An empty part is skipped, not evaluated as an absent year.
    assert!(!matches(",", TimeField::Year, 2024));
    assert!(!matches("1990,,", TimeField::Year, 2024));
}

// -- ranges ----------------------------------------------------------------

#[test]
fn range_is_inclusive() {
    assert!(matches("1-5", TimeField::Day, 1));
    assert!(matches("1-5", TimeField::Day, 3));
    assert!(matches("1-5", TimeField::Day, 5));
    assert!(!matches("1-5", TimeField::Day, 6));
}

#[test]
fn range_bounds_are_clamped_independently() {
    assert!(matches("50-99", TimeField::Minute, 59));
    assert!(matches("0-3", TimeField::Month, 1));
    assert!(matches("2000-9999", TimeField::Year, 2099));
}

#[test]
fn range_does_not_wrap() {
    assert!(!matches("22-2", TimeField::Hour, 23));
    assert!(!matches("22-2", TimeField::Hour, 1));
}

#[test]
fn malformed_range_never_matches() {
    assert!(!matches("a-5", TimeField::Minute, 3));
    assert!(!matches("3-", TimeField::Minute, 3));
    assert!(!matches("-5", TimeField::Minute, 0));
}

// -- steps -----------------------------------------------------------------

#[test]
fn step_every_fifteen_minutes() {
    let hits: Vec<u32> = (0..=59)
        .filter(|&m| matches("0/15", TimeField::Minute, m))
        .collect();
    assert_eq!(hits, vec![0, 15, 30, 45]);
}

#[test]
fn step_counts_from_zero_regardless_of_start() {
    // The start value is clamped but does not offset the sequence.
    assert!(matches("5/15", TimeField::Minute, 0));
    assert!(matches("5/15", TimeField::Minute, 45));
    assert!(!matches("5/15", TimeField::Minute, 5));
    assert!(!matches("5/15", TimeField::Minute, 20));
}

#[test]
fn step_accepts_star_start() {
    assert!(matches("*/10", TimeField::Minute, 50));
    assert!(!matches("*/10", TimeField::Minute, 55));
}

#[test]
fn step_on_day_field_includes_zero_based_sequence() {
    assert!(matches("*/2", TimeField::Day, 2));
    assert!(matches("*/2", TimeField::Day, 30));
    assert!(!matches("*/2", TimeField::Day, 31));
}

#[test]
fn step_with_bad_interval_never_matches() {
    assert!(!matches("0/0", TimeField::Minute, 0));
    assert!(!matches("0/x", TimeField::Minute, 0));
    assert!(!matches("0/", TimeField::Minute, 0));
    assert!(!matches("0/-5", TimeField::Minute, 0));
    assert!(!matches("q/5", TimeField::Minute, 0));
}

#[test]
fn step_larger_than_range_matches_zero_only() {
    assert!(matches("0/100", TimeField::Minute, 0));
    assert!(!matches("0/100", TimeField::Minute, 59));
}

// -- whole alarms ----------------------------------------------------------

#[test]
fn alarm_at_fixed_time() {
    assert!(alarm_matches("30 14 * * *", &at(30, 14, 9, 5, 4, 2024)));
    assert!(!alarm_matches("30 14 * * *", &at(31, 14, 9, 5, 4, 2024)));
}

#[test]
fn alarm_with_year() {
    assert!(alarm_matches("0 0 1 1 * 2030", &at(0, 0, 1, 1, 3, 2030)));
    assert!(!alarm_matches("0 0 1 1 * 2030", &at(0, 0, 1, 1, 3, 2031)));
}

#[test]
fn alarm_missing_fields_never_matches() {
    assert!(!alarm_matches("* * * *", &at(0, 0, 1, 1, 1, 2024)));
    assert!(!alarm_matches("", &at(0, 0, 1, 1, 1, 2024)));
}

#[test]
fn alarm_double_space_yields_empty_field() {
    assert!(!alarm_matches("*  * * *", &at(0, 0, 1, 1, 1, 2024)));
}

#[test]
fn alarm_trailing_tokens_ignored() {
    assert!(alarm_matches("* * * * * * extra", &at(0, 0, 1, 1, 1, 2024)));
}

#[test]
fn alarm_weekday_question_mark() {
    for weekday in 1..=7 {
        assert!(alarm_matches("0 9 1-5 * ?", &at(0, 9, 3, 6, weekday, 2024)));
    }
    assert!(!alarm_matches("0 9 1-5 * ?", &at(0, 9, 6, 6, 2, 2024)));
}
