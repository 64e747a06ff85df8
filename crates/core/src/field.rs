use serde::{Deserialize, Serialize};

/// One time component an alarm pattern can constrain.
///
/// `Second` is reserved: it has a range but alarm checks never query it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeField {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Weekday,
    Year,
}

/// Inclusive valid range of a field, as `(min, max)`.
pub type FieldRange = (u32, u32);

/// Field order of an alarm pattern's tokens.
pub const PATTERN_FIELDS: [TimeField; 6] = [
    TimeField::Minute,
    TimeField::Hour,
    TimeField::Day,
    TimeField::Month,
    TimeField::Weekday,
    TimeField::Year,
];

impl TimeField {
    /// Valid inclusive range for this field.
    pub const fn range(self) -> FieldRange {
        match self {
            TimeField::Second => (0, 59),
            TimeField::Minute => (0, 59),
            TimeField::Hour => (0, 23),
            TimeField::Day => (1, 31),
            TimeField::Month => (1, 12),
            TimeField::Weekday => (1, 7),
            TimeField::Year => (1970, 2099),
        }
    }

    pub const fn min(self) -> u32 {
        self.range().0
    }

    pub const fn max(self) -> u32 {
        self.range().1
    }

    /// Coerce a literal into this field's range, saturating at the nearest bound.
    pub fn clamp(self, value: i64) -> u32 {
        let (min, max) = self.range();
        value.clamp(i64::from(min), i64::from(max)) as u32
    }

    /// Whether `?` is accepted as a wildcard for this field.
    pub const fn accepts_any_marker(self) -> bool {
        matches!(self, TimeField::Day | TimeField::Weekday)
    }
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Second => write!(f, "second"),
            TimeField::Minute => write!(f, "minute"),
            TimeField::Hour => write!(f, "hour"),
            TimeField::Day => write!(f, "day"),
            TimeField::Month => write!(f, "month"),
            TimeField::Weekday => write!(f, "weekday"),
            TimeField::Year => write!(f, "year"),
        }
    }
}
