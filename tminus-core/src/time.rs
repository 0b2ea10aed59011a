//! Calendar instants
//!
//! Naive calendar date-times (no timezone) on the proleptic Gregorian
//! calendar, backed by `chrono`. The countdown target and the time reported
//! by the time source are both expressed this way, so their difference
//! needs no offset.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Earliest supported year
pub const MIN_YEAR: u16 = 1970;

/// Latest supported year
pub const MAX_YEAR: u16 = 9999;

/// Calendar field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalendarError {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// A validated calendar date-time with one-second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(NaiveDateTime);

impl Instant {
    /// Build an instant, validating every field
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::Year);
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::Month);
        }
        let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .ok_or(CalendarError::Day)?;

        if hour > 23 {
            return Err(CalendarError::Hour);
        }
        if minute > 59 {
            return Err(CalendarError::Minute);
        }
        let at = date
            .and_hms_opt(hour as u32, minute as u32, second as u32)
            .ok_or(CalendarError::Second)?;

        Ok(Self(at))
    }

    /// Build an instant on a whole minute (second = 0)
    pub fn at_minute(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
    ) -> Result<Self, CalendarError> {
        Self::new(year, month, day, hour, minute, 0)
    }

    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    pub fn second(&self) -> u8 {
        self.0.second() as u8
    }

    /// Seconds since 1970-01-01T00:00:00 under the same no-timezone rule
    pub fn epoch_seconds(&self) -> i64 {
        self.0.and_utc().timestamp()
    }

    /// Signed whole seconds from `self` until `later` (negative if `later` is earlier)
    pub fn seconds_until(&self, later: &Instant) -> i64 {
        later.0.signed_duration_since(self.0).num_seconds()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Instant {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}-{}-{} {}:{}:{}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_origin() {
        let origin = Instant::new(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(origin.epoch_seconds(), 0);
    }

    #[test]
    fn test_known_epoch_values() {
        let cases = [
            ((2026, 5, 26, 8, 0, 0), 1_779_782_400),
            ((2000, 2, 29, 0, 0, 0), 951_782_400),
            ((2024, 12, 31, 23, 59, 59), 1_735_689_599),
        ];
        for ((y, mo, d, h, mi, s), expected) in cases {
            let instant = Instant::new(y, mo, d, h, mi, s).unwrap();
            assert_eq!(instant.epoch_seconds(), expected);
        }
    }

    #[test]
    fn test_seconds_until_is_signed() {
        let a = Instant::new(2026, 5, 24, 8, 0, 30).unwrap();
        let b = Instant::at_minute(2026, 5, 26, 8, 0).unwrap();
        assert_eq!(a.seconds_until(&b), 172_770);
        assert_eq!(b.seconds_until(&a), -172_770);
    }

    #[test]
    fn test_leap_days() {
        assert!(Instant::new(2000, 2, 29, 0, 0, 0).is_ok());
        assert!(Instant::new(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(Instant::new(2028, 2, 29, 12, 0, 0).is_ok());
        assert_eq!(Instant::new(2100, 2, 29, 0, 0, 0), Err(CalendarError::Day));
        assert_eq!(Instant::new(2026, 2, 29, 0, 0, 0), Err(CalendarError::Day));
    }

    #[test]
    fn test_rejects_invalid_fields() {
        assert_eq!(Instant::new(1969, 1, 1, 0, 0, 0), Err(CalendarError::Year));
        assert_eq!(Instant::new(2026, 13, 1, 0, 0, 0), Err(CalendarError::Month));
        assert_eq!(Instant::new(2026, 0, 1, 0, 0, 0), Err(CalendarError::Month));
        assert_eq!(Instant::new(2025, 2, 29, 0, 0, 0), Err(CalendarError::Day));
        assert_eq!(Instant::new(2026, 4, 31, 0, 0, 0), Err(CalendarError::Day));
        assert_eq!(Instant::new(2026, 4, 0, 0, 0, 0), Err(CalendarError::Day));
        assert_eq!(Instant::new(2026, 4, 1, 24, 0, 0), Err(CalendarError::Hour));
        assert_eq!(Instant::new(2026, 4, 1, 0, 60, 0), Err(CalendarError::Minute));
        assert_eq!(Instant::new(2026, 4, 1, 0, 0, 60), Err(CalendarError::Second));
    }

    #[test]
    fn test_fields_round_trip() {
        let instant = Instant::new(2026, 5, 24, 8, 7, 30).unwrap();
        assert_eq!(
            (
                instant.year(),
                instant.month(),
                instant.day(),
                instant.hour(),
                instant.minute(),
                instant.second()
            ),
            (2026, 5, 24, 8, 7, 30)
        );
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier = Instant::new(2025, 12, 31, 23, 59, 59).unwrap();
        let later = Instant::new(2026, 1, 1, 0, 0, 0).unwrap();
        assert!(earlier < later);
        assert_eq!(earlier.seconds_until(&later), 1);
    }
}
