//! Calendar helpers for weekly availability and appointment times.
//!
//! Appointment dates and times are stored without a timezone and interpreted as UTC.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Length of a bookable slot in minutes.
pub const SLOT_MINUTES: i64 = 30;

/// How long after the start of an appointment its PIN remains valid.
pub const PIN_VALIDITY_HOURS: i64 = 2;

/// Day of week index used by availability windows, Sunday = 0 through Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Minutes from `start` to `end`; negative when `end` is before `start`.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Returns true when `time` falls on a slot boundary (`:00` or `:30`).
pub fn is_slot_aligned(time: NaiveTime) -> bool {
    time.second() == 0 && time.nanosecond() == 0 && i64::from(time.minute()) % SLOT_MINUTES == 0
}

/// Moment after which the PIN of an appointment starting at `date` `start_time` is rejected.
pub fn pin_expiry(date: NaiveDate, start_time: NaiveTime) -> NaiveDateTime {
    date.and_time(start_time) + Duration::hours(PIN_VALIDITY_HOURS)
}
