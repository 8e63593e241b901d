// Date utility functions
// Day-boundary arithmetic shared by the layout engine

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Which ends of a range count as "inside" for [`is_between`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// `[lo, hi]`
    Inclusive,
    /// `(lo, hi)`
    Exclusive,
    /// `[lo, hi)`
    InclusiveLow,
    /// `(lo, hi]`
    InclusiveHigh,
}

impl Bounds {
    fn includes_low(self) -> bool {
        matches!(self, Bounds::Inclusive | Bounds::InclusiveLow)
    }

    fn includes_high(self) -> bool {
        matches!(self, Bounds::Inclusive | Bounds::InclusiveHigh)
    }
}

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Last millisecond of the day (`23:59:59.999`).
pub fn end_of_day(date: NaiveDateTime) -> NaiveDateTime {
    start_of_next_day(date) - Duration::milliseconds(1)
}

pub fn start_of_next_day(date: NaiveDateTime) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1)
}

/// Half-open bounds `[00:00, next day 00:00)` for a calendar date.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    (start, start + Duration::days(1))
}

pub fn is_before(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a < b
}

pub fn is_after(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a > b
}

pub fn is_between(
    instant: NaiveDateTime,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
    bounds: Bounds,
) -> bool {
    let above_low = if bounds.includes_low() {
        instant >= lo
    } else {
        instant > lo
    };
    let below_high = if bounds.includes_high() {
        instant <= hi
    } else {
        instant < hi
    };
    above_low && below_high
}

/// Every calendar date whose `[00:00, next 00:00)` window intersects
/// `[start, end)`. A zero-duration range touches only the date of `start`.
pub fn dates_touched(start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDate> {
    let first = start.date();
    let last = if end > start {
        // `end` is exclusive; an event ending at midnight does not reach that date
        (end - Duration::nanoseconds(1)).date()
    } else {
        first
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .collect()
}
