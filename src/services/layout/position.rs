//! Mapping instants onto the vertical hour axis and sizing event boxes.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::models::layout::EnrichedEvent;
use crate::models::settings::HourRange;
use crate::utils::date::is_same_day;

/// Fraction of the visible hour range elapsed at `instant`'s time of day,
/// clamped to `[0, 1]`.
///
/// `total_hours` counts hour rows, so the range covers
/// `[min_hour, min_hour + total_hours)`. A zero-hour range maps to 0.
pub fn vertical_fraction(instant: NaiveDateTime, min_hour: u32, total_hours: u32) -> f64 {
    if total_hours == 0 {
        return 0.0;
    }

    let time = instant.time();
    let minutes_since_midnight =
        time.num_seconds_from_midnight() as f64 / 60.0 + time.nanosecond() as f64 / 60e9;
    let minutes = minutes_since_midnight - f64::from(min_hour * 60);

    (minutes / (f64::from(total_hours) * 60.0)).clamp(0.0, 1.0)
}

/// Relative placement of an event inside its date column; every field is a
/// fraction of the column's height or width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventBox {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

impl EventBox {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Where the "now" line goes: which date column and how far down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NowMarker {
    pub column: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPositionMapper {
    hours: HourRange,
}

impl VerticalPositionMapper {
    pub fn new(hours: HourRange) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> HourRange {
        self.hours
    }

    pub fn fraction(&self, instant: NaiveDateTime) -> f64 {
        vertical_fraction(instant, self.hours.min_hour(), self.hours.total_hours())
    }

    /// Like [`fraction`](Self::fraction) but measured from `date`'s first
    /// visible hour, so an end at the next midnight lands at the bottom
    /// instead of wrapping to the top.
    pub fn fraction_on(&self, date: NaiveDate, instant: NaiveDateTime) -> f64 {
        let origin =
            date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.hours.min_hour()));
        let minutes = (instant - origin).num_milliseconds() as f64 / 60_000.0;
        let span = f64::from(self.hours.total_hours()) * 60.0;

        (minutes / span).clamp(0.0, 1.0)
    }

    /// Box for a bucket entry drawn in the column for `date`.
    pub fn event_box(&self, date: NaiveDate, event: &EnrichedEvent) -> EventBox {
        let top = self.fraction_on(date, event.start);
        let bottom = self.fraction_on(date, event.end);
        let count = event.overlap_count.max(1) as f64;

        EventBox {
            top,
            height: (bottom - top).max(0.0),
            left: event.overlap_position as f64 / count,
            width: 1.0 / count,
        }
    }

    /// Marker for `now` if it falls on one of the displayed `dates`.
    pub fn now_marker(&self, dates: &[NaiveDate], now: NaiveDateTime) -> Option<NowMarker> {
        let column = dates
            .iter()
            .position(|date| is_same_day(date.and_time(NaiveTime::MIN), now))?;

        Some(NowMarker {
            column,
            fraction: self.fraction(now),
        })
    }
}
