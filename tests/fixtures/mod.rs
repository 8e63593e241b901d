// Test fixtures - reusable test data
// Provides consistent events across the integration and property tests

#![allow(dead_code)]

use calendar_layout::models::event::Event;
use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, June 3 2024
    pub fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    pub fn june_at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        june(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    /// Monday through Sunday of the fixture week
    pub fn fixture_week() -> Vec<NaiveDate> {
        (3..=9).map(june).collect()
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::june_at;
    use super::*;

    pub fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new(title, start, end).unwrap()
    }

    /// E1 10:00-11:00, E2 10:30-11:30, E3 12:00-13:00 on June 3
    pub fn reference_trio() -> Vec<Event> {
        vec![
            event("E1", june_at(3, 10, 0), june_at(3, 11, 0)),
            event("E2", june_at(3, 10, 30), june_at(3, 11, 30)),
            event("E3", june_at(3, 12, 0), june_at(3, 13, 0)),
        ]
    }

    /// Runs from June 1 00:00 to June 3 12:00
    pub fn conference() -> Event {
        Event::builder()
            .title("Conference")
            .start(june_at(1, 0, 0))
            .end(june_at(3, 12, 0))
            .category("Work")
            .color("#8B5CF6")
            .build()
            .unwrap()
    }

    /// A realistic busy week, deliberately not in start order
    pub fn busy_week() -> Vec<Event> {
        vec![
            event("Planning", june_at(4, 9, 0), june_at(4, 10, 30)),
            event("Standup", june_at(3, 9, 0), june_at(3, 9, 15)),
            event("Design review", june_at(3, 9, 0), june_at(3, 10, 0)),
            event("Lunch", june_at(3, 12, 0), june_at(3, 13, 0)),
            event("On-call", june_at(3, 18, 0), june_at(5, 8, 0)),
            event("1:1", june_at(4, 10, 0), june_at(4, 10, 30)),
            event("Deploy", june_at(4, 10, 15), june_at(4, 11, 0)),
            event("Retro", june_at(5, 16, 0), june_at(5, 17, 0)),
            event("Reminder", june_at(5, 16, 30), june_at(5, 16, 30)),
        ]
    }

    /// Event whose end precedes its start (bypasses `Event::new` validation)
    pub fn inverted(title: &str) -> Event {
        let mut event = event(title, june_at(3, 9, 0), june_at(3, 10, 0));
        event.end = june_at(3, 8, 0);
        event
    }
}
