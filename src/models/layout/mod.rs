//! Layout output model.
//!
//! `EnrichedEvent` is an event plus its horizontal slot assignment, and
//! `DateBucketMap` groups (possibly clipped) enriched events by calendar date.

use std::collections::BTreeMap;
use std::ops::Deref;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::event::Event;

/// An event with its overlap slot and the width divisor for its cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: Event,
    /// Horizontal track index among overlapping events (0 = leftmost)
    pub overlap_position: usize,
    /// Peak concurrency of the overlap cluster this event belongs to
    pub overlap_count: usize,
}

impl EnrichedEvent {
    /// An event that shares its column with nobody.
    pub fn solo(event: Event) -> Self {
        Self {
            event,
            overlap_position: 0,
            overlap_count: 1,
        }
    }

    pub fn into_event(self) -> Event {
        self.event
    }
}

impl Deref for EnrichedEvent {
    type Target = Event;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}

/// Per-date view of the visible events, keyed and iterated in date order.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateBucketMap {
    buckets: BTreeMap<NaiveDate, Vec<EnrichedEvent>>,
}

impl DateBucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, events: Vec<EnrichedEvent>) {
        self.buckets.insert(date, events);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&[EnrichedEvent]> {
        self.buckets.get(&date).map(Vec::as_slice)
    }

    /// Events on `date`, or an empty slice when nothing touches it.
    pub fn events_on(&self, date: NaiveDate) -> &[EnrichedEvent] {
        self.get(date).unwrap_or(&[])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[EnrichedEvent])> + '_ {
        self.buckets
            .iter()
            .map(|(date, events)| (*date, events.as_slice()))
    }

    /// Number of dates with at least one entry
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Entries across all dates; a multi-day event counts once per date.
    pub fn total_entries(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Normalized string key for a bucket date, e.g. `"2024-06-03"`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
