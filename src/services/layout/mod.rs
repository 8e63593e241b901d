//! Event layout service entry point.
//! Places events into date columns and horizontal overlap slots, organized
//! across focused submodules.

pub mod bucketing;
pub mod cache;
pub mod overlap;
pub mod position;

pub use bucketing::{clip_to_date, enrich, FlatLayout, LayoutMode};
pub use cache::LayoutCache;
pub use overlap::{overlaps, resolve, resolve_sorted};
pub use position::{vertical_fraction, EventBox, NowMarker, VerticalPositionMapper};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Result;
use crate::models::event::Event;
use crate::models::layout::{DateBucketMap, EnrichedEvent};
use crate::models::settings::{HourRange, LayoutFlags, LayoutSettings};

/// Layout engine configured with a validated hour range and mode flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventLayoutService {
    flags: LayoutFlags,
    mapper: VerticalPositionMapper,
}

impl EventLayoutService {
    /// Build the service, rejecting an invalid hour range up front.
    pub fn new(settings: &LayoutSettings) -> Result<Self> {
        let hours = settings.hour_range()?;
        Ok(Self::with_flags(hours, settings.flags()))
    }

    pub fn with_flags(hours: HourRange, flags: LayoutFlags) -> Self {
        Self {
            flags,
            mapper: VerticalPositionMapper::new(hours),
        }
    }

    pub fn flags(&self) -> LayoutFlags {
        self.flags
    }

    pub fn hours(&self) -> HourRange {
        self.mapper.hours()
    }

    pub fn mode(&self) -> LayoutMode {
        LayoutMode::from_flags(&self.flags)
    }

    pub fn mapper(&self) -> &VerticalPositionMapper {
        &self.mapper
    }

    /// Per-date buckets, bucketed or flat according to the flags.
    pub fn enrich(&self, events: &[Event]) -> Result<DateBucketMap> {
        enrich(events, &self.flags)
    }

    /// The flat path's single global pass, for callers doing their own
    /// per-date filtering.
    pub fn flat_layout(&self, events: &[Event]) -> Result<FlatLayout> {
        FlatLayout::build(
            events,
            self.flags.events_are_sorted,
            self.flags.is_event_ordering_enabled,
        )
    }

    /// Overlap slots for events assumed to share one column.
    pub fn resolve(&self, events: &[Event]) -> Result<Vec<EnrichedEvent>> {
        if !self.flags.is_event_ordering_enabled {
            return overlap::resolve_unordered(events);
        }
        if self.flags.events_are_sorted {
            resolve_sorted(events)
        } else {
            resolve(events)
        }
    }

    pub fn vertical_fraction(&self, instant: NaiveDateTime) -> f64 {
        self.mapper.fraction(instant)
    }

    pub fn event_box(&self, date: NaiveDate, event: &EnrichedEvent) -> EventBox {
        self.mapper.event_box(date, event)
    }
}
