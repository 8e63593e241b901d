// Settings module
// Visible hour range and layout mode flags

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

pub const DEFAULT_NOW_REFRESH_SECS: u64 = 60;

/// Inclusive range of hours shown on the vertical axis.
///
/// Only constructible through [`HourRange::new`], so a value of this type
/// always satisfies `0 <= min_hour <= max_hour <= 23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourRange {
    min_hour: u32,
    max_hour: u32,
}

impl HourRange {
    pub fn new(min_hour: u32, max_hour: u32) -> Result<Self> {
        if max_hour > 23 || min_hour > max_hour {
            return Err(LayoutError::OutOfRangeHourConfig { min_hour, max_hour });
        }
        Ok(Self { min_hour, max_hour })
    }

    /// The whole day, `0..=23`.
    pub fn full_day() -> Self {
        Self {
            min_hour: 0,
            max_hour: 23,
        }
    }

    pub fn min_hour(&self) -> u32 {
        self.min_hour
    }

    pub fn max_hour(&self) -> u32 {
        self.max_hour
    }

    /// Number of hour rows, counting both bounds.
    pub fn total_hours(&self) -> u32 {
        self.max_hour - self.min_hour + 1
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self::full_day()
    }
}

/// Flags that pick the layout code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutFlags {
    /// Compute overlap slots at all; when off every event spans the full column
    pub is_event_ordering_enabled: bool,
    /// Per-date (bucketed) overlap computation instead of one global pass
    pub enable_enriched_events: bool,
    /// Caller guarantees ascending start order
    pub events_are_sorted: bool,
}

impl Default for LayoutFlags {
    fn default() -> Self {
        Self {
            is_event_ordering_enabled: true,
            enable_enriched_events: true,
            events_are_sorted: false,
        }
    }
}

/// User-facing layout configuration, as stored in `layout.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub min_hour: u32,
    pub max_hour: u32,
    pub is_event_ordering_enabled: bool,
    pub enable_enriched_events: bool,
    pub events_are_sorted: bool,
    /// How often the "now" marker re-reads the clock
    pub now_refresh_secs: u64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let flags = LayoutFlags::default();
        Self {
            min_hour: 0,
            max_hour: 23,
            is_event_ordering_enabled: flags.is_event_ordering_enabled,
            enable_enriched_events: flags.enable_enriched_events,
            events_are_sorted: flags.events_are_sorted,
            now_refresh_secs: DEFAULT_NOW_REFRESH_SECS,
        }
    }
}

impl LayoutSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.hour_range().map(|_| ())
    }

    pub fn hour_range(&self) -> Result<HourRange> {
        HourRange::new(self.min_hour, self.max_hour)
    }

    pub fn flags(&self) -> LayoutFlags {
        LayoutFlags {
            is_event_ordering_enabled: self.is_event_ordering_enabled,
            enable_enriched_events: self.enable_enriched_events,
            events_are_sorted: self.events_are_sorted,
        }
    }
}
