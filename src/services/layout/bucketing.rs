//! Splitting events across date columns.
//!
//! Two code paths exist on purpose:
//! - **bucketed**: clip per date first, then resolve overlaps inside each date,
//!   so slots are local to the column;
//! - **flat**: resolve overlaps once over the whole list, then clip lazily per
//!   date, so every column shares one global slot assignment.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};

use super::overlap::{resolve_sorted, resolve_unordered, sort_by_start, validate_ranges};
use crate::error::Result;
use crate::models::event::Event;
use crate::models::layout::{DateBucketMap, EnrichedEvent};
use crate::models::settings::LayoutFlags;
use crate::utils::date::{dates_touched, day_bounds, end_of_day};

/// Which of the two overlap granularities to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Overlap slots computed independently for every date
    Bucketed,
    /// One overlap pass across all dates
    Flat,
}

impl LayoutMode {
    pub fn from_flags(flags: &LayoutFlags) -> Self {
        if flags.enable_enriched_events {
            LayoutMode::Bucketed
        } else {
            LayoutMode::Flat
        }
    }
}

/// The `[start, end)` portion of `event` that is drawn on `date`, or `None`
/// when the event does not touch that date.
///
/// - starts on `date`: native start; end clipped to end-of-day only if the
///   event runs past midnight,
/// - starts earlier, ends on `date`: start re-based to 00:00,
/// - starts earlier, ends after `date`: the whole day.
pub fn clip_to_date(event: &Event, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (day_start, next_day) = day_bounds(date);
    let day_end = end_of_day(day_start);

    if event.start >= day_start && event.start < next_day {
        let end = if event.end > next_day {
            day_end.max(event.start)
        } else {
            event.end
        };
        Some((event.start, end))
    } else if event.start < day_start && event.end > day_start && event.end <= next_day {
        Some((day_start, event.end))
    } else if event.start < day_start && event.end > next_day {
        Some((day_start, day_end))
    } else {
        None
    }
}

fn clipped_event(event: &Event, date: NaiveDate) -> Option<Event> {
    clip_to_date(event, date).map(|(start, end)| {
        if start == event.start && end == event.end {
            event.clone()
        } else {
            event.with_span(start, end)
        }
    })
}

fn clipped_enriched(enriched: &EnrichedEvent, date: NaiveDate) -> Option<EnrichedEvent> {
    clipped_event(&enriched.event, date).map(|event| EnrichedEvent {
        event,
        overlap_position: enriched.overlap_position,
        overlap_count: enriched.overlap_count,
    })
}

/// Enrich `events` into per-date buckets using the path `flags` selects.
pub fn enrich(events: &[Event], flags: &LayoutFlags) -> Result<DateBucketMap> {
    match LayoutMode::from_flags(flags) {
        LayoutMode::Bucketed => enrich_bucketed(
            events,
            flags.events_are_sorted,
            flags.is_event_ordering_enabled,
        ),
        LayoutMode::Flat => Ok(FlatLayout::build(
            events,
            flags.events_are_sorted,
            flags.is_event_ordering_enabled,
        )?
        .to_bucket_map()),
    }
}

/// Bucketed path: classify and clip per date, then resolve each date alone.
pub fn enrich_bucketed(
    events: &[Event],
    assume_sorted: bool,
    ordering_enabled: bool,
) -> Result<DateBucketMap> {
    validate_ranges(events)?;

    let mut per_date: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
    for event in events {
        for date in dates_touched(event.start, event.end) {
            if let Some(clipped) = clipped_event(event, date) {
                per_date.entry(date).or_default().push(clipped);
            }
        }
    }

    let mut buckets = DateBucketMap::new();
    for (date, mut day_events) in per_date {
        // Sorted input stays sorted after clipping: carried-over events all
        // re-base to 00:00 and precede anything starting on the day.
        if !assume_sorted {
            sort_by_start(&mut day_events);
        }

        let resolved = if ordering_enabled {
            resolve_sorted(&day_events)?
        } else {
            resolve_unordered(&day_events)?
        };
        buckets.insert(date, resolved);
    }

    log::debug!(
        "bucketed layout: {} events -> {} entries over {} dates",
        events.len(),
        buckets.total_entries(),
        buckets.len()
    );

    Ok(buckets)
}

/// Flat path: one global overlap pass, clipped per date on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatLayout {
    events: Vec<EnrichedEvent>,
}

impl FlatLayout {
    pub fn build(events: &[Event], assume_sorted: bool, ordering_enabled: bool) -> Result<Self> {
        validate_ranges(events)?;

        let mut sorted = events.to_vec();
        if !assume_sorted {
            sort_by_start(&mut sorted);
        }

        let events = if ordering_enabled {
            resolve_sorted(&sorted)?
        } else {
            resolve_unordered(&sorted)?
        };

        log::debug!("flat layout: resolved {} events in one pass", events.len());
        Ok(Self { events })
    }

    /// Globally resolved events with their native (unclipped) spans
    pub fn events(&self) -> &[EnrichedEvent] {
        &self.events
    }

    /// Events visible on `date`, clipped to the day and ordered by clipped
    /// start, keeping the global slot assignment.
    pub fn events_on(&self, date: NaiveDate) -> Vec<EnrichedEvent> {
        let mut visible: Vec<EnrichedEvent> = self
            .events
            .iter()
            .filter_map(|enriched| clipped_enriched(enriched, date))
            .collect();
        visible.sort_by_key(|enriched| enriched.start);
        visible
    }

    /// Every date touched by at least one event, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.events
            .iter()
            .flat_map(|enriched| dates_touched(enriched.start, enriched.end))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Materialize the lazy per-date view for every touched date.
    pub fn to_bucket_map(&self) -> DateBucketMap {
        let mut buckets = DateBucketMap::new();
        for date in self.dates() {
            let visible = self.events_on(date);
            if !visible.is_empty() {
                buckets.insert(date, visible);
            }
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new(title, start, end).unwrap()
    }

    fn spans(events: &[EnrichedEvent]) -> Vec<(String, NaiveDateTime, NaiveDateTime)> {
        events
            .iter()
            .map(|e| (e.title.clone(), e.start, e.end))
            .collect()
    }

    fn bucketed() -> LayoutFlags {
        LayoutFlags::default()
    }

    fn flat() -> LayoutFlags {
        LayoutFlags {
            enable_enriched_events: false,
            ..LayoutFlags::default()
        }
    }

    #[test]
    fn test_clip_single_day_event_unmodified() {
        let e = event("Lunch", at(3, 12, 0), at(3, 13, 0));
        assert_eq!(clip_to_date(&e, date(3)), Some((e.start, e.end)));
        assert_eq!(clip_to_date(&e, date(4)), None);
        assert_eq!(clip_to_date(&e, date(2)), None);
    }

    #[test]
    fn test_clip_event_ending_at_midnight_keeps_native_end() {
        let e = event("Late", at(3, 22, 0), at(4, 0, 0));
        assert_eq!(clip_to_date(&e, date(3)), Some((e.start, e.end)));
        assert_eq!(clip_to_date(&e, date(4)), None);
    }

    #[test]
    fn test_multi_day_event_splits_into_three_entries() {
        let trip = event("Trip", at(1, 0, 0), at(3, 12, 0));
        let buckets = enrich(&[trip], &bucketed()).unwrap();

        assert_eq!(buckets.total_entries(), 3);
        assert_eq!(
            spans(buckets.events_on(date(1))),
            vec![("Trip".to_string(), at(1, 0, 0), end_of_day(at(1, 0, 0)))]
        );
        assert_eq!(
            spans(buckets.events_on(date(2))),
            vec![("Trip".to_string(), at(2, 0, 0), end_of_day(at(2, 0, 0)))]
        );
        assert_eq!(
            spans(buckets.events_on(date(3))),
            vec![("Trip".to_string(), at(3, 0, 0), at(3, 12, 0))]
        );
    }

    #[test]
    fn test_bucketed_slots_are_per_date() {
        // The overnight shift overlaps "Night" on day 3 and "Early" on day 4,
        // but the two never share a column.
        let events = vec![
            event("Night", at(3, 21, 0), at(3, 23, 0)),
            event("Shift", at(3, 22, 0), at(4, 6, 0)),
            event("Early", at(4, 5, 0), at(4, 7, 0)),
        ];
        let buckets = enrich(&events, &bucketed()).unwrap();

        let day3: Vec<_> = buckets
            .events_on(date(3))
            .iter()
            .map(|e| (e.title.as_str(), e.overlap_position, e.overlap_count))
            .collect();
        assert_eq!(day3, vec![("Night", 0, 2), ("Shift", 1, 2)]);

        let day4: Vec<_> = buckets
            .events_on(date(4))
            .iter()
            .map(|e| (e.title.as_str(), e.overlap_position, e.overlap_count))
            .collect();
        assert_eq!(day4, vec![("Shift", 0, 2), ("Early", 1, 2)]);
    }

    #[test]
    fn test_flat_slots_are_global() {
        let events = vec![
            event("Night", at(3, 21, 0), at(3, 23, 0)),
            event("Shift", at(3, 22, 0), at(4, 6, 0)),
            event("Early", at(4, 5, 0), at(4, 7, 0)),
        ];
        let buckets = enrich(&events, &flat()).unwrap();

        // Globally: Night=0, Shift=1, Early reuses slot 0; one cluster of two.
        let day4: Vec<_> = buckets
            .events_on(date(4))
            .iter()
            .map(|e| (e.title.as_str(), e.overlap_position, e.overlap_count))
            .collect();
        assert_eq!(day4, vec![("Shift", 1, 2), ("Early", 0, 2)]);
        assert_eq!(buckets.events_on(date(4))[0].start, at(4, 0, 0));
    }

    #[test]
    fn test_flat_cluster_spans_dates() {
        // B is alone on day 4, but the global pass clusters it with A.
        let events = vec![
            event("A", at(3, 20, 0), at(3, 23, 0)),
            event("B", at(3, 22, 0), at(4, 1, 0)),
            event("C", at(4, 9, 0), at(4, 10, 0)),
        ];

        let flat_buckets = enrich(&events, &flat()).unwrap();
        let bucketed_buckets = enrich(&events, &bucketed()).unwrap();

        let b_flat = &flat_buckets.events_on(date(4))[0];
        let b_bucketed = &bucketed_buckets.events_on(date(4))[0];
        assert_eq!(b_flat.title, "B");
        assert_eq!((b_flat.overlap_position, b_flat.overlap_count), (1, 2));
        assert_eq!((b_bucketed.overlap_position, b_bucketed.overlap_count), (0, 1));
    }

    #[test]
    fn test_bucket_order_is_by_clipped_start() {
        let events = vec![
            event("Morning", at(4, 8, 0), at(4, 9, 0)),
            event("Overnight", at(3, 23, 0), at(4, 2, 0)),
        ];

        for flags in [bucketed(), flat()] {
            let buckets = enrich(&events, &flags).unwrap();
            let titles: Vec<_> = buckets
                .events_on(date(4))
                .iter()
                .map(|e| e.title.clone())
                .collect();
            assert_eq!(titles, vec!["Overnight", "Morning"]);
        }
    }

    #[test]
    fn test_assume_sorted_skips_sorting() {
        let events = vec![
            event("A", at(3, 9, 0), at(3, 10, 0)),
            event("B", at(3, 9, 30), at(3, 10, 30)),
        ];
        let sorted_flags = LayoutFlags {
            events_are_sorted: true,
            ..LayoutFlags::default()
        };

        assert_eq!(
            enrich(&events, &sorted_flags).unwrap(),
            enrich(&events, &bucketed()).unwrap()
        );
    }

    #[test]
    fn test_ordering_disabled_gives_full_width() {
        let events = vec![
            event("A", at(3, 9, 0), at(3, 10, 0)),
            event("B", at(3, 9, 30), at(3, 10, 30)),
        ];
        let flags = LayoutFlags {
            is_event_ordering_enabled: false,
            ..LayoutFlags::default()
        };

        let buckets = enrich(&events, &flags).unwrap();
        assert!(buckets
            .events_on(date(3))
            .iter()
            .all(|e| e.overlap_position == 0 && e.overlap_count == 1));
    }

    #[test]
    fn test_invalid_range_produces_no_buckets() {
        let mut broken = event("Broken", at(3, 9, 0), at(3, 10, 0));
        broken.end = at(3, 8, 0);
        let events = vec![event("Fine", at(3, 7, 0), at(3, 8, 0)), broken];

        for flags in [bucketed(), flat()] {
            let err = enrich(&events, &flags).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidRange { index: 1, .. }));
        }
    }

    #[test]
    fn test_flat_layout_dates_and_lazy_view() {
        let events = vec![
            event("Trip", at(1, 12, 0), at(2, 12, 0)),
            event("Call", at(5, 9, 0), at(5, 9, 30)),
        ];
        let layout = FlatLayout::build(&events, false, true).unwrap();

        assert_eq!(layout.dates(), vec![date(1), date(2), date(5)]);
        assert!(layout.events_on(date(3)).is_empty());
        assert_eq!(layout.events().len(), 2);
        assert_eq!(layout.events_on(date(2))[0].start, at(2, 0, 0));
    }

    #[test]
    fn test_pass_through_fields_survive_clipping() {
        let trip = Event::builder()
            .title("Trip")
            .start(at(1, 18, 0))
            .end(at(2, 9, 0))
            .color("#3B82F6")
            .extra("ticket", serde_json::json!("QF1"))
            .build()
            .unwrap();

        let buckets = enrich(&[trip], &bucketed()).unwrap();
        let day2 = &buckets.events_on(date(2))[0];
        assert_eq!(day2.color.as_deref(), Some("#3B82F6"));
        assert_eq!(day2.extra.get("ticket"), Some(&serde_json::json!("QF1")));
    }
}
