use crate::error::Result;
use crate::models::event::Event;
use crate::models::layout::DateBucketMap;
use crate::models::settings::LayoutFlags;

use super::EventLayoutService;

struct CacheEntry {
    events: Vec<Event>,
    flags: LayoutFlags,
    buckets: DateBucketMap,
}

impl CacheEntry {
    fn matches(&self, events: &[Event], flags: &LayoutFlags) -> bool {
        self.flags == *flags && self.events == events
    }
}

/// Caller-owned memo of the last computed bucket map.
///
/// Keyed on the event list value and the layout flags; any change to either
/// recomputes from scratch. A failed computation clears the entry.
#[derive(Default)]
pub struct LayoutCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        service: &EventLayoutService,
        events: &[Event],
    ) -> Result<&DateBucketMap> {
        let flags = service.flags();

        let entry = match self.entry.take() {
            Some(entry) if entry.matches(events, &flags) => {
                self.hits += 1;
                entry
            }
            _ => {
                self.misses += 1;
                log::trace!("layout cache miss; recomputing {} events", events.len());
                CacheEntry {
                    buckets: service.enrich(events)?,
                    events: events.to_vec(),
                    flags,
                }
            }
        };

        Ok(&self.entry.insert(entry).buckets)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
