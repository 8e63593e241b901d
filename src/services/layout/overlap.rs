//! Overlap resolution for events sharing a column.
//!
//! Slots are assigned greedily in start order (lowest vacated track first),
//! then every event in a time-connected cluster gets the cluster's peak track
//! count as its width divisor.

use chrono::NaiveDateTime;

use crate::error::{LayoutError, Result};
use crate::models::event::Event;
use crate::models::layout::EnrichedEvent;

/// Whether `event` still occupies `instant`, for an event starting no later
/// than `instant`. A zero-duration event occupies exactly its start instant.
fn occupies(event: &Event, instant: NaiveDateTime) -> bool {
    event.start <= instant && (instant < event.end || instant == event.start)
}

/// Half-open overlap test. Back-to-back events (`a.end == b.start`) do not
/// overlap; a zero-duration event overlaps whatever is open at its instant.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    let (first, second) = if a.start <= b.start { (a, b) } else { (b, a) };
    occupies(first, second.start)
}

/// Reject the whole list if any event ends before it starts.
pub fn validate_ranges(events: &[Event]) -> Result<()> {
    match events.iter().position(|event| event.end < event.start) {
        Some(index) => {
            let event = &events[index];
            Err(LayoutError::InvalidRange {
                index,
                title: event.title.clone(),
                start: event.start,
                end: event.end,
            })
        }
        None => Ok(()),
    }
}

/// Stable sort by start instant; equal starts keep input order.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by_key(|event| event.start);
}

fn is_sorted_by_start(events: &[Event]) -> bool {
    events.windows(2).all(|pair| pair[0].start <= pair[1].start)
}

/// Sort a copy of `events` by start, then resolve overlaps.
pub fn resolve(events: &[Event]) -> Result<Vec<EnrichedEvent>> {
    validate_ranges(events)?;

    let mut sorted = events.to_vec();
    sort_by_start(&mut sorted);
    Ok(assign(sorted))
}

/// Resolve overlaps trusting the caller that `events` is sorted by start.
pub fn resolve_sorted(events: &[Event]) -> Result<Vec<EnrichedEvent>> {
    validate_ranges(events)?;

    if !is_sorted_by_start(events) {
        log::warn!(
            "resolve_sorted received {} events out of start order; slot assignment may collide",
            events.len()
        );
    }

    Ok(assign(events.to_vec()))
}

/// Resolve with ordering switched off: every event spans the full column.
pub fn resolve_unordered(events: &[Event]) -> Result<Vec<EnrichedEvent>> {
    validate_ranges(events)?;
    Ok(events.iter().cloned().map(EnrichedEvent::solo).collect())
}

fn assign(events: Vec<Event>) -> Vec<EnrichedEvent> {
    let positions = assign_slots(&events);
    let counts = cluster_counts(&events, &positions);

    log::trace!(
        "resolved {} events into {} tracks",
        events.len(),
        counts.iter().copied().max().unwrap_or(0)
    );

    events
        .into_iter()
        .zip(positions)
        .zip(counts)
        .map(|((event, overlap_position), overlap_count)| EnrichedEvent {
            event,
            overlap_position,
            overlap_count,
        })
        .collect()
}

/// Greedy interval colouring: reuse the lowest slot whose occupant no longer
/// occupies the new event's start, else open a new slot.
fn assign_slots(events: &[Event]) -> Vec<usize> {
    // Index into `events` of the latest occupant of each slot.
    let mut tracks: Vec<usize> = Vec::new();
    let mut positions = Vec::with_capacity(events.len());

    for (index, event) in events.iter().enumerate() {
        let free = tracks
            .iter()
            .position(|&occupant| !occupies(&events[occupant], event.start));

        let slot = match free {
            Some(slot) => {
                tracks[slot] = index;
                slot
            }
            None => {
                tracks.push(index);
                tracks.len() - 1
            }
        };
        positions.push(slot);
    }

    positions
}

/// Second pass: split the start-ordered list into clusters joined by
/// transitive overlap and give each member `1 + max(position)`.
fn cluster_counts(events: &[Event], positions: &[usize]) -> Vec<usize> {
    let mut counts = vec![1; events.len()];
    let mut cluster_start = 0;
    let mut cluster_end: Option<NaiveDateTime> = None;
    let mut last_start: Option<NaiveDateTime> = None;

    for (index, event) in events.iter().enumerate() {
        let joins = match (cluster_end, last_start) {
            (Some(end), Some(start)) => event.start < end || event.start == start,
            _ => false,
        };

        if !joins && index > 0 {
            close_cluster(&mut counts, positions, cluster_start..index);
            cluster_start = index;
            cluster_end = None;
        }

        cluster_end = Some(cluster_end.map_or(event.end, |end| end.max(event.end)));
        last_start = Some(event.start);
    }

    if !events.is_empty() {
        close_cluster(&mut counts, positions, cluster_start..events.len());
    }

    counts
}

fn close_cluster(counts: &mut [usize], positions: &[usize], range: std::ops::Range<usize>) {
    let peak = positions[range.clone()].iter().copied().max().unwrap_or(0) + 1;
    for count in &mut counts[range] {
        *count = peak;
    }
}
