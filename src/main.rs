// Calendar Layout CLI
// Reads a JSON event list and prints the computed time-grid layout

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use calendar_layout::models::event::Event;
use calendar_layout::models::layout::{date_key, EnrichedEvent};
use calendar_layout::models::settings::HourRange;
use calendar_layout::services::clock::{NowIndicator, SystemClock};
use calendar_layout::services::layout::{EventBox, EventLayoutService, LayoutMode, NowMarker};
use calendar_layout::services::settings::{default_settings_path, load_settings};

#[derive(Serialize)]
struct PlacedEvent<'a> {
    #[serde(flatten)]
    event: &'a EnrichedEvent,
    #[serde(rename = "box")]
    geometry: EventBox,
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    hours: HourRange,
    mode: &'static str,
    now: Option<NowMarker>,
    days: BTreeMap<String, Vec<PlacedEvent<'a>>>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(events_path) = args.next().map(PathBuf::from) else {
        bail!("usage: calendar-layout <events.json> [layout.toml]");
    };
    let settings_path = args.next().map(PathBuf::from).unwrap_or_else(default_settings_path);

    let settings = load_settings(&settings_path)?;
    let service = EventLayoutService::new(&settings).context("invalid layout settings")?;

    let data = fs::read_to_string(&events_path)
        .with_context(|| format!("failed to read events from {}", events_path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse events in {}", events_path.display()))?;

    log::info!(
        "Laying out {} events from {} ({:?} mode)",
        events.len(),
        events_path.display(),
        service.mode()
    );

    let buckets = service
        .enrich(&events)
        .with_context(|| format!("failed to lay out events from {}", events_path.display()))?;

    let dates: Vec<_> = buckets.dates().collect();
    let mut now_indicator = NowIndicator::from_settings(SystemClock, &settings);

    let days = buckets
        .iter()
        .map(|(date, entries)| {
            let placed = entries
                .iter()
                .map(|event| PlacedEvent {
                    event,
                    geometry: service.event_box(date, event),
                })
                .collect();
            (date_key(date), placed)
        })
        .collect();

    let report = LayoutReport {
        hours: service.hours(),
        mode: match service.mode() {
            LayoutMode::Bucketed => "bucketed",
            LayoutMode::Flat => "flat",
        },
        now: now_indicator.marker(&dates, service.mapper()),
        days,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
