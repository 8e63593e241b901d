//! Current-instant provider for the "now" marker.
//!
//! The layout engine never reads the wall clock itself; views hold a
//! [`NowIndicator`] that re-reads an injected [`Clock`] once per refresh
//! period and feed the cached instant into the position mapper.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::models::settings::LayoutSettings;
use crate::services::layout::{NowMarker, VerticalPositionMapper};

#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Current instant in the local calendar.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub struct NowIndicator<C: Clock> {
    clock: C,
    refresh: Duration,
    last_read: Option<(Instant, NaiveDateTime)>,
}

impl<C: Clock> NowIndicator<C> {
    pub fn new(clock: C, refresh: Duration) -> Self {
        Self {
            clock,
            refresh,
            last_read: None,
        }
    }

    pub fn from_settings(clock: C, settings: &LayoutSettings) -> Self {
        Self::new(clock, Duration::from_secs(settings.now_refresh_secs))
    }

    pub fn refresh_period(&self) -> Duration {
        self.refresh
    }

    pub fn needs_refresh(&self) -> bool {
        match self.last_read {
            Some((read_at, _)) => read_at.elapsed() >= self.refresh,
            None => true,
        }
    }

    /// Cached instant, re-read from the clock once the period has elapsed.
    pub fn current(&mut self) -> NaiveDateTime {
        if let Some((_, now)) = self.last_read {
            if !self.needs_refresh() {
                return now;
            }
        }
        self.refresh()
    }

    /// Re-read the clock immediately.
    pub fn refresh(&mut self) -> NaiveDateTime {
        let now = self.clock.now();
        log::trace!("now indicator refreshed to {now}");
        self.last_read = Some((Instant::now(), now));
        now
    }

    pub fn marker(
        &mut self,
        dates: &[NaiveDate],
        mapper: &VerticalPositionMapper,
    ) -> Option<NowMarker> {
        let now = self.current();
        mapper.now_marker(dates, now)
    }
}
