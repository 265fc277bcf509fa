use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use super::event::{Metadata, TimingEvent};
use super::tracker::Tracker;

/// Scoped timing span.
///
/// The event is appended when the timer is finished or dropped, whichever
/// comes first, so early returns, `?`, unwinding, and cancelled futures all
/// record exactly one event.
#[derive(Debug)]
pub struct Timer {
    tracker: Tracker,
    name: String,
    metadata: Metadata,
    started_at: DateTime<Utc>,
    start: Instant,
    recorded: bool,
}

impl Timer {
    pub fn start<N>(tracker: &Tracker, name: N) -> Self
    where
        N: Into<String>,
    {
        Self::with_metadata(tracker, name, Metadata::new())
    }

    pub fn with_metadata<N>(tracker: &Tracker, name: N, metadata: Metadata) -> Self
    where
        N: Into<String>,
    {
        Self {
            tracker: tracker.clone(),
            name: name.into(),
            metadata,
            started_at: Utc::now(),
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Adds or replaces a metadata entry before the span closes.
    pub fn annotate<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata.insert(key.into(), value.into());
    }

    /// Closes the span now and returns its duration.
    pub fn finish(mut self) -> Duration {
        self.close()
    }

    fn close(&mut self) -> Duration {
        let end = Instant::now();
        let duration = end.saturating_duration_since(self.start);
        if self.recorded {
            return duration;
        }
        self.recorded = true;
        let event = TimingEvent::new(
            std::mem::take(&mut self.name),
            self.started_at,
            self.start,
            end,
            std::mem::take(&mut self.metadata),
        );
        self.tracker.record(event);
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.recorded {
            self.close();
        }
    }
}
