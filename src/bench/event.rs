use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Free-form event annotations, kept sorted so reports render deterministically.
pub type Metadata = BTreeMap<String, String>;

/// One completed timing measurement.
#[derive(Debug, Clone)]
pub struct TimingEvent {
    name: String,
    started_at: DateTime<Utc>,
    start: Instant,
    end: Instant,
    metadata: Metadata,
}

impl TimingEvent {
    pub(crate) const fn new(
        name: String,
        started_at: DateTime<Utc>,
        start: Instant,
        end: Instant,
        metadata: Metadata,
    ) -> Self {
        Self {
            name,
            started_at,
            start,
            end,
            metadata,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wall-clock time the span was opened.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn start(&self) -> Instant {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Instant {
        self.end
    }

    /// Time between start and end; zero if the clock reported them out of order.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }

    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
