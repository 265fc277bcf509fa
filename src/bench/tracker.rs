use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::event::TimingEvent;
use super::report::report_lines;

/// Handle to the process-wide timing event log.
///
/// The entry point creates one tracker and hands clones to every component
/// that records events. Every clone appends to the same log; `reset` clears
/// it for everyone.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    log: Arc<Mutex<Vec<TimingEvent>>>,
}

impl Tracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event. The lock is held only for the push.
    pub fn record(&self, event: TimingEvent) {
        tracing::debug!(
            event = event.name(),
            duration_ms = u64::try_from(event.duration().as_millis()).unwrap_or(u64::MAX),
            "timing event recorded"
        );
        self.lock().push(event);
    }

    /// Snapshot of the log in completion order.
    #[must_use]
    pub fn events(&self) -> Vec<TimingEvent> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    /// True when both handles point at the same underlying log.
    #[must_use]
    pub fn shares_log_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.log, &other.log)
    }

    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        report_lines(&self.lock())
    }

    pub fn print_report(&self) {
        for line in self.report_lines() {
            println!("{}", line);
        }
    }

    // Appends are single pushes, so a poisoned log is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<TimingEvent>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
