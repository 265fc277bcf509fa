use std::time::Duration;

use super::outcome::{Outcome, OutcomeKind};

pub const PASS_LINE: &str = "PASSED: backpressure observed, the server rejected excess load.";
pub const WARN_LINE: &str = "WARNING: no drops. The server processed everything; increase the request count or decrease its queue size.";

#[derive(Debug)]
pub struct RequestOutcome {
    pub id: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub success: usize,
    pub dropped: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    fn tally<'item, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'item Outcome>,
    {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut counts, outcome| {
                match outcome.kind() {
                    OutcomeKind::Success => counts.success = counts.success.saturating_add(1),
                    OutcomeKind::Dropped => counts.dropped = counts.dropped.saturating_add(1),
                    OutcomeKind::Failed => counts.failed = counts.failed.saturating_add(1),
                }
                counts
            })
    }

    #[must_use]
    pub const fn completed(&self) -> usize {
        self.success
            .saturating_add(self.dropped)
            .saturating_add(self.failed)
    }
}

/// Result of one batch run. Details are in submission order.
#[derive(Debug)]
pub struct BatchSummary {
    details: Vec<RequestOutcome>,
    pending: Vec<String>,
    elapsed: Duration,
    counts: OutcomeCounts,
}

impl BatchSummary {
    #[must_use]
    pub fn new(details: Vec<RequestOutcome>, pending: Vec<String>, elapsed: Duration) -> Self {
        let counts = OutcomeCounts::tally(details.iter().map(|detail| &detail.outcome));
        Self {
            details,
            pending,
            elapsed,
            counts,
        }
    }

    #[must_use]
    pub const fn counts(&self) -> OutcomeCounts {
        self.counts
    }

    #[must_use]
    pub fn details(&self) -> &[RequestOutcome] {
        &self.details
    }

    /// Requests still in flight when the batch was interrupted.
    #[must_use]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Submitted requests, completed or not.
    #[must_use]
    pub fn total(&self) -> usize {
        self.details.len().saturating_add(self.pending.len())
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub const fn backpressure_observed(&self) -> bool {
        self.counts.dropped > 0
    }
}

#[must_use]
pub fn summary_lines(summary: &BatchSummary) -> Vec<String> {
    let counts = summary.counts();
    let mut lines = Vec::with_capacity(summary.total().saturating_add(10));

    lines.push("--- Scan Results ---".to_owned());
    for detail in summary.details() {
        lines.push(outcome_line(detail));
    }

    lines.push(String::new());
    lines.push("Summary:".to_owned());
    lines.push(format!("Total Time: {:.4}s", summary.elapsed().as_secs_f64()));
    lines.push(format!("Total Requests: {}", summary.total()));
    lines.push(format!("SUCCESS: {}", counts.success));
    lines.push(format!("DROPPED: {}", counts.dropped));
    lines.push(format!("ERRORS: {}", counts.failed));
    if summary.is_interrupted() {
        lines.push(format!(
            "Interrupted: {} request(s) still pending",
            summary.pending().len()
        ));
    }

    lines.push(String::new());
    if summary.backpressure_observed() {
        lines.push(PASS_LINE.to_owned());
    } else {
        lines.push(WARN_LINE.to_owned());
    }
    lines
}

pub fn print_summary(summary: &BatchSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

/// The `[ID] ...` line printed for one request.
#[must_use]
pub fn outcome_line(detail: &RequestOutcome) -> String {
    match &detail.outcome {
        Outcome::Success(_) => format!("[{}] SUCCESS", detail.id),
        Outcome::Dropped(_) => format!("[{}] DROPPED (Backpressure Active)", detail.id),
        Outcome::Failed(err) => format!("[{}] ERROR: {}", detail.id, err),
    }
}
