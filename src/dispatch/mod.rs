//! Concurrent fan-out of one remote tool over many requests, with per-request
//! outcome classification.
mod batch;
mod outcome;
mod summary;

#[cfg(test)]
mod tests;

pub use batch::{BatchRequest, Dispatcher, FALLBACK_EVENT_NAME, build_requests};
pub use outcome::{OVERLOAD_MARKER, Outcome, OutcomeKind, is_overload};
pub use summary::{
    BatchSummary, OutcomeCounts, PASS_LINE, RequestOutcome, WARN_LINE, outcome_line,
    print_summary, summary_lines,
};
