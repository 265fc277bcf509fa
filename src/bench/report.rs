use super::event::{Metadata, TimingEvent};

pub const REPORT_TITLE: &str = "=== PERFORMANCE BENCHMARK REPORT ===";
pub const NO_EVENTS_NOTICE: &str = "No events recorded.";

/// Column width for event names.
const NAME_WIDTH: usize = 30;
/// Column width for durations in seconds.
const DURATION_WIDTH: usize = 12;
/// Width of the separator rules around the table body.
const RULE_WIDTH: usize = 80;

/// Renders the event table, one row per event in log order.
#[must_use]
pub fn report_lines(events: &[TimingEvent]) -> Vec<String> {
    if events.is_empty() {
        return vec![NO_EVENTS_NOTICE.to_owned()];
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = Vec::with_capacity(events.len().saturating_add(4));
    lines.push(REPORT_TITLE.to_owned());
    lines.push(format!(
        "{:<name$} | {:<duration$} | Metadata",
        "Event Name",
        "Duration (s)",
        name = NAME_WIDTH,
        duration = DURATION_WIDTH
    ));
    lines.push(rule.clone());
    lines.extend(events.iter().map(event_row));
    lines.push(rule);
    lines
}

fn event_row(event: &TimingEvent) -> String {
    let columns = format!(
        "{:<name$} | {:<duration$.4}",
        event.name(),
        event.duration().as_secs_f64(),
        name = NAME_WIDTH,
        duration = DURATION_WIDTH
    );
    match format_metadata(event.metadata()) {
        Some(metadata) => format!("{} | {}", columns, metadata),
        None => columns.trim_end().to_owned(),
    }
}

fn format_metadata(metadata: &Metadata) -> Option<String> {
    if metadata.is_empty() {
        return None;
    }
    let pairs: Vec<String> = metadata
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    Some(format!("{{{}}}", pairs.join(", ")))
}
