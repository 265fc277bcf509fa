use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::bench::{Metadata, TimingEvent};
use crate::dispatch::BatchSummary;

#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    elapsed_ms: u64,
    total_requests: usize,
    success: usize,
    dropped: usize,
    errors: usize,
    backpressure_observed: bool,
    interrupted: bool,
    pending: &'a [String],
    requests: Vec<RequestRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestRecord<'a> {
    id: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    name: &'a str,
    started_at: DateTime<Utc>,
    duration_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Metadata>,
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    summary: SummaryRecord<'a>,
    events: Vec<EventRecord<'a>>,
}

fn summary_record(summary: &BatchSummary) -> SummaryRecord<'_> {
    let counts = summary.counts();
    SummaryRecord {
        elapsed_ms: u64::try_from(summary.elapsed().as_millis()).unwrap_or(u64::MAX),
        total_requests: summary.total(),
        success: counts.success,
        dropped: counts.dropped,
        errors: counts.failed,
        backpressure_observed: summary.backpressure_observed(),
        interrupted: summary.is_interrupted(),
        pending: summary.pending(),
        requests: summary
            .details()
            .iter()
            .map(|detail| RequestRecord {
                id: detail.id.as_str(),
                outcome: detail.outcome.kind().as_str(),
                detail: detail.outcome.detail(),
            })
            .collect(),
    }
}

fn event_record(event: &TimingEvent) -> EventRecord<'_> {
    EventRecord {
        name: event.name(),
        started_at: event.started_at(),
        duration_secs: event.duration().as_secs_f64(),
        metadata: Some(event.metadata()).filter(|metadata| !metadata.is_empty()),
    }
}

pub(crate) fn export_payload(
    summary: &BatchSummary,
    events: &[TimingEvent],
) -> Result<Vec<u8>, serde_json::Error> {
    let payload = ExportRecord {
        summary: summary_record(summary),
        events: events.iter().map(event_record).collect(),
    };
    serde_json::to_vec_pretty(&payload)
}

pub(crate) async fn export_json(
    path: &str,
    summary: &BatchSummary,
    events: &[TimingEvent],
) -> Result<(), std::io::Error> {
    let json = export_payload(summary, events).map_err(std::io::Error::other)?;
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await?;
    writer.flush().await?;
    tracing::info!(path, "exported json");
    Ok(())
}
