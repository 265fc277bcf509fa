use super::*;
use crate::bench::Tracker;
use crate::error::{AppError, AppResult, RemoteError};
use crate::remote::ToolArguments;
use crate::remote::test_support::{OVERLOAD_REPLY, ScriptedServer};
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const TOOL: &str = "get_option_data";
const ID_FIELD: &str = "ticker";
const QUICK: Duration = Duration::from_millis(5);
const SLOW: Duration = Duration::from_millis(80);
const STUCK: Duration = Duration::from_secs(30);

const TICKERS: [&str; 30] = [
    "AAPL", "MSFT", "GOOG", "AMZN", "TSLA", "META", "NVDA", "AMD", "INTC", "NFLX", "JPM", "BAC",
    "WFC", "GS", "MS", "C", "V", "MA", "AXP", "PYPL", "DIS", "CMCSA", "T", "VZ", "TMUS", "KO",
    "PEP", "MCD", "SBUX", "WMT",
];

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn shared_arguments() -> ToolArguments {
    let mut shared = ToolArguments::new();
    shared.insert("option_type".to_owned(), json!("call"));
    shared
}

fn requests(values: &[&str]) -> Vec<BatchRequest> {
    build_requests(&ids(values), ID_FIELD, &shared_arguments())
}

fn detail_ids(summary: &BatchSummary) -> Vec<String> {
    summary
        .details()
        .iter()
        .map(|detail| detail.id.clone())
        .collect()
}

#[test]
fn classify_separates_drops_from_failures() -> AppResult<()> {
    let success = Outcome::classify(Ok(json!({ "price": 1 })));
    let dropped = Outcome::classify(Err(RemoteError::Rpc {
        code: -32000,
        message: "System Overloaded, try later".to_owned(),
    }));
    let failed = Outcome::classify(Err(RemoteError::tool("ticker not found")));
    let lowercase = Outcome::classify(Err(RemoteError::tool("system overloaded")));

    let kinds = [
        success.kind(),
        dropped.kind(),
        failed.kind(),
        lowercase.kind(),
    ];
    let expected = [
        OutcomeKind::Success,
        OutcomeKind::Dropped,
        OutcomeKind::Failed,
        OutcomeKind::Failed,
    ];
    if kinds != expected {
        return Err(AppError::validation(format!("Unexpected kinds: {:?}", kinds)));
    }
    if dropped.detail().is_none_or(|detail| !detail.contains(OVERLOAD_MARKER)) {
        return Err(AppError::validation("Dropped outcome lost the rejection text"));
    }
    Ok(())
}

#[test]
fn build_requests_merges_shared_arguments_and_id() -> AppResult<()> {
    let mut shared = shared_arguments();
    shared.insert(ID_FIELD.to_owned(), json!("IGNORED"));
    let built = build_requests(&ids(&["AAPL", "MSFT"]), ID_FIELD, &shared);

    let Some(first) = built.first() else {
        return Err(AppError::validation("Expected requests"));
    };
    if first.id != "AAPL"
        || first.arguments.get(ID_FIELD) != Some(&json!("AAPL"))
        || first.arguments.get("option_type") != Some(&json!("call"))
    {
        return Err(AppError::validation(format!(
            "Unexpected arguments: {:?}",
            first.arguments
        )));
    }
    if built.len() != 2 {
        return Err(AppError::validation("Expected one request per id"));
    }
    Ok(())
}

#[test]
fn thirty_requests_against_five_slots_observe_backpressure() -> AppResult<()> {
    run_async_test(async {
        let server = Arc::new(ScriptedServer::new(ID_FIELD, 5, QUICK));
        let dispatcher = Dispatcher::new(server.clone(), TOOL);

        let summary = dispatcher.run(requests(&TICKERS)).await;
        let counts = summary.counts();

        if counts.success.saturating_add(counts.dropped) != TICKERS.len() {
            return Err(AppError::validation(format!("Counts do not add up: {:?}", counts)));
        }
        if counts.dropped == 0 || counts.failed != 0 {
            return Err(AppError::validation(format!("Expected drops only: {:?}", counts)));
        }
        if counts.success != 5 {
            return Err(AppError::validation(format!(
                "Expected exactly the server's 5 slots to succeed: {:?}",
                counts
            )));
        }
        if server.peak_in_flight() <= 5 {
            return Err(AppError::validation("Requests were throttled client-side"));
        }
        if server.calls() != TICKERS.len() {
            return Err(AppError::validation("Dropped requests must not be retried"));
        }
        let lines = summary_lines(&summary);
        if !lines.iter().any(|line| line.contains("backpressure observed")) {
            return Err(AppError::validation(format!("Missing pass line: {:?}", lines)));
        }
        let drop_lines = lines
            .iter()
            .filter(|line| line.starts_with('[') && line.ends_with("] DROPPED (Backpressure Active)"))
            .count();
        if drop_lines != counts.dropped {
            return Err(AppError::validation(format!("Unexpected result lines: {:?}", lines)));
        }
        Ok(())
    })
}

#[test]
fn details_keep_submission_order_when_middle_request_finishes_last() -> AppResult<()> {
    run_async_test(async {
        let server = ScriptedServer::new(ID_FIELD, 10, QUICK).with_delay("GOOG", SLOW);
        let tracker = Tracker::new();
        let dispatcher = Dispatcher::new(Arc::new(server), TOOL).with_tracker(&tracker);
        let order = ["AAPL", "MSFT", "GOOG", "AMZN", "TSLA"];

        let summary = dispatcher.run(requests(&order)).await;

        if detail_ids(&summary) != order {
            return Err(AppError::validation(format!(
                "Submission order lost: {:?}",
                detail_ids(&summary)
            )));
        }
        let events = tracker.events();
        if events.len() != order.len() {
            return Err(AppError::validation(format!(
                "Expected one event per request, got {}",
                events.len()
            )));
        }
        if events.last().map(|event| event.name()) != Some("get_option_data:GOOG") {
            return Err(AppError::validation("Event log must follow completion order"));
        }
        if events.iter().any(|event| event.end() < event.start()) {
            return Err(AppError::validation("Negative event duration"));
        }
        Ok(())
    })
}

#[test]
fn failing_request_does_not_cancel_its_siblings() -> AppResult<()> {
    run_async_test(async {
        let server = ScriptedServer::new(ID_FIELD, 10, QUICK).with_failure("MSFT");
        let dispatcher = Dispatcher::new(Arc::new(server), TOOL);

        let summary = dispatcher.run(requests(&["AAPL", "MSFT", "GOOG"])).await;
        let counts = summary.counts();

        if counts
            != (OutcomeCounts {
                success: 2,
                dropped: 0,
                failed: 1,
            })
        {
            return Err(AppError::validation(format!("Unexpected counts: {:?}", counts)));
        }
        let lines = summary_lines(&summary);
        if !lines
            .iter()
            .any(|line| line == "[MSFT] ERROR: quote feed unavailable for MSFT")
        {
            return Err(AppError::validation(format!("Missing error line: {:?}", lines)));
        }
        if !lines.iter().any(|line| line == WARN_LINE) {
            return Err(AppError::validation("Zero drops must produce the warning line"));
        }
        Ok(())
    })
}

#[test]
fn empty_batch_reports_zero_counts() -> AppResult<()> {
    run_async_test(async {
        let server = ScriptedServer::new(ID_FIELD, 5, QUICK);
        let dispatcher = Dispatcher::new(Arc::new(server), TOOL);

        let summary = dispatcher.run(Vec::new()).await;

        if summary.counts() != OutcomeCounts::default() || summary.total() != 0 {
            return Err(AppError::validation("Expected all-zero summary"));
        }
        let lines = summary_lines(&summary);
        let expected_tail = [
            "Total Requests: 0",
            "SUCCESS: 0",
            "DROPPED: 0",
            "ERRORS: 0",
            "",
            WARN_LINE,
        ];
        let tail: Vec<&str> = lines
            .iter()
            .skip(lines.len().saturating_sub(expected_tail.len()))
            .map(String::as_str)
            .collect();
        if tail != expected_tail {
            return Err(AppError::validation(format!("Unexpected summary: {:?}", lines)));
        }
        let timing = lines
            .iter()
            .find(|line| line.starts_with("Total Time: "))
            .ok_or_else(|| AppError::validation("Missing Total Time line"))?;
        let seconds = timing
            .trim_start_matches("Total Time: ")
            .strip_suffix('s')
            .ok_or_else(|| AppError::validation("Total Time must end in seconds"))?;
        if seconds.split_once('.').map(|(_, decimals)| decimals.len()) != Some(4) {
            return Err(AppError::validation(format!("Unexpected timing line: {}", timing)));
        }
        Ok(())
    })
}

#[test]
fn shutdown_keeps_completed_outcomes_and_lists_pending() -> AppResult<()> {
    run_async_test(async {
        let server = ScriptedServer::new(ID_FIELD, 10, QUICK).with_delay("TSLA", STUCK);
        let dispatcher = Dispatcher::new(Arc::new(server), TOOL);
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::broadcast::channel::<()>(1);

        let (summary, sent) = tokio::join!(
            dispatcher.run_until_shutdown(requests(&["AAPL", "TSLA", "MSFT"]), &mut shutdown_rx),
            async {
                tokio::time::sleep(SLOW).await;
                shutdown_tx.send(())
            }
        );

        if sent.is_err() {
            return Err(AppError::validation("Failed to send shutdown"));
        }
        if summary.pending() != ["TSLA".to_owned()] || detail_ids(&summary) != ["AAPL", "MSFT"] {
            return Err(AppError::validation(format!(
                "Unexpected split: done {:?}, pending {:?}",
                detail_ids(&summary),
                summary.pending()
            )));
        }
        if summary.elapsed() >= STUCK {
            return Err(AppError::validation("Shutdown did not stop waiting"));
        }
        let lines = summary_lines(&summary);
        if !lines
            .iter()
            .any(|line| line == "Interrupted: 1 request(s) still pending")
        {
            return Err(AppError::validation(format!("Missing interrupt line: {:?}", lines)));
        }
        Ok(())
    })
}

#[test]
fn overload_reply_fixture_matches_marker() -> AppResult<()> {
    if !is_overload(OVERLOAD_REPLY) || is_overload(&Value::Null.to_string()) {
        return Err(AppError::validation("Marker matching is broken"));
    }
    Ok(())
}
