use std::slice;
use std::time::Duration;

use crate::args::SingleArgs;
use crate::bench::{Metadata, Timer, Tracker, instrument};
use crate::dispatch::{
    BatchSummary, FALLBACK_EVENT_NAME, Outcome, RequestOutcome, build_requests, outcome_line,
};
use crate::error::AppResult;
use crate::remote::{McpClient, ToolArguments, ToolInvoker};
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

use super::export::export_json;

/// Name of the event spanning a whole single run.
pub(crate) const RUN_EVENT_NAME: &str = "single_run";

pub(crate) async fn run_single(
    args: SingleArgs,
    tracker: &Tracker,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<()> {
    println!("Connecting to MCP server at {}...", args.target.url);
    let client = McpClient::new(args.target.url.as_str(), args.target.timeout)?;

    let Some(summary) = single_until_shutdown(&client, &args, tracker, shutdown_rx).await else {
        for line in interrupted_lines(tracker) {
            println!("{}", line);
        }
        return Ok(());
    };
    for detail in summary.details() {
        println!("{}", outcome_line(detail));
        if let Outcome::Success(value) = &detail.outcome {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }

    println!();
    tracker.print_report();
    if let Some(path) = args.export_json.as_deref() {
        export_json(path, &summary, &tracker.events()).await?;
    }
    Ok(())
}

/// Runs [`single_with`] unless a shutdown arrives first. The interrupted
/// run's timers still record their events.
pub(crate) async fn single_until_shutdown(
    invoker: &dyn ToolInvoker,
    args: &SingleArgs,
    tracker: &Tracker,
    shutdown_rx: &mut ShutdownReceiver,
) -> Option<BatchSummary> {
    tokio::select! {
        summary = single_with(invoker, args, tracker) => Some(summary),
        () = wait_for_shutdown(&mut *shutdown_rx) => {
            tracing::warn!(id = %args.id, "single run interrupted");
            None
        }
    }
}

/// Output for an interrupted single run: the pending notice, then the report.
pub(crate) fn interrupted_lines(tracker: &Tracker) -> Vec<String> {
    let mut lines = vec![
        "Interrupted: 1 request(s) still pending".to_owned(),
        String::new(),
    ];
    lines.extend(tracker.report_lines());
    lines
}

/// Runs one timed call through `invoker`. The tracker receives the call's
/// own event followed by the event spanning the whole run.
pub(crate) async fn single_with(
    invoker: &dyn ToolInvoker,
    args: &SingleArgs,
    tracker: &Tracker,
) -> BatchSummary {
    let tool = args.target.tool.as_str();
    let mut metadata = Metadata::new();
    metadata.insert("tool".to_owned(), tool.to_owned());
    metadata.insert(args.target.id_field.clone(), args.id.clone());
    let run_timer = Timer::with_metadata(tracker, RUN_EVENT_NAME, metadata);

    let arguments = build_requests(
        slice::from_ref(&args.id),
        &args.target.id_field,
        &args.target.shared_arguments(),
    )
    .into_iter()
    .next()
    .map(|request| request.arguments)
    .unwrap_or_default();

    let call = instrument(
        tracker,
        format!("{}:{}", tool, args.id),
        FALLBACK_EVENT_NAME,
        move |arguments: ToolArguments| async move {
            invoker.call_tool(tool, &arguments).await
        },
    );
    let outcome = Outcome::classify(call.call(arguments).await);
    tracing::debug!(id = %args.id, outcome = outcome.kind().as_str(), "single call finished");

    let elapsed: Duration = run_timer.finish();
    BatchSummary::new(
        vec![RequestOutcome {
            id: args.id.clone(),
            outcome,
        }],
        Vec::new(),
        elapsed,
    )
}
