use std::sync::Arc;

use crate::args::ScanArgs;
use crate::bench::Tracker;
use crate::dispatch::{BatchSummary, Dispatcher, build_requests, print_summary};
use crate::error::{AppError, AppResult, ValidationError};
use crate::remote::{McpClient, ToolInvoker};
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

use super::export::export_json;

pub(crate) async fn run_scan(
    args: ScanArgs,
    tracker: &Tracker,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<()> {
    println!("Connecting to MCP server at {}...", args.target.url);
    let client = Arc::new(McpClient::new(args.target.url.as_str(), args.target.timeout)?);

    if args.skip_preflight {
        tracing::debug!("skipping tool preflight");
    } else {
        println!("Connected. Fetching tools...");
        tokio::select! {
            checked = ensure_tool(&client, &args.target.tool) => checked?,
            () = wait_for_shutdown(&mut *shutdown_rx) => {
                tracing::warn!("interrupted before dispatch");
                println!("Scanner stopped.");
                return Ok(());
            }
        }
    }

    println!(
        "Starting scan of {} request(s) against '{}'...",
        args.ids.len(),
        args.target.tool
    );
    let summary = scan_with(client, &args, tracker, shutdown_rx).await;

    println!();
    print_summary(&summary);
    if args.instrument {
        println!();
        tracker.print_report();
    }
    if let Some(path) = args.export_json.as_deref() {
        export_json(path, &summary, &tracker.events()).await?;
    }
    if summary.is_interrupted() {
        println!("Scanner stopped.");
    }
    Ok(())
}

/// Dispatches the scan's batch through `invoker`.
pub(crate) async fn scan_with(
    invoker: Arc<dyn ToolInvoker>,
    args: &ScanArgs,
    tracker: &Tracker,
    shutdown_rx: &mut ShutdownReceiver,
) -> BatchSummary {
    let requests = build_requests(
        &args.ids,
        &args.target.id_field,
        &args.target.shared_arguments(),
    );
    let mut dispatcher = Dispatcher::new(invoker, args.target.tool.as_str());
    if args.instrument {
        dispatcher = dispatcher.with_tracker(tracker);
    }
    dispatcher.run_until_shutdown(requests, shutdown_rx).await
}

async fn ensure_tool(client: &McpClient, tool: &str) -> AppResult<()> {
    let tools = client.list_tools().await?;
    tracing::debug!(count = tools.len(), "server tools listed");
    if tools.iter().any(|name| name == tool) {
        return Ok(());
    }

    tracing::error!(tool, endpoint = client.endpoint(), "tool not advertised");
    let available = if tools.is_empty() {
        "none".to_owned()
    } else {
        tools.join(", ")
    };
    Err(AppError::validation(ValidationError::ToolNotFound {
        tool: tool.to_owned(),
        available,
    }))
}
