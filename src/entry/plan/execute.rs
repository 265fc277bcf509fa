use crate::app::{run_scan, run_single};
use crate::bench::Tracker;
use crate::error::AppResult;
use crate::system::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let tracker = Tracker::new();
    let (shutdown_tx, _) = shutdown_channel();
    let mut shutdown_rx = shutdown_tx.subscribe();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    tracing::debug!(plan = plan.name(), "executing");

    let result = match plan {
        RunPlan::Scan(args) => run_scan(args, &tracker, &mut shutdown_rx).await,
        RunPlan::Single(args) => run_single(args, &tracker, &mut shutdown_rx).await,
    };

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::warn!("Signal handler task failed: {}", err);
    }
    result
}
