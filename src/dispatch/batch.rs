use std::future::Future;
use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::FuturesUnordered;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::bench::{Derived, Tracker, instrument};
use crate::error::{InstrumentError, RemoteError};
use crate::remote::{ToolArguments, ToolInvoker};
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

use super::outcome::Outcome;
use super::summary::{BatchSummary, RequestOutcome};

/// Event name used when a request's name cannot be derived.
pub const FALLBACK_EVENT_NAME: &str = "call_tool";

type CallResult = Result<Value, RemoteError>;

/// One request in a batch: an identifier for reporting plus the tool arguments.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub id: String,
    pub arguments: ToolArguments,
}

impl BatchRequest {
    pub fn new<I>(id: I, arguments: ToolArguments) -> Self
    where
        I: Into<String>,
    {
        Self {
            id: id.into(),
            arguments,
        }
    }
}

/// Builds one request per identifier: the shared arguments plus
/// `id_field = id`. The identifier wins over a shared argument of the same key.
#[must_use]
pub fn build_requests(ids: &[String], id_field: &str, shared: &ToolArguments) -> Vec<BatchRequest> {
    ids.iter()
        .map(|id| {
            let mut arguments = shared.clone();
            arguments.insert(id_field.to_owned(), Value::String(id.clone()));
            BatchRequest::new(id.clone(), arguments)
        })
        .collect()
}

/// Fires every request of a batch at once against one remote tool.
///
/// Calls are polled together on the caller's task, so they interleave only at
/// the remote I/O boundary. A failing call never cancels its siblings and no
/// request is retried.
pub struct Dispatcher {
    invoker: Arc<dyn ToolInvoker>,
    tool: String,
    tracker: Option<Tracker>,
}

impl Dispatcher {
    pub fn new<T>(invoker: Arc<dyn ToolInvoker>, tool: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            invoker,
            tool: tool.into(),
            tracker: None,
        }
    }

    /// Times every call into `tracker` as `<tool>:<id>`.
    #[must_use]
    pub fn with_tracker(mut self, tracker: &Tracker) -> Self {
        self.tracker = Some(tracker.clone());
        self
    }

    /// Runs the batch to completion.
    pub async fn run(&self, requests: Vec<BatchRequest>) -> BatchSummary {
        self.run_until(requests, std::future::pending::<()>()).await
    }

    /// Runs the batch until it completes or a shutdown is broadcast. On
    /// shutdown the summary keeps completed outcomes and lists pending ids.
    pub async fn run_until_shutdown(
        &self,
        requests: Vec<BatchRequest>,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> BatchSummary {
        self.run_until(requests, wait_for_shutdown(shutdown_rx)).await
    }

    async fn run_until<S>(&self, requests: Vec<BatchRequest>, stop: S) -> BatchSummary
    where
        S: Future<Output = ()>,
    {
        let ids: Vec<String> = requests.iter().map(|request| request.id.clone()).collect();
        let mut slots: Vec<Option<Outcome>> = ids.iter().map(|_| None).collect();

        let tool = self.tool.clone();
        let instrumented = self.tracker.as_ref().map(|tracker| {
            instrument(
                tracker,
                Derived(move |request: &BatchRequest| event_name(&tool, request)),
                FALLBACK_EVENT_NAME,
                |request: BatchRequest| self.call(request),
            )
        });

        info!(
            tool = %self.tool,
            requests = ids.len(),
            instrumented = instrumented.is_some(),
            "dispatching batch"
        );
        let started = Instant::now();

        let mut in_flight: FuturesUnordered<_> = requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                let call: LocalBoxFuture<'_, CallResult> = match instrumented.as_ref() {
                    Some(wrapper) => wrapper.call(request).boxed_local(),
                    None => self.call(request),
                };
                async move { (index, call.await) }
            })
            .collect();

        tokio::pin!(stop);
        let mut interrupted = false;
        loop {
            tokio::select! {
                next = in_flight.next() => {
                    let Some((index, result)) = next else {
                        break;
                    };
                    let outcome = Outcome::classify(result);
                    debug!(
                        id = ids.get(index).map_or("?", String::as_str),
                        outcome = outcome.kind().as_str(),
                        "request completed"
                    );
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(outcome);
                    }
                }
                () = &mut stop => {
                    interrupted = true;
                    break;
                }
            }
        }
        let elapsed = started.elapsed();
        drop(in_flight);

        let mut details = Vec::with_capacity(ids.len());
        let mut pending = Vec::new();
        for (id, slot) in ids.into_iter().zip(slots) {
            match slot {
                Some(outcome) => details.push(RequestOutcome { id, outcome }),
                None => pending.push(id),
            }
        }
        if interrupted {
            warn!(pending = pending.len(), "batch interrupted before completion");
        }

        let summary = BatchSummary::new(details, pending, elapsed);
        let counts = summary.counts();
        info!(
            success = counts.success,
            dropped = counts.dropped,
            failed = counts.failed,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "batch finished"
        );
        summary
    }

    fn call(&self, request: BatchRequest) -> LocalBoxFuture<'static, CallResult> {
        let invoker = Arc::clone(&self.invoker);
        let tool = self.tool.clone();
        async move { invoker.call_tool(&tool, &request.arguments).await }.boxed_local()
    }
}

fn event_name(tool: &str, request: &BatchRequest) -> Result<String, InstrumentError> {
    if request.id.is_empty() {
        return Err(InstrumentError::name_derivation("request id is empty"));
    }
    Ok(format!("{}:{}", tool, request.id))
}
