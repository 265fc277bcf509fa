use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;

use super::traits::{ToolArguments, ToolInvoker};

pub(crate) const OVERLOAD_REPLY: &str = "System Overloaded: request queue is full";

/// In-process tool server that rejects calls beyond `capacity` in flight.
pub(crate) struct ScriptedServer {
    id_field: &'static str,
    capacity: usize,
    work: Duration,
    slow: BTreeMap<String, Duration>,
    broken: BTreeSet<String>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedServer {
    pub(crate) fn new(id_field: &'static str, capacity: usize, work: Duration) -> Self {
        Self {
            id_field,
            capacity,
            work,
            slow: BTreeMap::new(),
            broken: BTreeSet::new(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.slow.insert(id.to_owned(), delay);
        self
    }

    pub(crate) fn with_failure(mut self, id: &str) -> Self {
        self.broken.insert(id.to_owned());
        self
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolInvoker for ScriptedServer {
    async fn call_tool(&self, _name: &str, arguments: &ToolArguments) -> Result<Value, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = arguments
            .get(self.id_field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.peak.fetch_max(current, Ordering::SeqCst);
        if current > self.capacity {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return Err(RemoteError::tool(OVERLOAD_REPLY));
        }

        let delay = self.slow.get(&id).copied().unwrap_or(self.work);
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.broken.contains(&id) {
            return Err(RemoteError::tool(format!("quote feed unavailable for {}", id)));
        }
        let mut reply = ToolArguments::new();
        reply.insert(self.id_field.to_owned(), Value::String(id));
        Ok(Value::Object(reply))
    }
}
