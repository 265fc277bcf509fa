use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::sync::OnceCell;

use crate::error::RemoteError;

use super::rpc::{notification_body, read_response, request_body, tool_result};
use super::traits::{ToolArguments, ToolInvoker};

/// Protocol revision announced during `initialize`.
const PROTOCOL_VERSION: &str = "2025-03-26";
/// Session header issued by streamable-HTTP servers.
const SESSION_HEADER: &str = "mcp-session-id";
/// Streamable-HTTP servers may answer with plain JSON or an event stream.
const ACCEPT_VALUE: &str = "application/json, text/event-stream";
/// JSON-RPC id reserved for the handshake.
const INITIALIZE_ID: u64 = 0;

/// Tool client for an MCP server reachable over streamable HTTP.
///
/// The session handshake runs once, on first use, and is shared by every
/// concurrent caller.
#[derive(Debug)]
pub struct McpClient {
    http: Client,
    endpoint: String,
    session: OnceCell<Option<String>>,
    next_id: AtomicU64,
}

impl McpClient {
    /// Builds a client for `endpoint` applying `timeout` to every HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new<E>(endpoint: E, timeout: Duration) -> Result<Self, RemoteError>
    where
        E: Into<String>,
    {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            session: OnceCell::new(),
            next_id: AtomicU64::new(INITIALIZE_ID.saturating_add(1)),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Names of the tools the server advertises.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be opened or the listing fails.
    pub async fn list_tools(&self) -> Result<Vec<String>, RemoteError> {
        let result = self.request("tools/list", json!({})).await?;
        let names = result
            .get("tools")
            .and_then(Value::as_array)
            .map(|tools| {
                tools
                    .iter()
                    .filter_map(|tool| tool.get("name").and_then(Value::as_str))
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        Ok(names)
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, RemoteError> {
        let session = self.session().await?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let response = self
            .post(session, &request_body(id, method, params))
            .await?;
        read_response(response, id).await
    }

    async fn session(&self) -> Result<Option<&str>, RemoteError> {
        let session = self.session.get_or_try_init(|| self.handshake()).await?;
        Ok(session.as_deref())
    }

    async fn handshake(&self) -> Result<Option<String>, RemoteError> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        });
        let response = self
            .post(None, &request_body(INITIALIZE_ID, "initialize", params))
            .await
            .map_err(|err| RemoteError::Handshake {
                message: err.to_string(),
            })?;
        let session = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        read_response(response, INITIALIZE_ID)
            .await
            .map_err(|err| RemoteError::Handshake {
                message: err.to_string(),
            })?;

        let ack = self
            .post(
                session.as_deref(),
                &notification_body("notifications/initialized"),
            )
            .await?;
        if !ack.status().is_success() {
            return Err(RemoteError::Handshake {
                message: format!("initialized notification rejected with HTTP {}", ack.status()),
            });
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            session = session.as_deref().unwrap_or("none"),
            "MCP session opened"
        );
        Ok(session)
    }

    async fn post(
        &self,
        session: Option<&str>,
        body: &Value,
    ) -> Result<reqwest::Response, RemoteError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(http::header::ACCEPT, ACCEPT_VALUE)
            .json(body);
        if let Some(session) = session {
            request = request.header(SESSION_HEADER, session);
        }
        Ok(request.send().await?)
    }
}

#[async_trait]
impl ToolInvoker for McpClient {
    async fn call_tool(&self, name: &str, arguments: &ToolArguments) -> Result<Value, RemoteError> {
        let params = json!({
            "name": name,
            "arguments": arguments,
        });
        let result = self.request("tools/call", params).await?;
        tool_result(result)
    }
}
