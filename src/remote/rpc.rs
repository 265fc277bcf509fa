use serde_json::{Value, json};

use crate::error::RemoteError;

pub(super) const JSONRPC_VERSION: &str = "2.0";
const EVENT_STREAM: &str = "text/event-stream";

pub(super) fn request_body(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "method": method,
        "params": params,
    })
}

pub(super) fn notification_body(method: &str) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "method": method,
    })
}

/// Reads the response to request `id`, from either a JSON body or an SSE stream.
pub(super) async fn read_response(response: reqwest::Response, id: u64) -> Result<Value, RemoteError> {
    let status = response.status();
    let is_stream = response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(EVENT_STREAM));
    let body = response.text().await?;

    if !status.is_success() {
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let message = if is_stream {
        find_stream_response(&body, id)?
    } else {
        serde_json::from_str(&body)
            .map_err(|err| RemoteError::invalid_response(format!("JSON decode failed: {}", err)))?
    };
    rpc_result(message)
}

/// Splits an SSE body into the payload of each event.
pub(super) fn sse_payloads(body: &str) -> Vec<String> {
    let mut payloads = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.is_empty() {
            if !current.is_empty() {
                payloads.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        if let Some(data) = line.strip_prefix("data:") {
            current.push(data.strip_prefix(' ').unwrap_or(data));
        }
    }
    if !current.is_empty() {
        payloads.push(current.join("\n"));
    }
    payloads
}

fn find_stream_response(body: &str, id: u64) -> Result<Value, RemoteError> {
    sse_payloads(body)
        .iter()
        .filter_map(|payload| serde_json::from_str::<Value>(payload).ok())
        .find(|message| message.get("id").and_then(Value::as_u64) == Some(id))
        .ok_or_else(|| {
            RemoteError::invalid_response(format!("event stream carried no response for id {}", id))
        })
}

pub(super) fn rpc_result(mut message: Value) -> Result<Value, RemoteError> {
    if let Some(error) = message.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        let text = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_owned();
        return Err(RemoteError::Rpc {
            code,
            message: text,
        });
    }
    message
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| RemoteError::invalid_response("response had neither result nor error"))
}

/// Turns a `tools/call` result flagged `isError` into a tool failure.
pub(super) fn tool_result(result: Value) -> Result<Value, RemoteError> {
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !is_error {
        return Ok(result);
    }
    let texts: Vec<&str> = result
        .get("content")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    if texts.is_empty() {
        return Err(RemoteError::tool("tool reported an error without details"));
    }
    Err(RemoteError::tool(texts.join("\n")))
}
