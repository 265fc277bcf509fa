use super::rpc::{rpc_result, sse_payloads, tool_result};
use crate::error::{AppError, AppResult, RemoteError};
use serde_json::json;

#[test]
fn sse_payloads_joins_multiline_data_per_event() -> AppResult<()> {
    let body = "event: message\ndata: {\"a\":\ndata: 1}\n\n: keep-alive\n\ndata: second\n";
    let payloads = sse_payloads(body);
    if payloads != ["{\"a\":\n1}", "second"] {
        return Err(AppError::validation(format!(
            "Unexpected payloads: {:?}",
            payloads
        )));
    }
    Ok(())
}

#[test]
fn rpc_error_keeps_server_message() -> AppResult<()> {
    let message = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "error": { "code": -32000, "message": "System Overloaded" }
    });
    match rpc_result(message) {
        Err(RemoteError::Rpc { code, message }) if code == -32000 => {
            if !message.contains("System Overloaded") {
                return Err(AppError::validation(format!("Lost message: {}", message)));
            }
            Ok(())
        }
        other => Err(AppError::validation(format!(
            "Expected RPC error, got {:?}",
            other
        ))),
    }
}

#[test]
fn rpc_result_extracts_result_payload() -> AppResult<()> {
    let message = json!({ "jsonrpc": "2.0", "id": 1, "result": { "tools": [] } });
    let result = rpc_result(message)?;
    if result != json!({ "tools": [] }) {
        return Err(AppError::validation(format!("Unexpected result: {}", result)));
    }
    if rpc_result(json!({ "jsonrpc": "2.0", "id": 1 })).is_ok() {
        return Err(AppError::validation("Expected missing result to fail"));
    }
    Ok(())
}

#[test]
fn tool_result_flagged_as_error_becomes_tool_failure() -> AppResult<()> {
    let flagged = json!({
        "isError": true,
        "content": [
            { "type": "text", "text": "System Overloaded." },
            { "type": "text", "text": "Retry later." }
        ]
    });
    match tool_result(flagged) {
        Err(err) => {
            if err.to_string() != "System Overloaded.\nRetry later." {
                return Err(AppError::validation(format!("Unexpected text: {}", err)));
            }
        }
        Ok(value) => {
            return Err(AppError::validation(format!(
                "Expected tool error, got {}",
                value
            )));
        }
    }

    let fine = json!({ "content": [{ "type": "text", "text": "ok" }] });
    if tool_result(fine.clone())? != fine {
        return Err(AppError::validation("Successful result was altered"));
    }
    Ok(())
}
