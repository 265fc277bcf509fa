use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;

/// Key/value argument bag passed to a remote tool.
pub type ToolArguments = serde_json::Map<String, Value>;

/// Invokes a named tool on the remote server.
///
/// Implementations must tolerate many concurrent calls on one instance.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Calls `name` with `arguments` and returns the tool's result value.
    ///
    /// # Errors
    ///
    /// Returns the remote failure, with the server's message preserved so
    /// callers can recognise overload rejections.
    async fn call_tool(&self, name: &str, arguments: &ToolArguments) -> Result<Value, RemoteError>;
}
