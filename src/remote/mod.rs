//! Boundary with the remote tool server.
mod mcp;
mod rpc;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use mcp::McpClient;
pub use traits::{ToolArguments, ToolInvoker};
