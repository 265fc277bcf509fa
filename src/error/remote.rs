use thiserror::Error;

/// Failure surfaced by the remote tool server or the path to it.
///
/// The rendered message is the contract used for outcome classification, so
/// every variant keeps the server-supplied text intact.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Transport error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("{message}")]
    Tool { message: String },
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
    #[error("Session initialization failed: {message}")]
    Handshake { message: String },
}

impl RemoteError {
    pub fn tool<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self::Tool {
            message: message.into(),
        }
    }

    pub fn invalid_response<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }
}
