use serde_json::Value;

use crate::error::RemoteError;

/// Text the tool server puts in every admission-control rejection.
///
/// This is a string contract with the server, not a structured code: if the
/// server changes its wording, drops are misreported as failures. Kept as
/// substring matching for compatibility with servers that cannot be changed.
pub const OVERLOAD_MARKER: &str = "System Overloaded";

#[must_use]
pub fn is_overload(message: &str) -> bool {
    message.contains(OVERLOAD_MARKER)
}

/// Classified result of one dispatched request.
#[derive(Debug)]
pub enum Outcome {
    Success(Value),
    /// Rejected by the server's backpressure; carries the rejection text.
    Dropped(String),
    Failed(RemoteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Dropped,
    Failed,
}

impl OutcomeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::Dropped => "dropped",
            OutcomeKind::Failed => "failed",
        }
    }
}

impl Outcome {
    #[must_use]
    pub fn classify(result: Result<Value, RemoteError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => {
                let message = err.to_string();
                if is_overload(&message) {
                    Outcome::Dropped(message)
                } else {
                    Outcome::Failed(err)
                }
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success(_) => OutcomeKind::Success,
            Outcome::Dropped(_) => OutcomeKind::Dropped,
            Outcome::Failed(_) => OutcomeKind::Failed,
        }
    }

    /// Error or rejection text; `None` for successes.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Dropped(reason) => Some(reason.clone()),
            Outcome::Failed(err) => Some(err.to_string()),
        }
    }
}
