use thiserror::Error;

/// Local failure inside the instrumentation layer. Never reaches callers of a
/// wrapped operation.
#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("Failed to derive event name: {reason}")]
    NameDerivation { reason: String },
}

impl InstrumentError {
    pub fn name_derivation<R>(reason: R) -> Self
    where
        R: Into<String>,
    {
        Self::NameDerivation {
            reason: reason.into(),
        }
    }
}
