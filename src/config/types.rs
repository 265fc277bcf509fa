use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::args::parse_duration;
use crate::error::ValidationError;

/// File form of the CLI options. Every field is optional; values only apply
/// to options not given on the command line or through the environment.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub tool: Option<String>,
    pub id_field: Option<String>,
    /// Shared tool arguments, merged into every request.
    pub args: Option<BTreeMap<String, Value>>,
    pub timeout: Option<DurationValue>,
    pub ids: Option<Vec<String>>,
    pub instrument: Option<bool>,
    pub skip_preflight: Option<bool>,
    pub export_json: Option<String>,
    /// Identifier used by `single`.
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
