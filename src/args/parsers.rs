use std::time::Duration;

use serde_json::Value;

use crate::error::{AppError, AppResult, ValidationError};

/// Parses `key=value`. The value keeps its JSON type when it parses as JSON
/// (`limit=5`, `strict=true`) and is a string otherwise.
pub(crate) fn parse_argument(s: &str) -> Result<(String, Value), ValidationError> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| ValidationError::InvalidArgumentFormat {
            value: s.to_owned(),
        })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::ArgumentKeyEmpty {
            value: s.to_owned(),
        });
    }
    let raw = raw.trim();
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    Ok((key.to_owned(), value))
}

pub(crate) fn parse_identifier(s: &str) -> Result<String, ValidationError> {
    let id = s.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    Ok(id.to_owned())
}

pub(super) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration(s).map_err(AppError::validation)
}

/// Parses `<digits>[ms|s|m|h]`; a bare number means seconds.
pub(crate) fn parse_duration(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
