use super::parsers::parse_argument;
use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult};
use serde_json::json;
use std::time::Duration;

#[test]
fn scan_defaults_target_the_local_option_server() -> AppResult<()> {
    let args = parse_test_args(["surge", "scan"])?;
    let Command::Scan(scan) = &args.command else {
        return Err(AppError::validation("Expected scan command"));
    };

    let shared = scan.target.shared_arguments();
    let checks = [
        (scan.target.url == DEFAULT_URL, "Unexpected url"),
        (scan.target.tool == DEFAULT_TOOL, "Unexpected tool"),
        (scan.target.id_field == DEFAULT_ID_FIELD, "Unexpected id field"),
        (
            shared.get("option_type") == Some(&json!("call")),
            "Expected option_type=call default",
        ),
        (shared.len() == 1, "Expected a single default argument"),
        (
            scan.target.timeout == Duration::from_secs(30),
            "Unexpected timeout",
        ),
        (scan.ids == DEFAULT_TICKERS, "Expected default tickers"),
        (!scan.instrument, "Expected instrument to be false"),
        (scan.export_json.is_none(), "Expected no export"),
        (!args.verbose, "Expected verbose to be false"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn scan_accepts_comma_separated_ids_and_typed_arguments() -> AppResult<()> {
    let args = parse_test_args([
        "surge",
        "scan",
        "--ids",
        "AAPL, MSFT,GOOG",
        "--arg",
        "option_type=put",
        "-a",
        "limit=5",
        "--timeout",
        "750ms",
        "--instrument",
    ])?;
    let Command::Scan(scan) = &args.command else {
        return Err(AppError::validation("Expected scan command"));
    };

    if scan.ids != ["AAPL", "MSFT", "GOOG"] {
        return Err(AppError::validation(format!("Unexpected ids: {:?}", scan.ids)));
    }
    let shared = scan.target.shared_arguments();
    if shared.get("option_type") != Some(&json!("put")) || shared.get("limit") != Some(&json!(5)) {
        return Err(AppError::validation(format!("Unexpected arguments: {:?}", shared)));
    }
    if scan.target.timeout != Duration::from_millis(750) || !scan.instrument {
        return Err(AppError::validation("Unexpected timeout or instrument flag"));
    }
    Ok(())
}

#[test]
fn single_takes_one_id() -> AppResult<()> {
    let args = parse_test_args(["surge", "single", "--id", "NVDA", "-v"])?;
    let Command::Single(single) = &args.command else {
        return Err(AppError::validation("Expected single command"));
    };
    if single.id != "NVDA" || !args.verbose || args.command.name() != "single" {
        return Err(AppError::validation("Unexpected single args"));
    }
    Ok(())
}

#[test]
fn rejects_malformed_arguments_and_empty_ids() -> AppResult<()> {
    let cases: [&[&str]; 4] = [
        &["surge", "scan", "--arg", "no-equals-sign"],
        &["surge", "scan", "--arg", "=value"],
        &["surge", "scan", "--ids", "AAPL,,MSFT"],
        &["surge", "single", "--timeout", "0s"],
    ];
    for case in cases {
        if parse_test_args(case.iter().copied()).is_ok() {
            return Err(AppError::validation(format!("Expected parse failure: {:?}", case)));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_supports_units() -> AppResult<()> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("250ms", Duration::from_millis(250)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_duration(raw)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "{} parsed as {:?}, expected {:?}",
                raw, parsed, expected
            )));
        }
    }
    for raw in ["", "ms", "10d"] {
        if parse_duration(raw).is_ok() {
            return Err(AppError::validation(format!("Expected '{}' to fail", raw)));
        }
    }
    Ok(())
}

#[test]
fn parse_argument_keeps_strings_for_non_json_values() -> AppResult<()> {
    let (key, value) = parse_argument("expiry = 2026-01-16")?;
    if key != "expiry" || value != json!("2026-01-16") {
        return Err(AppError::validation(format!("Unexpected pair: {} = {}", key, value)));
    }
    if parse_identifier("  ").is_ok() {
        return Err(AppError::validation("Blank identifier must be rejected"));
    }
    Ok(())
}
