use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{Command, ScanArgs, SingleArgs, TargetArgs, parse_identifier};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to the parsed command.
///
/// `matches` are the top-level matches; the subcommand's own matches decide
/// which options were given explicitly.
///
/// # Errors
///
/// Returns an error when a config value fails validation.
pub fn apply_config(
    command: &mut Command,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    let Some((_, sub_matches)) = matches.subcommand() else {
        return Ok(());
    };
    match command {
        Command::Scan(scan) => apply_scan(scan, sub_matches, config),
        Command::Single(single) => apply_single(single, sub_matches, config),
    }
}

fn apply_scan(scan: &mut ScanArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    apply_target(&mut scan.target, matches, config)?;

    if !is_explicit(matches, "ids")
        && let Some(ids) = config.ids.as_ref()
    {
        scan.ids = ids
            .iter()
            .map(String::as_str)
            .map(parse_identifier)
            .collect::<Result<_, _>>()
            .map_err(|err| invalid_field("ids", err))?;
    }

    if !is_explicit(matches, "instrument")
        && let Some(value) = config.instrument
    {
        scan.instrument = value;
    }

    if !is_explicit(matches, "skip_preflight")
        && let Some(value) = config.skip_preflight
    {
        scan.skip_preflight = value;
    }

    if !is_explicit(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        scan.export_json = Some(path);
    }
    Ok(())
}

fn apply_single(
    single: &mut SingleArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    apply_target(&mut single.target, matches, config)?;

    if !is_explicit(matches, "id")
        && let Some(id) = config.id.as_deref()
    {
        single.id = parse_identifier(id).map_err(|err| invalid_field("id", err))?;
    }

    if !is_explicit(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        single.export_json = Some(path);
    }
    Ok(())
}

fn apply_target(
    target: &mut TargetArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        target.url = url;
    }

    if !is_explicit(matches, "tool")
        && let Some(tool) = config.tool.clone()
    {
        target.tool = tool;
    }

    if !is_explicit(matches, "id_field")
        && let Some(id_field) = config.id_field.clone()
    {
        target.id_field = id_field;
    }

    if !is_explicit(matches, "arguments")
        && let Some(arguments) = config.args.as_ref()
    {
        target.arguments = arguments
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        target.timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("timeout", err))?;
    }
    Ok(())
}

/// Command-line and environment values both take precedence over the file.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn invalid_field(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
