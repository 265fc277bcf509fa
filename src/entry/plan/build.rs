use clap::ArgMatches;

use crate::args::{Command, SurgeArgs};
use crate::error::AppResult;

use super::types::RunPlan;

pub(crate) fn build_plan(args: SurgeArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    let mut command = args.command;
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut command, matches, &config)?;
    }

    let target = command.target();
    tracing::debug!(
        command = command.name(),
        url = %target.url,
        tool = %target.tool,
        timeout_ms = u64::try_from(target.timeout.as_millis()).unwrap_or(u64::MAX),
        "resolved run"
    );

    Ok(match command {
        Command::Scan(scan) => RunPlan::Scan(scan),
        Command::Single(single) => RunPlan::Single(single),
    })
}
