use clap::{CommandFactory, FromArgMatches, Parser};

use crate::error::{AppError, AppResult};

use super::SurgeArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<SurgeArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    SurgeArgs::try_parse_from(args).map_err(AppError::from)
}

pub(crate) fn parse_test_matches<I, T>(args: I) -> AppResult<(SurgeArgs, clap::ArgMatches)>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = SurgeArgs::command().try_get_matches_from(args)?;
    let args = SurgeArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
