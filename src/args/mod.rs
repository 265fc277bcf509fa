//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
mod parsers;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use cli::{Command, ScanArgs, SingleArgs, SurgeArgs, TargetArgs};
pub use defaults::{DEFAULT_ID_FIELD, DEFAULT_TICKERS, DEFAULT_TOOL, DEFAULT_URL};
pub(crate) use parsers::{parse_duration, parse_identifier};
