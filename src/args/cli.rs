use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::time::Duration;

use crate::remote::ToolArguments;

use super::defaults::{
    DEFAULT_ARGUMENT, DEFAULT_ID_FIELD, DEFAULT_SINGLE_ID, DEFAULT_TICKERS, DEFAULT_TIMEOUT,
    DEFAULT_TOOL, DEFAULT_URL,
};
use super::parsers::{parse_argument, parse_duration_arg, parse_identifier};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent tool-call load tester - fan out simultaneous requests to a rate-limited tool server, classify backpressure drops, and report timing events."
)]
pub struct SurgeArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (.toml or .json); surge.toml / surge.json are used when present
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fire one concurrent batch at the tool and classify every outcome
    Scan(ScanArgs),
    /// Run one timed tool call and print the benchmark report
    Single(SingleArgs),
}

impl Command {
    #[must_use]
    pub const fn target(&self) -> &TargetArgs {
        match self {
            Command::Scan(args) => &args.target,
            Command::Single(args) => &args.target,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Command::Scan(_) => "scan",
            Command::Single(_) => "single",
        }
    }
}

/// Where to send calls and how to build their arguments.
#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    /// MCP endpoint of the tool server (streamable HTTP)
    #[arg(long, short, env = "SURGE_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Name of the remote tool to call
    #[arg(long, short, env = "SURGE_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Tool argument that receives each request identifier
    #[arg(long = "id-field", default_value = DEFAULT_ID_FIELD)]
    pub id_field: String,

    /// Extra tool argument in 'key=value' form (repeatable); JSON values keep their type
    #[arg(long = "arg", short = 'a', default_value = DEFAULT_ARGUMENT, value_parser = parse_argument)]
    pub arguments: Vec<(String, Value)>,

    /// Timeout for each remote call (supports ms/s/m/h)
    #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,
}

impl TargetArgs {
    /// Arguments shared by every request of a run.
    #[must_use]
    pub fn shared_arguments(&self) -> ToolArguments {
        self.arguments.iter().cloned().collect()
    }
}

#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Request identifiers, comma-separated or repeated
    #[arg(
        long,
        short = 'i',
        value_delimiter = ',',
        default_values = DEFAULT_TICKERS,
        value_parser = parse_identifier
    )]
    pub ids: Vec<String>,

    /// Time every call and print the benchmark report after the summary
    #[arg(long)]
    pub instrument: bool,

    /// Skip checking that the server advertises the tool
    #[arg(long = "skip-preflight")]
    pub skip_preflight: bool,

    /// Write the batch summary and timing events as JSON
    #[arg(long = "export-json")]
    pub export_json: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SingleArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Identifier for the request
    #[arg(long, default_value = DEFAULT_SINGLE_ID, value_parser = parse_identifier)]
    pub id: String,

    /// Write the outcome and timing events as JSON
    #[arg(long = "export-json")]
    pub export_json: Option<String>,
}
