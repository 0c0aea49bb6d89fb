//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "linewatch",
    version,
    about = "Pipeline construction compliance engine",
    long_about = "Seed threshold rules from project configuration and review saved\n\
                  activity blocks against them. Rules live per organization in a\n\
                  JSON rule store; reviews combine stored thresholds with the\n\
                  built-in environmental condition checks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Refresh an organization's threshold rules from its configured sources.
    Refresh(RefreshArgs),

    /// Review a saved activity block against conditions and stored rules.
    Review(ReviewArgs),

    /// List the stored threshold rules for an organization.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct RefreshArgs {
    /// Organization whose rules should be refreshed.
    #[arg(long = "org", value_name = "ORG")]
    pub org: String,

    /// Directory holding weld_specs.csv and contracts.csv.
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: PathBuf,

    /// Directory holding the per-organization rule files.
    #[arg(long = "rules-dir", value_name = "DIR", default_value = "rules")]
    pub rules_dir: PathBuf,
}

#[derive(Parser)]
pub struct ReviewArgs {
    /// JSON file with the activity block and its weather/quality bundle.
    #[arg(value_name = "ACTIVITY_FILE")]
    pub activity_file: PathBuf,

    /// Organization whose rules apply.
    #[arg(long = "org", value_name = "ORG")]
    pub org: String,

    /// Directory holding the per-organization rule files.
    #[arg(long = "rules-dir", value_name = "DIR", default_value = "rules")]
    pub rules_dir: PathBuf,

    /// Project configuration file (linewatch.toml).
    #[arg(long = "project", value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Compose the escalation notification and drop it in the outbox.
    #[arg(long = "notify")]
    pub notify: bool,

    /// Outbox directory for composed notifications.
    #[arg(long = "outbox", value_name = "DIR", default_value = "outbox")]
    pub outbox: PathBuf,

    /// Write the full review payload to a JSON file.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Organization whose rules should be listed.
    #[arg(long = "org", value_name = "ORG")]
    pub org: String,

    /// Directory holding the per-organization rule files.
    #[arg(long = "rules-dir", value_name = "DIR", default_value = "rules")]
    pub rules_dir: PathBuf,

    /// Include deactivated rules.
    #[arg(long = "all")]
    pub all: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
