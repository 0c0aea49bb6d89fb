//! linewatch CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use linewatch_cli::cli::{Cli, Command, LogFormatArg};
use linewatch_cli::commands::{run_refresh, run_review, run_rules};
use linewatch_cli::logging::{LogConfig, LogFormat, init_logging};
use linewatch_cli::summary::{print_refresh, print_review, print_rules_table};
use linewatch_model::ReviewStatus;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match cli.command {
        Command::Refresh(args) => match run_refresh(&args) {
            Ok(run) => {
                print_refresh(&run);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Review(args) => match run_review(&args) {
            Ok(run) => {
                print_review(&run);
                if run.result.overall_status() == ReviewStatus::Alert {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Rules(args) => match run_rules(&args) {
            Ok(rules) => {
                print_rules_table(&rules);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}
