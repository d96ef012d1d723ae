//! Command-line interface runtime for failwright.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! installation, and the single point where a failed run becomes a non-zero
//! exit code. It is exercised both from the binary entrypoint and from tests
//! where configuration loading and IO streams can be substituted.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use failwright_core::{Orchestrator, SourceLayout};
use failwright_syntax::Direction;

mod cli;
mod config;
mod errors;
mod telemetry;
mod version;

use cli::{Cli, CliCommand};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
use version::BuildInfo;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `failwright_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &["--config-path", "--log-filter", "--log-format"];

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(stdout: &'a mut W, stderr: &'a mut E, loader: &'a L) -> Self {
        Self {
            stdout,
            stderr,
            loader,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        match self.execute(args) {
            Ok(exit_code) => exit_code,
            Err(error) => {
                let _ = writeln!(self.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn execute<I>(&mut self, args: I) -> Result<ExitCode, AppError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match Cli::try_parse_from(cli_arguments) {
            Ok(cli) => cli,
            Err(error) if is_informational(&error) => {
                write!(self.stdout, "{error}").map_err(AppError::WriteOutput)?;
                return Ok(ExitCode::SUCCESS);
            }
            Err(error) => return Err(AppError::CliUsage(error)),
        };

        if cli.version {
            BuildInfo::current()
                .write_report(&mut *self.stdout)
                .map_err(AppError::WriteOutput)?;
            return Ok(ExitCode::SUCCESS);
        }

        let (direction, paths) = match cli.command {
            Some(CliCommand::Enable { paths }) => (Direction::Activate, paths),
            Some(CliCommand::Disable { paths }) => (Direction::Deactivate, paths),
            None => {
                return Err(AppError::MissingCommand {
                    usage: Cli::command().render_help().to_string(),
                });
            }
        };

        let config = self.loader.load(&split.config_arguments)?;
        telemetry::initialise(&config)?;
        run_failpoints(direction, &paths)?;
        Ok(ExitCode::SUCCESS)
    }
}

fn run_failpoints(direction: Direction, paths: &[PathBuf]) -> Result<(), AppError> {
    let summary = Orchestrator::new(SourceLayout::RUST).run(direction.transform(), paths)?;
    tracing::debug!(
        target: "failwright::cli",
        direction = %summary.direction(),
        files = summary.files_rewritten(),
        markers = summary.marker_count(),
        "command finished"
    );
    Ok(())
}

fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    cli_arguments.extend(args.iter().skip(split.command_start).cloned());
    cli_arguments
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Errors are written to `stderr` and mapped to a failing exit code; on
/// success `stdout` receives output only for `--help` and `--version`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(stdout, stderr, loader).run(args)
}

#[cfg(test)]
mod tests;
