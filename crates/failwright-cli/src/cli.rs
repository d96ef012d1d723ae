//! CLI argument definitions for failwright.
//!
//! This module defines the command-line interface structure used by
//! both the runtime parser and the build script for manpage generation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for the failwright failpoint injector.
#[derive(Parser, Debug)]
#[command(
    name = "failwright",
    about = "Injects and removes failpoints in Rust sources",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// Prints version and build information and exits.
    #[arg(long)]
    pub(crate) version: bool,
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

/// Failpoint operations.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Turns failpoint markers into live code and writes companion bindings.
    Enable {
        /// Files or directories to process; defaults to the current directory.
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
    /// Turns live failpoint code back into markers and removes companions.
    Disable {
        /// Files or directories to process; defaults to the current directory.
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
}
