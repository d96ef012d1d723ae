//! CLI entrypoint for the failwright failpoint injector.
//!
//! The binary delegates to [`failwright_cli::run`], which loads
//! configuration, processes command-line arguments, and rewrites the
//! requested sources.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    failwright_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
