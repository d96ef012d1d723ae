//! Runtime tests for the CLI, driven through `run_with_loader`.

use std::cell::Cell;
use std::ffi::OsString;
use std::process::ExitCode;

use failwright_config::Config;

use crate::{AppError, ConfigLoader};


/// Loader returning a fixed configuration and counting its calls.
struct StaticConfigLoader {
    config: Config,
    calls: Cell<usize>,
}

impl StaticConfigLoader {
    fn new(config: Config) -> Self {
        Self {
            config,
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.config.clone())
    }
}

/// Captured result of one CLI invocation.
struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(loader: &StaticConfigLoader, args: &[&str]) -> Outcome {
    let argv = std::iter::once("failwright")
        .chain(args.iter().copied())
        .map(OsString::from);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = crate::run_with_loader(argv, &mut stdout, &mut stderr, loader);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
