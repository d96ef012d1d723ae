//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use failwright_core::RunError;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("a command is required\n\n{usage}")]
    MissingCommand { usage: String },
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("{0}")]
    Run(#[from] RunError),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
