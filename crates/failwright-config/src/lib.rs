//! Layered configuration for the failwright command-line tool.
//!
//! Values resolve from built-in defaults, then a `failwright.toml` file (or
//! the file named by `--config-path` / `FAILWRIGHT_CONFIG_PATH`), then
//! `FAILWRIGHT_*` environment variables, and finally command-line flags.
//! Configuration only shapes log output; how sources are rewritten is fixed.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::LogFormat;

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "FAILWRIGHT")]
pub struct Config {
    /// Tracing filter expression, e.g. `warn` or `failwright::run=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records written to stderr.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for log records.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}
