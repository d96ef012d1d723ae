//! Version and build information report.

use std::io::{self, Write};

/// Build metadata captured at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BuildInfo {
    pub(crate) version: &'static str,
    pub(crate) git_sha: Option<&'static str>,
    pub(crate) rustc_version: Option<&'static str>,
    pub(crate) os: &'static str,
    pub(crate) arch: &'static str,
}

impl BuildInfo {
    /// Metadata for the running binary.
    pub(crate) fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_sha: option_env!("FAILWRIGHT_GIT_SHA").filter(|sha| !sha.is_empty()),
            rustc_version: option_env!("FAILWRIGHT_RUSTC_VERSION")
                .filter(|version| !version.is_empty()),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }

    pub(crate) fn write_report(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "failwright Version: {}", self.version)?;
        writeln!(out, "Git SHA: {}", self.git_sha.unwrap_or("Not provided"))?;
        writeln!(
            out,
            "Rust Version: {}",
            self.rustc_version.unwrap_or("unknown")
        )?;
        writeln!(out, "OS/Arch: {}/{}", self.os, self.arch)
    }
}
