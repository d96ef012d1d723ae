//! Error types for discovery, rewriting, and companion management.

use std::io;
use std::path::PathBuf;

use failwright_syntax::TransformError;
use thiserror::Error;

use crate::report::RunPhase;

/// Errors raised while resolving path arguments into source files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The current working directory could not be determined.
    #[error("failed to determine the current directory: {source}")]
    CurrentDir {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A path argument does not exist.
    #[error("path '{}' does not exist", path.display())]
    Missing {
        /// Path as resolved.
        path: PathBuf,
    },
    /// A path argument could not be inspected or made absolute.
    #[error("failed to inspect '{}': {source}", path.display())]
    Inspect {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A directory argument could not be listed.
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while atomically rewriting one source file.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The source file could not be opened for reading.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        /// Source file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The temporary file already exists: another run is in progress or a
    /// previous run was interrupted.
    #[error("temporary file '{}' already exists", path.display())]
    TempExists {
        /// Temporary file path.
        path: PathBuf,
    },
    /// The temporary file could not be created.
    #[error("failed to create temporary file '{}': {source}", path.display())]
    CreateTemp {
        /// Temporary file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The transform rejected the source or its streams failed.
    #[error("failed to transform '{}': {source}", path.display())]
    Transform {
        /// Source file.
        path: PathBuf,
        /// Transform failure.
        #[source]
        source: TransformError,
    },
    /// Finishing the temporary file (flush, permissions, sync) failed.
    #[error("failed to finish temporary file '{}': {source}", path.display())]
    Finish {
        /// Temporary file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Renaming the temporary file over the source failed.
    #[error("failed to replace '{}': {source}", path.display())]
    Rename {
        /// Source file that was not replaced.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while writing a companion file.
#[derive(Debug, Error)]
pub enum CompanionError {
    /// The companion file could not be created.
    #[error("failed to create companion '{}': {source}", path.display())]
    Create {
        /// Companion file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Rendering bindings into the companion file failed.
    #[error("failed to write companion '{}': {source}", path.display())]
    Write {
        /// Companion file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Errors that abort an orchestration run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Discovery failed before any file was touched.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// A file rewrite failed; files rewritten earlier stay rewritten.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// A companion file could not be written.
    #[error(transparent)]
    Companion(#[from] CompanionError),
}

impl RunError {
    /// Phase the run was in when it aborted.
    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        match self {
            Self::Discovery(_) => RunPhase::Discovering,
            Self::Rewrite(_) => RunPhase::Rewriting,
            Self::Companion(_) => RunPhase::ManagingCompanions,
        }
    }
}
