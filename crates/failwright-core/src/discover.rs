//! Resolves path arguments into candidate source files.

use std::env;
use std::fs;
use std::io;
use std::path::{self, Path, PathBuf};

use crate::error::DiscoveryError;
use crate::layout::SourceLayout;

/// Turns files, directories, or nothing at all into absolute source paths.
///
/// Directories are scanned one level deep. Output follows argument order and
/// then directory listing order; nothing is sorted or deduplicated.
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    layout: SourceLayout,
    working_dir: Option<PathBuf>,
}

impl FileDiscoverer {
    /// Builds a discoverer resolving relative paths against the process
    /// working directory.
    #[must_use]
    pub const fn new(layout: SourceLayout) -> Self {
        Self {
            layout,
            working_dir: None,
        }
    }

    /// Resolves relative paths (and the empty argument list) against `dir`
    /// instead of the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Resolves `paths` into absolute source file paths.
    ///
    /// # Errors
    ///
    /// Fails on the first path that does not exist or cannot be inspected;
    /// no partial result is returned.
    pub fn discover<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<PathBuf>, DiscoveryError> {
        if paths.is_empty() {
            let cwd = self.working_dir()?;
            return self.discover(&[cwd]);
        }

        let mut files = Vec::new();
        for argument in paths {
            let path = self.absolute(argument.as_ref())?;
            let metadata = fs::metadata(&path).map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => DiscoveryError::Missing { path: path.clone() },
                _ => DiscoveryError::Inspect {
                    path: path.clone(),
                    source,
                },
            })?;

            if metadata.is_dir() {
                files.extend(self.scan_directory(&path)?);
            } else if self.layout.is_source(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn scan_directory(&self, dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        let read_dir_error = |source: io::Error| DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if !self.layout.is_source(&path) || path.is_dir() {
                continue;
            }
            files.push(path);
        }
        Ok(files)
    }

    fn working_dir(&self) -> Result<PathBuf, DiscoveryError> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().map_err(|source| DiscoveryError::CurrentDir { source }),
        }
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf, DiscoveryError> {
        let joined = match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        };
        path::absolute(&joined).map_err(|source| DiscoveryError::Inspect {
            path: joined.clone(),
            source,
        })
    }
}
