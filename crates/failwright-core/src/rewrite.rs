//! Crash-safe in-place rewriting of a single source file.
//!
//! The transform streams into `<path>.tmp`, which is created exclusively and
//! only renamed over the source once the transform reported markers and the
//! data is on disk. Every other exit removes the temporary file, so the
//! source is either untouched or fully rewritten.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use failwright_syntax::{MarkerDescriptor, Transform};

use crate::error::RewriteError;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Suffix appended to a source path to name its temporary file.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Returns the temporary file path used while rewriting `path`.
#[must_use]
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Applies a transform to one file with write-then-rename semantics.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicRewriter;

impl AtomicRewriter {
    /// Builds a rewriter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rewrites `path` through `transform`.
    ///
    /// Returns the markers the transform reported. An empty list means the
    /// file held nothing to transform and was left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be opened, the temporary file
    /// already exists or cannot be created, the transform fails, or the
    /// result cannot be committed. The source file is unchanged in every
    /// error case.
    pub fn rewrite(
        &self,
        transform: &dyn Transform,
        path: &Path,
    ) -> Result<Vec<MarkerDescriptor>, RewriteError> {
        let source = File::open(path).map_err(|source| RewriteError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut staged = StagedFile::create(temp_path(path))?;

        let mut reader = BufReader::new(source);
        let mut writer = BufWriter::new(staged.file()?);
        let markers = transform
            .apply(&mut reader, &mut writer)
            .map_err(|source| RewriteError::Transform {
                path: path.to_path_buf(),
                source,
            })?;
        if markers.is_empty() {
            return Ok(markers);
        }

        let finish = |source| RewriteError::Finish {
            path: staged.path().to_path_buf(),
            source,
        };
        let file = writer
            .into_inner()
            .map_err(|error| finish(error.into_error()))?;
        let permissions = reader.get_ref().metadata().map_err(finish)?.permissions();
        file.set_permissions(permissions).map_err(finish)?;
        file.sync_all().map_err(finish)?;
        drop(file);

        staged.commit(path)?;
        Ok(markers)
    }
}

/// Temporary file removed on drop unless committed.
#[derive(Debug)]
struct StagedFile {
    path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl StagedFile {
    fn create(path: PathBuf) -> Result<Self, RewriteError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        match options.open(&path) {
            Ok(file) => Ok(Self {
                path,
                file: Some(file),
                committed: false,
            }),
            Err(source) if source.kind() == io::ErrorKind::AlreadyExists => {
                Err(RewriteError::TempExists { path })
            }
            Err(source) => Err(RewriteError::CreateTemp { path, source }),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Hands out the open handle; callable once.
    fn file(&mut self) -> Result<File, RewriteError> {
        self.file.take().ok_or_else(|| RewriteError::CreateTemp {
            path: self.path.clone(),
            source: io::Error::other("temporary file handle already taken"),
        })
    }

    fn commit(mut self, target: &Path) -> Result<(), RewriteError> {
        fs::rename(&self.path, target).map_err(|source| RewriteError::Rename {
            path: target.to_path_buf(),
            source,
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        drop(self.file.take());
        if let Err(error) = fs::remove_file(&self.path) {
            tracing::debug!(
                target: "failwright::rewrite",
                path = %self.path.display(),
                error = %error,
                "failed to remove temporary file"
            );
        }
    }
}
