//! Error types for failpoint transforms.
//!
//! Every grammar violation carries the one-based line number it was found on
//! so operators can jump straight to the offending marker.

use std::io;

use thiserror::Error;

/// Errors raised while transforming a source stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// A `// failpoint:` comment did not follow the marker grammar.
    #[error("line {line}: malformed failpoint marker: {message}")]
    MalformedMarker {
        /// One-based line of the marker.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// An active header did not match the code the activate transform emits.
    #[error("line {line}: malformed active failpoint header: {message}")]
    MalformedHeader {
        /// One-based line of the header.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The same failpoint name was declared twice in one file.
    #[error("line {line}: failpoint '{name}' already declared on line {first}")]
    DuplicateName {
        /// The repeated failpoint name.
        name: String,
        /// Line of the first declaration.
        first: usize,
        /// Line of the repeated declaration.
        line: usize,
    },

    /// An active block reached the end of input without its closing line.
    #[error("line {line}: active failpoint '{name}' is never closed")]
    UnterminatedBlock {
        /// Failpoint whose block is open.
        name: String,
        /// Line of the block header.
        line: usize,
    },

    /// A line inside an active block lost the header's indentation.
    #[error("line {line}: active failpoint body is not indented like its header")]
    MisindentedBody {
        /// One-based line of the body line.
        line: usize,
    },

    /// A commented body line would activate into the block's closing line.
    #[error("line {line}: failpoint body line collides with the block terminator")]
    AmbiguousBody {
        /// One-based line of the body line.
        line: usize,
    },

    /// Reading the source stream failed (including invalid UTF-8).
    #[error("line {line}: failed to read source: {source}")]
    Read {
        /// One-based line being read.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the transformed stream failed.
    #[error("line {line}: failed to write transformed source: {source}")]
    Write {
        /// One-based input line whose output was being written.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl TransformError {
    /// Creates a malformed marker error.
    #[must_use]
    pub fn malformed_marker(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedMarker {
            line,
            message: message.into(),
        }
    }

    /// Creates a malformed header error.
    #[must_use]
    pub fn malformed_header(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            message: message.into(),
        }
    }

    /// Wraps a failure to read `line`.
    #[must_use]
    pub const fn read(line: usize, source: io::Error) -> Self {
        Self::Read { line, source }
    }

    /// Wraps a failure to write the output of `line`.
    #[must_use]
    pub const fn write(line: usize, source: io::Error) -> Self {
        Self::Write { line, source }
    }
}
