//! The bidirectional transform capability.
//!
//! Both directions share one contract: read a source stream, write the
//! rewritten stream, and report the markers involved. An empty report means
//! the input held nothing to transform and the output can be discarded.

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};

use crate::activate::Activate;
use crate::deactivate::Deactivate;
use crate::error::TransformError;
use crate::marker::MarkerDescriptor;

/// A streaming rewrite of failpoint markers.
pub trait Transform {
    /// Direction this transform rewrites in.
    fn direction(&self) -> Direction;

    /// Rewrites `source` into `sink`, returning the markers involved.
    ///
    /// # Errors
    ///
    /// Returns an error when the input violates the marker grammar or when
    /// either stream fails. Output already written to `sink` must then be
    /// discarded by the caller.
    fn apply(
        &self,
        source: &mut dyn BufRead,
        sink: &mut dyn Write,
    ) -> Result<Vec<MarkerDescriptor>, TransformError>;
}

/// The two inverse rewrite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Turns marker comments into live failpoint code.
    Activate,
    /// Turns live failpoint code back into marker comments.
    Deactivate,
}

impl Direction {
    /// Returns the transform implementing this direction.
    #[must_use]
    pub fn transform(self) -> &'static dyn Transform {
        match self {
            Self::Activate => &Activate,
            Self::Deactivate => &Deactivate,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
        })
    }
}

/// Tracks declared names so each failpoint appears once per file.
#[derive(Debug, Default)]
pub(crate) struct NameRegistry {
    seen: HashMap<String, usize>,
}

impl NameRegistry {
    pub(crate) fn register(&mut self, marker: &MarkerDescriptor) -> Result<(), TransformError> {
        if let Some(first) = self.seen.get(marker.name()) {
            return Err(TransformError::DuplicateName {
                name: marker.name().to_owned(),
                first: *first,
                line: marker.line(),
            });
        }
        self.seen.insert(marker.name().to_owned(), marker.line());
        Ok(())
    }
}
