//! Live failpoint code back to marker comments.

use std::io::{BufRead, Write};

use crate::block::ActiveBlock;
use crate::error::TransformError;
use crate::lines::{SourceLines, emit};
use crate::marker::{MarkerDescriptor, is_active_header};
use crate::transform::{Direction, NameRegistry, Transform};

/// Rewrites active failpoint blocks back into marker comments.
///
/// Reports only the blocks it converted; marker comments already present
/// pass through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Deactivate;

impl Transform for Deactivate {
    fn direction(&self) -> Direction {
        Direction::Deactivate
    }

    fn apply(
        &self,
        source: &mut dyn BufRead,
        sink: &mut dyn Write,
    ) -> Result<Vec<MarkerDescriptor>, TransformError> {
        let mut lines = SourceLines::new(source);
        let mut registry = NameRegistry::default();
        let mut markers = Vec::new();
        lines.forward_byte_order_mark(sink)?;

        while let Some(line) = lines.next_line()? {
            if is_active_header(line.text()) {
                let block = ActiveBlock::read(line, &mut lines)?;
                registry.register(block.marker())?;
                block.write_comment(sink)?;
                markers.push(block.marker().clone());
            } else {
                emit(sink, line.number(), &[line.content(), line.ending()])?;
            }
        }

        Ok(markers)
    }
}
