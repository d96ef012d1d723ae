//! Marker comments to live failpoint code.

use std::io::{BufRead, Write};

use crate::block::{ActiveBlock, CommentBlock};
use crate::error::TransformError;
use crate::lines::{SourceLines, emit};
use crate::marker::{MarkerDescriptor, is_active_header, is_marker_comment};
use crate::transform::{Direction, NameRegistry, Transform};

/// Rewrites `// failpoint: var` comments into active blocks.
///
/// Blocks that are already active pass through unchanged but are still
/// reported, so the companion bindings always cover every live failpoint in
/// the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Activate;

impl Transform for Activate {
    fn direction(&self) -> Direction {
        Direction::Activate
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
            if is_marker_comment(line.text()) {
                let block = CommentBlock::read(line, &mut lines)?;
                registry.register(block.marker())?;
                block.write_active(sink)?;
                markers.push(block.marker().clone());
            } else if is_active_header(line.text()) {
                let block = ActiveBlock::read(line, &mut lines)?;
                registry.register(block.marker())?;
                block.write_verbatim(sink)?;
                markers.push(block.marker().clone());
            } else {
                emit(sink, line.number(), &[line.content(), line.ending()])?;
            }
        }

        Ok(markers)
    }
}
