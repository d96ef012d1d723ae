//! Failpoint blocks in their two textual forms.
//!
//! Each block line keeps its own terminator. Activation moves the terminator
//! of the last block line onto the closing line, giving the last line a `\n`
//! when it had none; deactivation undoes exactly that.

use std::io::Write;

use crate::error::TransformError;
use crate::lines::{SourceLine, SourceLines, emit};
use crate::marker::{
    BLOCK_END, MarkerDescriptor, is_marker_comment, parse_active_header, parse_marker_comment,
};

const COMMENT: &str = "//";

/// A marker comment followed by its commented body.
pub(crate) struct CommentBlock {
    indent: String,
    marker: MarkerDescriptor,
    marker_line: SourceLine,
    body: Vec<SourceLine>,
}

impl CommentBlock {
    /// Reads the body following `marker_line`, which must be a marker comment.
    pub(crate) fn read(
        marker_line: SourceLine,
        lines: &mut SourceLines<'_>,
    ) -> Result<Self, TransformError> {
        let indent = marker_line.indent().to_owned();
        let marker = parse_marker_comment(marker_line.text(), marker_line.number())?;
        let mut body = Vec::new();

        while let Some(next) = lines.peek()? {
            let is_body = next
                .after_indent(&indent)
                .is_some_and(|rest| rest.starts_with(COMMENT) && !is_marker_comment(rest));
            if !is_body {
                break;
            }
            if let Some(line) = lines.next_line()? {
                body.push(line);
            }
        }

        Ok(Self {
            indent,
            marker,
            marker_line,
            body,
        })
    }

    pub(crate) const fn marker(&self) -> &MarkerDescriptor {
        &self.marker
    }

    /// Writes the active form of this block.
    pub(crate) fn write_active(&self, sink: &mut dyn Write) -> Result<(), TransformError> {
        let mut rendered: Vec<RenderedLine> = Vec::with_capacity(self.body.len() + 1);
        rendered.push(RenderedLine {
            number: self.marker_line.number(),
            content: format!(
                "{}{}{}",
                self.indent,
                self.marker.header_code(),
                self.marker_line.text()
            ),
            ending: self.marker_line.ending(),
        });

        let closing = format!("{}{BLOCK_END}", self.indent);
        for line in &self.body {
            let rest = line
                .after_indent(&self.indent)
                .and_then(|text| text.strip_prefix(COMMENT))
                .unwrap_or_default();
            let active = format!("{}{rest}", self.indent);
            if active == closing {
                return Err(TransformError::AmbiguousBody {
                    line: line.number(),
                });
            }
            rendered.push(RenderedLine {
                number: line.number(),
                content: active,
                ending: line.ending(),
            });
        }

        let (closing_number, closing_ending) = hand_off_ending(&mut rendered);
        for line in &rendered {
            line.write(sink)?;
        }
        emit(sink, closing_number, &[closing.as_str(), closing_ending])
    }
}

/// A live failpoint block: header, body, and closing line.
pub(crate) struct ActiveBlock {
    indent: String,
    marker: MarkerDescriptor,
    comment: String,
    header: SourceLine,
    body: Vec<SourceLine>,
    closing: SourceLine,
}

impl ActiveBlock {
    /// Reads the body and closing line following `header`.
    pub(crate) fn read(
        header: SourceLine,
        lines: &mut SourceLines<'_>,
    ) -> Result<Self, TransformError> {
        let indent = header.indent().to_owned();
        let (marker, comment_text) = parse_active_header(header.text(), header.number())?;
        let comment = comment_text.to_owned();
        let closing_content = format!("{indent}{BLOCK_END}");
        let mut body = Vec::new();

        loop {
            let Some(line) = lines.next_line()? else {
                return Err(TransformError::UnterminatedBlock {
                    name: marker.name().to_owned(),
                    line: header.number(),
                });
            };
            if line.content() == closing_content {
                return Ok(Self {
                    indent,
                    marker,
                    comment,
                    header,
                    body,
                    closing: line,
                });
            }
            if !line.content().is_empty() && line.after_indent(&indent).is_none() {
                return Err(TransformError::MisindentedBody {
                    line: line.number(),
                });
            }
            body.push(line);
        }
    }

    pub(crate) const fn marker(&self) -> &MarkerDescriptor {
        &self.marker
    }

    /// Writes the block exactly as it was read.
    pub(crate) fn write_verbatim(&self, sink: &mut dyn Write) -> Result<(), TransformError> {
        for line in std::iter::once(&self.header)
            .chain(&self.body)
            .chain(std::iter::once(&self.closing))
        {
            emit(sink, line.number(), &[line.content(), line.ending()])?;
        }
        Ok(())
    }

    /// Writes the marker-comment form of this block.
    pub(crate) fn write_comment(&self, sink: &mut dyn Write) -> Result<(), TransformError> {
        let mut rendered: Vec<RenderedLine> = Vec::with_capacity(self.body.len() + 1);
        rendered.push(RenderedLine {
            number: self.header.number(),
            content: format!("{}{}", self.indent, self.comment),
            ending: self.header.ending(),
        });
        for line in &self.body {
            // Editors commonly strip the whitespace-only lines activation
            // leaves behind, so an empty line stands for a bare indent.
            let rest = line.after_indent(&self.indent).unwrap_or_default();
            rendered.push(RenderedLine {
                number: line.number(),
                content: format!("{}{COMMENT}{rest}", self.indent),
                ending: line.ending(),
            });
        }

        if self.closing.ending().is_empty()
            && let Some(last) = rendered.last_mut()
        {
            last.ending = "";
        }
        for line in &rendered {
            line.write(sink)?;
        }
        Ok(())
    }
}

/// One output line of a rewritten block and the input line it came from.
struct RenderedLine {
    number: usize,
    content: String,
    ending: &'static str,
}

impl RenderedLine {
    fn write(&self, sink: &mut dyn Write) -> Result<(), TransformError> {
        emit(sink, self.number, &[self.content.as_str(), self.ending])
    }
}

/// Moves the last line's terminator to the closing line, returning the
/// closing line's number and terminator.
const fn hand_off_ending(rendered: &mut [RenderedLine]) -> (usize, &'static str) {
    match rendered.last_mut() {
        Some(last) => {
            let ending = last.ending;
            if ending.is_empty() {
                last.ending = "\n";
            }
            (last.number, ending)
        }
        None => (0, "\n"),
    }
}
