//! Line-oriented reading with one line of lookahead.
//!
//! Lines keep their terminator so transforms can reproduce the input byte
//! for byte. A leading byte order mark is held apart from the first line so
//! a marker right after it is still recognised.

use std::io::{BufRead, Write};

use crate::error::TransformError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One input line split into content and terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceLine {
    number: usize,
    content: String,
    ending: &'static str,
}

impl SourceLine {
    fn from_raw(number: usize, mut raw: String) -> Self {
        let ending = if raw.ends_with("\r\n") {
            "\r\n"
        } else if raw.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        raw.truncate(raw.len().saturating_sub(ending.len()));
        Self {
            number,
            content: raw,
            ending,
        }
    }

    pub(crate) const fn number(&self) -> usize {
        self.number
    }

    pub(crate) fn content(&self) -> &str {
        &self.content
    }

    pub(crate) const fn ending(&self) -> &'static str {
        self.ending
    }

    /// Leading run of spaces and tabs.
    pub(crate) fn indent(&self) -> &str {
        let trimmed = self.content.trim_start_matches([' ', '\t']);
        self.content
            .get(..self.content.len().saturating_sub(trimmed.len()))
            .unwrap_or_default()
    }

    /// Content after the leading indentation.
    pub(crate) fn text(&self) -> &str {
        self.content.trim_start_matches([' ', '\t'])
    }

    /// Content after `indent`, when the line starts with it.
    pub(crate) fn after_indent(&self, indent: &str) -> Option<&str> {
        self.content.strip_prefix(indent)
    }
}

/// Reader yielding numbered [`SourceLine`]s.
pub(crate) struct SourceLines<'a> {
    reader: &'a mut dyn BufRead,
    peeked: Option<SourceLine>,
    read: usize,
    byte_order_mark: bool,
}

impl<'a> SourceLines<'a> {
    pub(crate) fn new(reader: &'a mut dyn BufRead) -> Self {
        Self {
            reader,
            peeked: None,
            read: 0,
            byte_order_mark: false,
        }
    }

    /// Writes the input's byte order mark, if any, to `sink`.
    ///
    /// Must be called before the first line is consumed.
    pub(crate) fn forward_byte_order_mark(
        &mut self,
        sink: &mut dyn Write,
    ) -> Result<(), TransformError> {
        self.peek()?;
        if self.byte_order_mark {
            let mut buf = [0; 4];
            emit(sink, 1, &[BYTE_ORDER_MARK.encode_utf8(&mut buf)])?;
        }
        Ok(())
    }

    /// Consumes the next line.
    pub(crate) fn next_line(&mut self) -> Result<Option<SourceLine>, TransformError> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        self.read_line()
    }

    /// Returns the next line without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Option<&SourceLine>, TransformError> {
        if self.peeked.is_none() {
            self.peeked = self.read_line()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn read_line(&mut self) -> Result<Option<SourceLine>, TransformError> {
        let number = self.read.saturating_add(1);
        let mut raw = String::new();
        let count = self
            .reader
            .read_line(&mut raw)
            .map_err(|source| TransformError::read(number, source))?;
        if count == 0 {
            return Ok(None);
        }
        self.read = number;
        if number == 1 && raw.starts_with(BYTE_ORDER_MARK) {
            self.byte_order_mark = true;
            raw.replace_range(..BYTE_ORDER_MARK.len_utf8(), "");
        }
        Ok(Some(SourceLine::from_raw(number, raw)))
    }
}

/// Writes the pieces of the output produced for input `line`.
pub(crate) fn emit(
    sink: &mut dyn Write,
    line: usize,
    parts: &[&str],
) -> Result<(), TransformError> {
    for part in parts {
        sink.write_all(part.as_bytes())
            .map_err(|source| TransformError::write(line, source))?;
    }
    Ok(())
}
