//! # Documentation Comment Syntax
//!
//! This crate turns the raw text of documentation comments into something
//! rules can reason about, without ever losing track of where each character
//! came from in the original source file.
//!
//! ## Layers
//!
//! - [`CommentBlock`] holds the raw comment lines exactly as captured from the
//!   source, including indentation and the `///` (or `//`) marker.
//! - [`PositionMap`] strips the markers, producing the normalized comment text,
//!   and maps every normalized offset back to an original byte offset and a
//!   1-based line/column.
//! - [`parse`] runs the tolerant markup parser over normalized text and returns
//!   either a [`MarkupDocument`] or a [`ParseError`]. It never panics.
//!
//! ```rust,ignore
//! let block = CommentBlock::from_source(source, 3, 5, CommentMarker::Documentation)?;
//! let map = block.position_map();
//! match doclint_syntax::parse(map.text()) {
//!     Ok(doc) => inspect(&doc, &map),
//!     Err(error) => report(map.position(error.offset), &error.message),
//! }
//! ```

mod comment;
mod markup;

pub use comment::{source_lines, CommentBlock, CommentLine, CommentMarker, PositionMap};
pub use markup::{
    collapse_whitespace, parse, Attribute, Element, MarkupDocument, Node, ParseError, TextNode,
};

/// Byte offset range in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl OffsetRange {
    /// Create a new offset range
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-width range at an offset
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A position in an original source file.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
/// `offset` is the byte offset from the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl SourcePosition {
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Line index for a file (for position conversions)
/// Maps byte offsets to line/column positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Create a new line index from source text
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];

        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position (0-based, column in bytes)
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));

        let col = offset - self.line_starts.get(line).copied().unwrap_or(0);
        (line, col)
    }

    /// Convert a byte offset in `text` to a 1-based source position with a
    /// character column.
    #[must_use]
    pub fn position(&self, text: &str, offset: usize) -> SourcePosition {
        let (line, _) = self.line_col(offset);
        let line_start = self.line_start(line).unwrap_or(0);
        let column = text
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        SourcePosition::new(line + 1, column + 1, offset)
    }

    /// Convert a 1-based line and character column back to a byte offset.
    ///
    /// Returns `None` when the line does not exist. Columns past the end of
    /// the line clamp to the line end.
    #[must_use]
    pub fn offset(&self, text: &str, line: usize, column: usize) -> Option<usize> {
        let start = self.line_start(line.checked_sub(1)?)?;
        let end = self
            .line_start(line)
            .map_or(text.len(), |next| next.saturating_sub(1));
        let line_text = text.get(start..end)?;
        let within = line_text
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(line_text.trim_end_matches('\r').len(), |(i, _)| i);
        Some(start + within)
    }

    /// Get the byte offset of the start of a line (0-based line)
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Get the number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
