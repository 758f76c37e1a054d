//! Raw comment capture and the normalized-text position map.

use crate::SourcePosition;

/// The per-line marker that introduces a comment line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentMarker {
    /// `///` documentation comments attached to declarations
    Documentation,
    /// `//` single-line comments, used by file headers
    Line,
}

impl CommentMarker {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "///",
            Self::Line => "//",
        }
    }
}

/// One raw comment line exactly as it appears in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    /// Line text without the line terminator (`\n` or `\r\n`)
    pub text: String,
    /// 1-based line number in the original source
    pub line: usize,
    /// Byte offset of the start of the line in the original source
    pub offset: usize,
}

impl CommentLine {
    #[must_use]
    pub fn new(text: impl Into<String>, line: usize, offset: usize) -> Self {
        Self {
            text: text.into(),
            line,
            offset,
        }
    }

    /// Byte index within the line where comment content starts, once the
    /// indentation, the marker and one following space are skipped.
    fn content_start(&self, marker: CommentMarker) -> usize {
        let trimmed = self
            .text
            .trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        let indent = self.text.len() - trimmed.len();
        match trimmed.strip_prefix(marker.as_str()) {
            Some(after) => {
                let start = indent + marker.as_str().len();
                if after.starts_with(' ') {
                    start + 1
                } else {
                    start
                }
            }
            None => indent,
        }
    }

    /// Comment content of this line (marker and the single leading space removed)
    #[must_use]
    pub fn content(&self, marker: CommentMarker) -> &str {
        self.text.get(self.content_start(marker)..).unwrap_or("")
    }

    /// 1-based character column of the first content character
    #[must_use]
    pub fn content_column(&self, marker: CommentMarker) -> usize {
        let start = self.content_start(marker);
        self.text
            .get(..start)
            .map_or(0, |prefix| prefix.chars().count())
            + 1
    }

    /// Whether this line is a comment line introduced by `marker`.
    ///
    /// A `//` line must not be a `///` documentation line.
    #[must_use]
    pub fn has_marker(&self, marker: CommentMarker) -> bool {
        let trimmed = self
            .text
            .trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        match marker {
            CommentMarker::Documentation => {
                trimmed.starts_with("///") && !trimmed.starts_with("////")
            }
            CommentMarker::Line => trimmed.starts_with("//") && !trimmed.starts_with("///"),
        }
    }
}

/// Iterate over the lines of `source` as [`CommentLine`]s, with 1-based line
/// numbers and line-start byte offsets. Trailing `\r` is not part of the text.
pub fn source_lines(source: &str) -> impl Iterator<Item = CommentLine> + '_ {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let start = offset;
            offset += raw.len();
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            CommentLine::new(text, index + 1, start)
        })
}

/// The contiguous comment attached to a declaration (or leading a file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    marker: CommentMarker,
    lines: Vec<CommentLine>,
}

impl CommentBlock {
    #[must_use]
    pub const fn new(marker: CommentMarker, lines: Vec<CommentLine>) -> Self {
        Self { marker, lines }
    }

    /// A `///` documentation block from raw lines
    #[must_use]
    pub const fn documentation(lines: Vec<CommentLine>) -> Self {
        Self::new(CommentMarker::Documentation, lines)
    }

    /// Capture lines `start_line..=end_line` (1-based) of `source`.
    ///
    /// Returns `None` when the range is empty or runs past the end of the file.
    #[must_use]
    pub fn from_source(
        source: &str,
        start_line: usize,
        end_line: usize,
        marker: CommentMarker,
    ) -> Option<Self> {
        if start_line == 0 || end_line < start_line {
            return None;
        }
        let lines: Vec<CommentLine> = source_lines(source)
            .skip(start_line - 1)
            .take(end_line - start_line + 1)
            .collect();
        if lines.len() != end_line - start_line + 1 {
            return None;
        }
        Some(Self::new(marker, lines))
    }

    /// Capture the contiguous `marker` comment lines directly above the
    /// 1-based `line` (typically the first line of a declaration).
    ///
    /// Attribute lines (`[...]`) between the comment and the declaration are
    /// skipped. Returns `None` when no comment line precedes the declaration.
    #[must_use]
    pub fn preceding(source: &str, line: usize, marker: CommentMarker) -> Option<Self> {
        let above: Vec<CommentLine> = source_lines(source)
            .take(line.saturating_sub(1))
            .collect();
        let mut lines: Vec<CommentLine> = above
            .into_iter()
            .rev()
            .skip_while(|candidate| candidate.text.trim_start().starts_with('['))
            .take_while(|candidate| candidate.has_marker(marker))
            .collect();
        if lines.is_empty() {
            return None;
        }
        lines.reverse();
        Some(Self::new(marker, lines))
    }

    /// Capture the leading run of `//` comment lines of a file.
    ///
    /// Blank lines before the first comment are skipped; the run ends at the
    /// first line that is not a `//` comment. `///` lines never start a header.
    #[must_use]
    pub fn leading_line_comments(source: &str) -> Option<Self> {
        let lines: Vec<CommentLine> = source_lines(source)
            .skip_while(|line| line.text.trim_start_matches('\u{feff}').trim().is_empty())
            .take_while(|line| line.has_marker(CommentMarker::Line))
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(Self::new(CommentMarker::Line, lines))
        }
    }

    #[must_use]
    pub const fn marker(&self) -> CommentMarker {
        self.marker
    }

    #[must_use]
    pub fn lines(&self) -> &[CommentLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// A copy of this block without the lines matching `predicate`
    #[must_use]
    pub fn without_lines(&self, predicate: impl Fn(&CommentLine) -> bool) -> Self {
        Self::new(
            self.marker,
            self.lines
                .iter()
                .filter(|line| !predicate(line))
                .cloned()
                .collect(),
        )
    }

    /// Position of the first non-whitespace content character, falling back to
    /// the first line's content start when every line is blank.
    #[must_use]
    pub fn first_content_position(&self) -> Option<SourcePosition> {
        let map = self.position_map();
        let text = map.text();
        let offset = text.len() - text.trim_start().len();
        if self.lines.is_empty() {
            None
        } else {
            Some(map.position(offset.min(text.len())))
        }
    }

    /// Build the normalized text and its position table
    #[must_use]
    pub fn position_map(&self) -> PositionMap {
        PositionMap::new(self)
    }
}

/// One normalized line and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    /// Offset of the segment in the normalized text
    normalized_start: usize,
    /// Byte length of the segment content
    len: usize,
    /// Byte offset of the segment content in the original source
    source_offset: usize,
    /// 1-based source line
    line: usize,
    /// 1-based character column of the first content character
    column: usize,
}

/// Normalized comment text plus an exact map back to the original source.
///
/// Each comment line contributes its content (marker and one leading space
/// removed) followed by `\n` (except the last line). The `\n` joining line
/// *k* to line *k + 1* maps to the end of line *k*'s content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    text: String,
    segments: Vec<Segment>,
}

impl PositionMap {
    #[must_use]
    pub fn new(block: &CommentBlock) -> Self {
        let mut text = String::new();
        let mut segments = Vec::with_capacity(block.lines.len());

        for (index, line) in block.lines.iter().enumerate() {
            if index > 0 {
                text.push('\n');
            }
            let content_start = line.content_start(block.marker);
            let content = line.text.get(content_start..).unwrap_or("");
            segments.push(Segment {
                normalized_start: text.len(),
                len: content.len(),
                source_offset: line.offset + content_start,
                line: line.line,
                column: line.content_column(block.marker),
            });
            text.push_str(content);
        }

        tracing::trace!(
            lines = segments.len(),
            len = text.len(),
            "Built comment position map"
        );
        Self { text, segments }
    }

    /// The normalized comment text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn segment(&self, offset: usize) -> Option<&Segment> {
        let index = self
            .segments
            .partition_point(|segment| segment.normalized_start <= offset)
            .saturating_sub(1);
        self.segments.get(index)
    }

    /// Map a normalized offset to a byte offset in the original source
    #[must_use]
    pub fn source_offset(&self, offset: usize) -> usize {
        self.segment(offset).map_or(offset, |segment| {
            let delta = offset.saturating_sub(segment.normalized_start).min(segment.len);
            segment.source_offset + delta
        })
    }

    /// Map a normalized offset to an original source position
    #[must_use]
    pub fn position(&self, offset: usize) -> SourcePosition {
        let Some(segment) = self.segment(offset) else {
            return SourcePosition::default();
        };
        let end = offset.min(segment.normalized_start + segment.len);
        let chars = self
            .text
            .get(segment.normalized_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        SourcePosition::new(
            segment.line,
            segment.column + chars,
            segment.source_offset + (end - segment.normalized_start),
        )
    }
}
