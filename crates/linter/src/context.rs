use crate::classifier::ElementClassifier;
use crate::declaration::DeclarationInfo;
use crate::settings::AnalyzerSettings;
use doclint_syntax::{CommentBlock, MarkupDocument, ParseError, PositionMap, SourcePosition};

/// A comment block together with its position map and parse result.
///
/// Parsing happens once per block; every rule shares the result.
#[derive(Debug, Clone)]
pub struct ParsedComment {
    block: CommentBlock,
    map: PositionMap,
    markup: Result<MarkupDocument, ParseError>,
}

impl ParsedComment {
    #[must_use]
    pub fn new(block: CommentBlock) -> Self {
        let map = block.position_map();
        let markup = doclint_syntax::parse(map.text());
        Self { block, map, markup }
    }

    #[must_use]
    pub const fn block(&self) -> &CommentBlock {
        &self.block
    }

    #[must_use]
    pub const fn map(&self) -> &PositionMap {
        &self.map
    }

    /// The parsed tree, or the first well-formedness error
    pub fn markup(&self) -> Result<&MarkupDocument, &ParseError> {
        self.markup.as_ref()
    }

    /// Source position of a normalized offset
    #[must_use]
    pub fn position(&self, offset: usize) -> SourcePosition {
        self.map.position(offset)
    }

    /// Source byte offset of a normalized offset
    #[must_use]
    pub fn source_offset(&self, offset: usize) -> usize {
        self.map.source_offset(offset)
    }
}

/// A well-formed comment without `<inheritdoc/>`: what structural and
/// presence rules inspect.
#[derive(Debug, Clone, Copy)]
pub struct Documentation<'a> {
    pub markup: &'a MarkupDocument,
    pub comment: &'a ParsedComment,
}

impl Documentation<'_> {
    #[must_use]
    pub fn position(&self, offset: usize) -> SourcePosition {
        self.comment.position(offset)
    }

    #[must_use]
    pub fn source_offset(&self, offset: usize) -> usize {
        self.comment.source_offset(offset)
    }

    /// The normalized comment text the markup spans refer to
    #[must_use]
    pub fn text(&self) -> &str {
        self.comment.map().text()
    }
}

/// Everything a declaration rule may look at
#[derive(Clone, Copy)]
pub struct DocumentationContext<'a> {
    pub declaration: &'a dyn DeclarationInfo,
    pub comment: Option<&'a ParsedComment>,
    pub settings: &'a AnalyzerSettings,
    pub classifier: &'a ElementClassifier,
}

impl<'a> DocumentationContext<'a> {
    #[must_use]
    pub fn new(
        declaration: &'a dyn DeclarationInfo,
        comment: Option<&'a ParsedComment>,
        settings: &'a AnalyzerSettings,
        classifier: &'a ElementClassifier,
    ) -> Self {
        Self {
            declaration,
            comment,
            settings,
            classifier,
        }
    }

    /// The parsed documentation, unless there is no comment, the markup is
    /// malformed, or the block inherits its documentation.
    #[must_use]
    pub fn documentation(&self) -> Option<Documentation<'a>> {
        let comment = self.comment?;
        let markup = comment.markup().ok()?;
        if markup.has_inheritdoc() {
            return None;
        }
        Some(Documentation { markup, comment })
    }
}

/// Everything a file rule may look at
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// File name without directories, as written in a header `file` attribute
    pub file_name: &'a str,
    pub source: &'a str,
    pub settings: &'a AnalyzerSettings,
}
