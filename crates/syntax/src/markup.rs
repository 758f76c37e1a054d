//! Tolerant parser for the markup used inside documentation comments.
//!
//! The grammar is a small XML subset: elements, quoted attributes,
//! self-closing tags, CDATA sections, comments, processing instructions and
//! text with entity references. Well-formedness problems never panic; they
//! come back as a [`ParseError`] carrying a message and the offset where the
//! problem was found.

use crate::OffsetRange;
use std::fmt::Write;

/// A parse error with position information
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at offset {offset})")]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte offset in the normalized text where the error occurred
    pub offset: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Raw text content with its span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// Content text (for CDATA, comments and processing instructions: the
    /// text between the delimiters)
    pub text: String,
    /// Span of the whole node including delimiters
    pub range: OffsetRange,
}

/// An attribute on a start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Raw value between the quotes (entity references are not expanded)
    pub value: String,
    pub quote: char,
    /// Span from the first character of the name to the closing quote
    pub range: OffsetRange,
    /// Span of the value between the quotes
    pub value_range: OffsetRange,
}

/// A markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in source order; names are unique
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub self_closing: bool,
    /// Span of the whole element, start tag through end tag
    pub range: OffsetRange,
    pub start_tag: OffsetRange,
    /// `None` for self-closing elements
    pub end_tag: Option<OffsetRange>,
}

impl Element {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Span between the start and end tags (zero-width for self-closing tags)
    #[must_use]
    pub fn content_range(&self) -> OffsetRange {
        match self.end_tag {
            Some(end_tag) => OffsetRange::new(self.start_tag.end, end_tag.start),
            None => OffsetRange::at(self.start_tag.end),
        }
    }

    /// Descendant text (text nodes and CDATA) concatenated in document order
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }

    /// This element and every descendant element, in document order
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            out.push(element);
            stack.extend(element.elements().collect::<Vec<_>>().into_iter().rev());
        }
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) | Node::CData(text) => out.push_str(&text.text),
            Node::Element(element) => collect_text(&element.children, out),
            Node::Comment(_) | Node::ProcessingInstruction(_) => {}
        }
    }
}

/// A node in the parsed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(TextNode),
    CData(TextNode),
    Comment(TextNode),
    ProcessingInstruction(TextNode),
}

impl Node {
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub const fn range(&self) -> OffsetRange {
        match self {
            Self::Element(element) => element.range,
            Self::Text(text)
            | Self::CData(text)
            | Self::Comment(text)
            | Self::ProcessingInstruction(text) => text.range,
        }
    }

    /// Whether this is a text node made only of whitespace
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Text(text) if text.text.trim().is_empty())
    }
}

/// A successfully parsed comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    nodes: Vec<Node>,
    has_inheritdoc: bool,
}

impl MarkupDocument {
    fn new(nodes: Vec<Node>) -> Self {
        let has_inheritdoc = nodes
            .iter()
            .filter_map(Node::as_element)
            .any(|element| element.name == "inheritdoc");
        Self {
            nodes,
            has_inheritdoc,
        }
    }

    /// Top-level nodes in document order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Top-level elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(Node::as_element)
    }

    /// First top-level element with the given name
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Whether a top-level `<inheritdoc/>` is present
    ///
    /// The tag name must match exactly: element names are case-sensitive, so
    /// `<InheritDoc/>` or a namespaced `<x:inheritdoc/>` does not count.
    #[must_use]
    pub const fn has_inheritdoc(&self) -> bool {
        self.has_inheritdoc
    }

    /// Every element at any depth, in document order
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        self.elements().flat_map(Element::descendants).collect()
    }

    /// Re-serialize the tree.
    ///
    /// Text is written verbatim, attributes keep their order and quote
    /// character, and self-closing elements are written as `<name/>`.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_nodes(&self.nodes, &mut out);
        out
    }
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.text),
            Node::CData(text) => {
                let _ = write!(out, "<![CDATA[{}]]>", text.text);
            }
            Node::Comment(text) => {
                let _ = write!(out, "<!--{}-->", text.text);
            }
            Node::ProcessingInstruction(text) => {
                let _ = write!(out, "<?{}?>", text.text);
            }
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for attr in &element.attributes {
                    let _ = write!(
                        out,
                        " {}={quote}{}{quote}",
                        attr.name,
                        attr.value,
                        quote = attr.quote
                    );
                }
                if element.self_closing {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    write_nodes(&element.children, out);
                    let _ = write!(out, "</{}>", element.name);
                }
            }
        }
    }
}

/// Collapse every run of whitespace to a single space and trim the ends
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse normalized comment text.
///
/// On success the full tree is returned; on any well-formedness failure the
/// first problem found is returned as a [`ParseError`].
pub fn parse(text: &str) -> Result<MarkupDocument, ParseError> {
    let result = Parser::new(text).parse_document();
    if let Err(error) = &result {
        tracing::debug!(offset = error.offset, message = %error.message, "Markup parse failed");
    }
    result
}

const NAMED_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric() || c == '-' || c == '.'
}

/// An element whose end tag has not been seen yet
struct OpenElement {
    element: Element,
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn parse_document(mut self) -> Result<MarkupDocument, ParseError> {
        let mut stack: Vec<OpenElement> = Vec::new();
        let mut top: Vec<Node> = Vec::new();

        while self.pos < self.text.len() {
            let start = self.pos;
            let rest = self.rest();

            if rest.starts_with("</") {
                let (name, end_tag) = self.parse_end_tag()?;
                let Some(open) = stack.pop() else {
                    return Err(ParseError::new(
                        format!("Unexpected end tag '{name}' with no matching start tag."),
                        start,
                    ));
                };
                if open.element.name != name {
                    return Err(ParseError::new(
                        format!(
                            "The '{}' start tag does not match the end tag of '{name}'.",
                            open.element.name
                        ),
                        start,
                    ));
                }
                let mut element = open.element;
                element.range.end = end_tag.end;
                element.end_tag = Some(end_tag);
                push_node(&mut stack, &mut top, Node::Element(element));
            } else if rest.starts_with("<!--") {
                let node = self.parse_delimited("<!--", "-->", "a comment")?;
                push_node(&mut stack, &mut top, Node::Comment(node));
            } else if rest.starts_with("<![CDATA[") {
                let node = self.parse_delimited("<![CDATA[", "]]>", "a CDATA section")?;
                push_node(&mut stack, &mut top, Node::CData(node));
            } else if rest.starts_with("<?") {
                let node = self.parse_delimited("<?", "?>", "a processing instruction")?;
                push_node(&mut stack, &mut top, Node::ProcessingInstruction(node));
            } else if rest.starts_with("<!") {
                return Err(ParseError::new("Unsupported markup declaration.", start));
            } else if rest.starts_with('<') {
                let element = self.parse_start_tag()?;
                if element.self_closing {
                    push_node(&mut stack, &mut top, Node::Element(element));
                } else {
                    stack.push(OpenElement { element });
                }
            } else {
                let node = self.parse_text()?;
                push_node(&mut stack, &mut top, Node::Text(node));
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::new(
                format!(
                    "The '{}' start tag has no matching end tag.",
                    open.element.name
                ),
                open.element.start_tag.start,
            ));
        }

        Ok(MarkupDocument::new(top))
    }

    fn parse_name(&mut self, context: &str) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            None => {
                return Err(ParseError::new(
                    format!("Unexpected end of input while parsing {context}."),
                    start,
                ))
            }
            Some(c) if !is_name_start(c) => {
                return Err(ParseError::new(
                    format!("Name cannot begin with the '{c}' character."),
                    start,
                ))
            }
            Some(_) => {}
        }
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn parse_start_tag(&mut self) -> Result<Element, ParseError> {
        let start = self.pos;
        self.eat("<");
        let name = self.parse_name("a start tag")?;
        let mut attributes: Vec<Attribute> = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None => {
                    return Err(ParseError::new(
                        format!("Unexpected end of input while parsing the '{name}' start tag."),
                        self.pos,
                    ))
                }
                Some('>') => {
                    self.bump();
                    let start_tag = OffsetRange::new(start, self.pos);
                    return Ok(Element {
                        name,
                        attributes,
                        children: Vec::new(),
                        self_closing: false,
                        range: start_tag,
                        start_tag,
                        end_tag: None,
                    });
                }
                Some('/') => {
                    if !self.eat("/>") {
                        return Err(ParseError::new(
                            format!("Unexpected character '/' in the '{name}' start tag."),
                            self.pos,
                        ));
                    }
                    let start_tag = OffsetRange::new(start, self.pos);
                    return Ok(Element {
                        name,
                        attributes,
                        children: Vec::new(),
                        self_closing: true,
                        range: start_tag,
                        start_tag,
                        end_tag: None,
                    });
                }
                Some(c) if !had_space || !is_name_start(c) => {
                    return Err(ParseError::new(
                        format!("Unexpected character '{c}' in the '{name}' start tag."),
                        self.pos,
                    ));
                }
                Some(_) => {
                    let attr_start = self.pos;
                    let attribute = self.parse_attribute()?;
                    if attributes.iter().any(|a| a.name == attribute.name) {
                        return Err(ParseError::new(
                            format!("'{}' is a duplicate attribute name.", attribute.name),
                            attr_start,
                        ));
                    }
                    attributes.push(attribute);
                }
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let start = self.pos;
        let name = self.parse_name("an attribute")?;
        self.skip_whitespace();
        if !self.eat("=") {
            return Err(ParseError::new(
                format!("Expected '=' after attribute '{name}'."),
                self.pos,
            ));
        }
        self.skip_whitespace();
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                return Err(ParseError::new(
                    format!("The value of attribute '{name}' must be enclosed in quotes."),
                    self.pos,
                ))
            }
        };
        self.bump();
        let value_start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::new(
                        format!("Unexpected end of input in the value of attribute '{name}'."),
                        self.pos,
                    ))
                }
                Some('<') => {
                    return Err(ParseError::new(
                        format!("'<' is not allowed in the value of attribute '{name}'."),
                        self.pos,
                    ))
                }
                Some('&') => self.check_entity()?,
                Some(c) if c == quote => break,
                Some(_) => {
                    self.bump();
                }
            }
        }
        let value_end = self.pos;
        self.bump();
        Ok(Attribute {
            name,
            value: self.text[value_start..value_end].to_string(),
            quote,
            range: OffsetRange::new(start, self.pos),
            value_range: OffsetRange::new(value_start, value_end),
        })
    }

    fn parse_end_tag(&mut self) -> Result<(String, OffsetRange), ParseError> {
        let start = self.pos;
        self.eat("</");
        let name = self.parse_name("an end tag")?;
        self.skip_whitespace();
        match self.bump() {
            Some('>') => Ok((name, OffsetRange::new(start, self.pos))),
            Some(c) => Err(ParseError::new(
                format!("Unexpected character '{c}' in the '{name}' end tag."),
                self.pos - c.len_utf8(),
            )),
            None => Err(ParseError::new(
                format!("Unexpected end of input while parsing the '{name}' end tag."),
                self.pos,
            )),
        }
    }

    fn parse_delimited(
        &mut self,
        open: &str,
        close: &str,
        what: &str,
    ) -> Result<TextNode, ParseError> {
        let start = self.pos;
        self.eat(open);
        let content_start = self.pos;
        let Some(len) = self.rest().find(close) else {
            return Err(ParseError::new(
                format!("Unexpected end of input while parsing {what}."),
                start,
            ));
        };
        self.pos += len;
        let text = self.text[content_start..self.pos].to_string();
        self.eat(close);
        Ok(TextNode {
            text,
            range: OffsetRange::new(start, self.pos),
        })
    }

    fn parse_text(&mut self) -> Result<TextNode, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                '<' => break,
                '&' => self.check_entity()?,
                _ => {
                    self.bump();
                }
            }
        }
        Ok(TextNode {
            text: self.text[start..self.pos].to_string(),
            range: OffsetRange::new(start, self.pos),
        })
    }

    /// Validate the entity reference starting at the current `&` and move
    /// past it.
    fn check_entity(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.eat("&");
        let body_start = self.pos;
        let Some(len) = self.rest().find(';') else {
            return Err(ParseError::new("Invalid entity reference.", start));
        };
        let body = &self.text[body_start..body_start + len];
        let valid = if let Some(hex) = body.strip_prefix("#x") {
            !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
        } else if let Some(decimal) = body.strip_prefix('#') {
            !decimal.is_empty() && decimal.chars().all(|c| c.is_ascii_digit())
        } else if body.is_empty() || !body.chars().all(is_name_char) {
            false
        } else if NAMED_ENTITIES.contains(&body) {
            true
        } else {
            return Err(ParseError::new(
                format!("Reference to undeclared entity '{body}'."),
                start,
            ));
        };
        if !valid {
            return Err(ParseError::new("Invalid entity reference.", start));
        }
        self.pos = body_start + len + 1;
        Ok(())
    }
}

fn push_node(stack: &mut [OpenElement], top: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(open) => open.element.children.push(node),
        None => top.push(node),
    }
}
