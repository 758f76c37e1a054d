use doclint_syntax::Node;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Structural role of a node inside a documentation section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// Forms its own paragraph-like unit
    Block,
    /// Must live inside a block container
    Inline,
    /// Transparent wrapper; its children count, not the wrapper itself
    PassThrough,
    /// Irrelevant to structure (comments, processing instructions, whitespace)
    Ignored,
}

const BLOCK_TAGS: &[&str] = &[
    "para",
    "p",
    "div",
    "list",
    "table",
    "code",
    "note",
    "ul",
    "ol",
    "blockquote",
];

const PASS_THROUGH_TAGS: &[&str] = &["placeholder"];

const INLINE_TAGS: &[&str] = &[
    "c",
    "see",
    "seealso",
    "paramref",
    "typeparamref",
    "b",
    "i",
    "em",
    "strong",
    "u",
    "tt",
    "a",
    "br",
    "span",
    "token",
];

static SHARED: LazyLock<ElementClassifier> = LazyLock::new(ElementClassifier::new);

/// Tag name to [`ElementCategory`] lookup. Unknown tags are inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementClassifier {
    tags: HashMap<&'static str, ElementCategory>,
}

impl Default for ElementClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementClassifier {
    #[must_use]
    pub fn new() -> Self {
        let mut tags = HashMap::new();
        for tag in BLOCK_TAGS {
            tags.insert(*tag, ElementCategory::Block);
        }
        for tag in PASS_THROUGH_TAGS {
            tags.insert(*tag, ElementCategory::PassThrough);
        }
        for tag in INLINE_TAGS {
            tags.insert(*tag, ElementCategory::Inline);
        }
        Self { tags }
    }

    /// The process-wide classifier, built on first use
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    #[must_use]
    pub fn classify_tag(&self, name: &str) -> ElementCategory {
        self.tags
            .get(name)
            .copied()
            .unwrap_or(ElementCategory::Inline)
    }

    /// Classify a parsed node. Whitespace-only text is ignored; any other
    /// text or CDATA is inline.
    #[must_use]
    pub fn classify(&self, node: &Node) -> ElementCategory {
        match node {
            Node::Element(element) => self.classify_tag(&element.name),
            Node::Text(_) if node.is_whitespace() => ElementCategory::Ignored,
            Node::Text(_) | Node::CData(_) => ElementCategory::Inline,
            Node::Comment(_) | Node::ProcessingInstruction(_) => ElementCategory::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tags() {
        let classifier = ElementClassifier::shared();
        assert_eq!(classifier.classify_tag("para"), ElementCategory::Block);
        assert_eq!(classifier.classify_tag("code"), ElementCategory::Block);
        assert_eq!(classifier.classify_tag("see"), ElementCategory::Inline);
        assert_eq!(
            classifier.classify_tag("placeholder"),
            ElementCategory::PassThrough
        );
        assert_eq!(classifier.classify_tag("unknown"), ElementCategory::Inline);
        // Lookup is case-sensitive
        assert_eq!(classifier.classify_tag("Para"), ElementCategory::Inline);
    }

    #[test]
    fn test_classify_nodes() {
        let doc = doclint_syntax::parse("  <para/>text<!-- c --><![CDATA[x]]><?pi?>").unwrap();
        let categories: Vec<ElementCategory> = doc
            .nodes()
            .iter()
            .map(|node| ElementClassifier::shared().classify(node))
            .collect();
        assert_eq!(
            categories,
            vec![
                ElementCategory::Ignored,
                ElementCategory::Block,
                ElementCategory::Inline,
                ElementCategory::Ignored,
                ElementCategory::Inline,
                ElementCategory::Ignored,
            ]
        );
    }
}
