//! Documentation rule implementations
//!
//! Each rule lives in its own file and implements [`DeclarationLintRule`]
//! (see [`crate::traits`]). The helpers here are shared by the presence and
//! structural rules.
//!
//! [`DeclarationLintRule`]: crate::traits::DeclarationLintRule

use crate::classifier::{ElementCategory, ElementClassifier};
use crate::context::Documentation;
use crate::diagnostics::{CodeFix, TextEdit};
use doclint_syntax::{Element, MarkupDocument, Node, OffsetRange};

/// Elements whose children must be consistently block or inline
pub const CONTAINER_ELEMENTS: &[&str] = &[
    "summary",
    "remarks",
    "returns",
    "value",
    "example",
    "exception",
    "param",
    "typeparam",
    "permission",
];

/// Elements whose inline content must always sit inside a block
pub const PARAGRAPH_ELEMENTS: &[&str] = &["remarks", "note"];

/// Top-level sections of a comment, looking through pass-through wrappers
pub(crate) fn sections<'d>(
    markup: &'d MarkupDocument,
    classifier: &ElementClassifier,
) -> Vec<&'d Element> {
    let mut out = Vec::new();
    collect_sections(markup.nodes(), classifier, &mut out);
    out
}

fn collect_sections<'d>(
    nodes: &'d [Node],
    classifier: &ElementClassifier,
    out: &mut Vec<&'d Element>,
) {
    for element in nodes.iter().filter_map(Node::as_element) {
        if classifier.classify_tag(&element.name) == ElementCategory::PassThrough {
            collect_sections(&element.children, classifier, out);
        } else {
            out.push(element);
        }
    }
}

/// First top-level section with the given name
pub(crate) fn find_section<'d>(
    markup: &'d MarkupDocument,
    classifier: &ElementClassifier,
    name: &str,
) -> Option<&'d Element> {
    sections(markup, classifier)
        .into_iter()
        .find(|element| element.name == name)
}

/// Category of a child node, with pass-through wrappers counted as block
/// when anything inside them is block content.
pub(crate) fn effective_category(node: &Node, classifier: &ElementClassifier) -> ElementCategory {
    match classifier.classify(node) {
        ElementCategory::PassThrough => {
            let has_block = node.as_element().is_some_and(|element| {
                element.children.iter().any(|child| {
                    effective_category(child, classifier) == ElementCategory::Block
                })
            });
            if has_block {
                ElementCategory::Block
            } else {
                ElementCategory::Inline
            }
        }
        category => category,
    }
}

/// Whether any direct child of `element` is block content
pub(crate) fn has_block_child(element: &Element, classifier: &ElementClassifier) -> bool {
    element
        .children
        .iter()
        .any(|child| effective_category(child, classifier) == ElementCategory::Block)
}

/// Span from the first to the last non-whitespace character of a run of
/// sibling nodes. Ignored nodes at either edge are skipped. `None` when the
/// run has no inline content.
pub(crate) fn inline_span(nodes: &[&Node], classifier: &ElementClassifier) -> Option<OffsetRange> {
    let is_content = |node: &&&Node| classifier.classify(node) != ElementCategory::Ignored;
    let first = nodes.iter().find(is_content)?;
    let last = nodes.iter().rev().find(is_content)?;
    let start = match first {
        Node::Text(text) => text.range.start + (text.text.len() - text.text.trim_start().len()),
        node => node.range().start,
    };
    let end = match last {
        Node::Text(text) => text.range.start + text.text.trim_end().len(),
        node => node.range().end,
    };
    Some(OffsetRange::new(start, end))
}

/// Fix wrapping a normalized span in `<para>…</para>`
pub(crate) fn wrap_in_para(documentation: &Documentation<'_>, span: OffsetRange) -> CodeFix {
    CodeFix::new(
        "Wrap content in <para>",
        vec![
            TextEdit::insert(documentation.source_offset(span.start), "<para>"),
            TextEdit::insert(documentation.source_offset(span.end), "</para>"),
        ],
    )
}

/// Fix deleting a normalized span, when it lies on a single source line.
pub(crate) fn delete_span(documentation: &Documentation<'_>, span: OffsetRange) -> Option<TextEdit> {
    let text = documentation.text().get(span.start..span.end)?;
    if text.contains('\n') {
        return None;
    }
    Some(TextEdit::delete(
        documentation.source_offset(span.start),
        documentation.source_offset(span.end),
    ))
}

mod invalid_param_name;
mod no_default_summary;
mod no_duplicate_content;
mod no_placeholder_element;
mod no_returns_on_void;
mod no_unknown_param;
mod no_value_on_write_only_property;
mod require_documentation;
mod require_element_text;
mod require_param;
mod require_returns;
mod require_summary;
mod require_value;
mod use_child_blocks_consistently;
mod use_child_blocks_consistently_across_sections;
mod valid_markup;

pub use invalid_param_name::InvalidParamNameRuleImpl;
pub use no_default_summary::{NoDefaultSummaryOptions, NoDefaultSummaryRuleImpl};
pub use no_duplicate_content::NoDuplicateContentRuleImpl;
pub use no_placeholder_element::NoPlaceholderElementRuleImpl;
pub use no_returns_on_void::NoReturnsOnVoidRuleImpl;
pub use no_unknown_param::NoUnknownParamRuleImpl;
pub use no_value_on_write_only_property::NoValueOnWriteOnlyPropertyRuleImpl;
pub use require_documentation::RequireDocumentationRuleImpl;
pub use require_element_text::RequireElementTextRuleImpl;
pub use require_param::RequireParamRuleImpl;
pub use require_returns::RequireReturnsRuleImpl;
pub use require_summary::RequireSummaryRuleImpl;
pub use require_value::RequireValueRuleImpl;
pub use use_child_blocks_consistently::UseChildBlocksConsistentlyRuleImpl;
pub use use_child_blocks_consistently_across_sections::UseChildBlocksConsistentlyAcrossSectionsRuleImpl;
pub use valid_markup::ValidMarkupRuleImpl;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::classifier::ElementClassifier;
    use crate::context::{DocumentationContext, ParsedComment};
    use crate::declaration::DeclarationInfo;
    use crate::diagnostics::LintDiagnostic;
    use crate::rewrite::apply_edits;
    use crate::settings::AnalyzerSettings;
    use crate::traits::DeclarationLintRule;
    use doclint_syntax::{source_lines, CommentBlock, CommentMarker};

    /// The `///` lines of `source` as one parsed comment
    pub fn comment(source: &str) -> ParsedComment {
        let lines = source_lines(source)
            .filter(|line| line.has_marker(CommentMarker::Documentation))
            .collect();
        ParsedComment::new(CommentBlock::documentation(lines))
    }

    /// Run one rule over the `///` lines of `source`
    pub fn check(
        rule: &dyn DeclarationLintRule,
        declaration: &dyn DeclarationInfo,
        source: &str,
    ) -> Vec<LintDiagnostic> {
        check_with_options(rule, declaration, source, None)
    }

    pub fn check_with_options(
        rule: &dyn DeclarationLintRule,
        declaration: &dyn DeclarationInfo,
        source: &str,
        options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let parsed = comment(source);
        let settings = AnalyzerSettings::default();
        let ctx = DocumentationContext::new(
            declaration,
            Some(&parsed),
            &settings,
            ElementClassifier::shared(),
        );
        rule.check(&ctx, options)
    }

    /// Apply every fix of `diagnostics` to `source`
    pub fn fixed(source: &str, diagnostics: &[LintDiagnostic]) -> String {
        let edits: Vec<_> = diagnostics
            .iter()
            .filter_map(|diagnostic| diagnostic.fix.as_ref())
            .flat_map(|fix| fix.edits.iter().cloned())
            .collect();
        apply_edits(source, &edits).unwrap()
    }
}
