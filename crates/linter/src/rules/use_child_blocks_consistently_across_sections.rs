use super::{
    has_block_child, inline_span, sections, wrap_in_para, CONTAINER_ELEMENTS, PARAGRAPH_ELEMENTS,
};
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};
use doclint_syntax::Node;

/// Lint rule that keeps sibling sections in the same style
///
/// When one top-level section uses block children, every other section
/// written entirely inline is reported and its content wrapped in `<para>`.
/// `<remarks>` is left to `use_child_blocks_consistently`, which always
/// requires paragraphs there.
pub struct UseChildBlocksConsistentlyAcrossSectionsRuleImpl;

impl LintRule for UseChildBlocksConsistentlyAcrossSectionsRuleImpl {
    fn name(&self) -> &'static str {
        "use_child_blocks_consistently_across_sections"
    }

    fn description(&self) -> &'static str {
        "Requires inline sections to use block elements when sibling sections do"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for UseChildBlocksConsistentlyAcrossSectionsRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let containers: Vec<_> = sections(documentation.markup, ctx.classifier)
            .into_iter()
            .filter(|element| CONTAINER_ELEMENTS.contains(&element.name.as_str()))
            .collect();
        if !containers
            .iter()
            .any(|element| has_block_child(element, ctx.classifier))
        {
            return Vec::new();
        }

        containers
            .into_iter()
            .filter(|element| !PARAGRAPH_ELEMENTS.contains(&element.name.as_str()))
            .filter(|element| !has_block_child(element, ctx.classifier))
            .filter_map(|element| {
                let children: Vec<&Node> = element.children.iter().collect();
                let span = inline_span(&children, ctx.classifier)?;
                Some(
                    LintDiagnostic::warning(
                        documentation.position(span.start),
                        format!(
                            "The <{}> section must use block elements like its sibling sections",
                            element.name
                        ),
                        self.name(),
                    )
                    .with_fix(wrap_in_para(&documentation, span)),
                )
            })
            .collect()
    }
}
