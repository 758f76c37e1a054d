use super::{
    effective_category, inline_span, wrap_in_para, CONTAINER_ELEMENTS, PARAGRAPH_ELEMENTS,
};
use crate::classifier::ElementCategory;
use crate::context::{Documentation, DocumentationContext};
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};
use doclint_syntax::Node;

/// Lint rule that requires a section to be all block or all inline
///
/// Once a container section (`<summary>`, `<remarks>`, `<param>`, ...) holds
/// a block child such as `<para>`, every run of inline content between the
/// blocks is reported once and wrapped in `<para>` by the fix.
///
/// `<remarks>` and `<note>` hold paragraphs: their inline content is
/// reported even when no block sibling exists, so `<remarks>Text.</remarks>`
/// becomes `<remarks><para>Text.</para></remarks>`.
pub struct UseChildBlocksConsistentlyRuleImpl;

impl LintRule for UseChildBlocksConsistentlyRuleImpl {
    fn name(&self) -> &'static str {
        "use_child_blocks_consistently"
    }

    fn description(&self) -> &'static str {
        "Requires inline content next to block elements or inside <remarks> to be wrapped in a block"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for UseChildBlocksConsistentlyRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();
        for element in documentation.markup.descendants() {
            let name = element.name.as_str();
            if CONTAINER_ELEMENTS.contains(&name) || PARAGRAPH_ELEMENTS.contains(&name) {
                self.check_children(
                    ctx,
                    &documentation,
                    name,
                    &element.children,
                    PARAGRAPH_ELEMENTS.contains(&name),
                    &mut diagnostics,
                );
            }
        }
        diagnostics
    }
}

impl UseChildBlocksConsistentlyRuleImpl {
    fn check_children(
        &self,
        ctx: &DocumentationContext<'_>,
        documentation: &Documentation<'_>,
        container: &str,
        children: &[Node],
        requires_blocks: bool,
        diagnostics: &mut Vec<LintDiagnostic>,
    ) {
        let classifier = ctx.classifier;

        // Pass-through wrappers are checked as containers of their own
        for child in children {
            if classifier.classify(child) == ElementCategory::PassThrough {
                if let Some(wrapper) = child.as_element() {
                    self.check_children(
                        ctx,
                        documentation,
                        container,
                        &wrapper.children,
                        false,
                        diagnostics,
                    );
                }
            }
        }

        let categories: Vec<ElementCategory> = children
            .iter()
            .map(|child| effective_category(child, classifier))
            .collect();
        if !requires_blocks && !categories.contains(&ElementCategory::Block) {
            return;
        }

        let mut run: Vec<&Node> = Vec::new();
        for (child, category) in children.iter().zip(categories) {
            if category == ElementCategory::Block {
                self.report_run(ctx, documentation, container, &run, diagnostics);
                run.clear();
            } else {
                run.push(child);
            }
        }
        self.report_run(ctx, documentation, container, &run, diagnostics);
    }

    fn report_run(
        &self,
        ctx: &DocumentationContext<'_>,
        documentation: &Documentation<'_>,
        container: &str,
        run: &[&Node],
        diagnostics: &mut Vec<LintDiagnostic>,
    ) {
        let Some(span) = inline_span(run, ctx.classifier) else {
            return;
        };
        diagnostics.push(
            LintDiagnostic::warning(
                documentation.position(span.start),
                format!("Inline content in <{container}> must be wrapped in a block element"),
                self.name(),
            )
            .with_fix(wrap_in_para(documentation, span)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclarationDescriptor, DeclarationKind};
    use crate::rules::test_support::{check, fixed};

    fn method() -> DeclarationDescriptor {
        DeclarationDescriptor::new(DeclarationKind::Method, "Run")
    }

    #[test]
    fn test_all_inline_is_fine() {
        let source = "/// <summary>Runs <see cref=\"Job\"/> now.</summary>";
        assert!(check(&UseChildBlocksConsistentlyRuleImpl, &method(), source).is_empty());
    }

    #[test]
    fn test_lone_remarks_wrapped() {
        let source = "/// <remarks>Remarks.</remarks>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 14);
        let once = fixed(source, &diagnostics);
        assert_eq!(once, "/// <remarks><para>Remarks.</para></remarks>");
        assert!(check(&UseChildBlocksConsistentlyRuleImpl, &method(), &once).is_empty());
    }

    #[test]
    fn test_note_text_wrapped() {
        let source = "/// <remarks><note>Careful <c>now</c>.</note></remarks>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            fixed(source, &diagnostics),
            "/// <remarks><note><para>Careful <c>now</c>.</para></note></remarks>"
        );
    }

    #[test]
    fn test_empty_remarks_is_fine() {
        let source = "/// <remarks>\n/// </remarks>";
        assert!(check(&UseChildBlocksConsistentlyRuleImpl, &method(), source).is_empty());
    }

    #[test]
    fn test_placeholder_in_remarks_wrapped_once() {
        let source = "/// <remarks><placeholder>Remarks.</placeholder></remarks>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            fixed(source, &diagnostics),
            "/// <remarks><para><placeholder>Remarks.</placeholder></para></remarks>"
        );
    }

    #[test]
    fn test_all_block_is_fine() {
        let source = "/// <remarks>\n/// <para>One.</para>\n/// <para>Two.</para>\n/// </remarks>";
        assert!(check(&UseChildBlocksConsistentlyRuleImpl, &method(), source).is_empty());
    }

    #[test]
    fn test_inline_runs_between_blocks() {
        let source = "/// <remarks>\n/// Lead <c>in</c>.\n/// <para>Middle.</para>\n/// Tail.\n/// </remarks>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        let locations: Vec<(usize, usize)> = diagnostics
            .iter()
            .map(|d| (d.location.line, d.location.column))
            .collect();
        assert_eq!(locations, vec![(2, 5), (4, 5)]);
        assert_eq!(
            fixed(source, &diagnostics),
            "/// <remarks>\n/// <para>Lead <c>in</c>.</para>\n/// <para>Middle.</para>\n/// <para>Tail.</para>\n/// </remarks>"
        );
    }

    #[test]
    fn test_fix_is_idempotent() {
        let source = "/// <summary>Lead.<para>Body.</para></summary>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        assert_eq!(diagnostics.len(), 1);
        let once = fixed(source, &diagnostics);
        assert_eq!(once, "/// <summary><para>Lead.</para><para>Body.</para></summary>");
        assert!(check(&UseChildBlocksConsistentlyRuleImpl, &method(), &once).is_empty());
    }

    #[test]
    fn test_placeholder_with_block_counts_as_block() {
        let source = "/// <summary>Lead.<placeholder><para>Body.</para></placeholder></summary>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 14);
    }

    #[test]
    fn test_placeholder_children_checked_as_container() {
        let source = "/// <summary><placeholder>Lead.<para>Body.</para></placeholder></summary>";
        let diagnostics = check(&UseChildBlocksConsistentlyRuleImpl, &method(), source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 27);
    }

    #[test]
    fn test_comments_alone_are_not_a_run() {
        let source = "/// <remarks><!-- note --><para>Body.</para></remarks>";
        assert!(check(&UseChildBlocksConsistentlyRuleImpl, &method(), source).is_empty());
    }
}
