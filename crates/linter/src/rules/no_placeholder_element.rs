use super::delete_span;
use crate::context::DocumentationContext;
use crate::diagnostics::{CodeFix, LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that reports every `<placeholder>` element, at any depth
///
/// The fix removes the start and end tags and keeps the content. A
/// self-closing placeholder has no content to keep and gets no fix.
pub struct NoPlaceholderElementRuleImpl;

impl LintRule for NoPlaceholderElementRuleImpl {
    fn name(&self) -> &'static str {
        "no_placeholder_element"
    }

    fn description(&self) -> &'static str {
        "Disallows <placeholder> elements left in documentation"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for NoPlaceholderElementRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        documentation
            .markup
            .descendants()
            .into_iter()
            .filter(|element| element.name == "placeholder")
            .map(|element| {
                let diagnostic = LintDiagnostic::warning(
                    documentation.position(element.start_tag.start),
                    "Documentation must not contain <placeholder> elements",
                    self.name(),
                );
                let Some(end_tag) = element.end_tag else {
                    return diagnostic;
                };
                match (
                    delete_span(&documentation, element.start_tag),
                    delete_span(&documentation, end_tag),
                ) {
                    (Some(open), Some(close)) => diagnostic
                        .with_fix(CodeFix::new("Remove <placeholder> tags", vec![open, close])),
                    _ => diagnostic,
                }
            })
            .collect()
    }
}
