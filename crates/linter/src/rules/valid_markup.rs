use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that reports documentation comments whose markup is malformed
///
/// The diagnostic carries the parser's own message at the mapped error
/// offset. Its severity is fixed.
pub struct ValidMarkupRuleImpl;

impl LintRule for ValidMarkupRuleImpl {
    fn name(&self) -> &'static str {
        "valid_markup"
    }

    fn description(&self) -> &'static str {
        "Reports documentation comments that are not well-formed markup"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Hidden
    }

    fn configurable(&self) -> bool {
        false
    }
}

impl DeclarationLintRule for ValidMarkupRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(comment) = ctx.comment else {
            return Vec::new();
        };
        match comment.markup() {
            Ok(_) => Vec::new(),
            Err(error) => vec![LintDiagnostic::hidden(
                comment.position(error.offset),
                error.message.clone(),
                self.name(),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclarationDescriptor, DeclarationKind};
    use crate::rules::test_support::check;

    #[test]
    fn test_well_formed() {
        let method = DeclarationDescriptor::new(DeclarationKind::Method, "Run");
        assert!(check(&ValidMarkupRuleImpl, &method, "/// <summary>Runs.</summary>").is_empty());
    }

    #[test]
    fn test_unclosed_element() {
        let method = DeclarationDescriptor::new(DeclarationKind::Method, "Run");
        let source = "/// <summary>\n/// Runs.\n/// <para>\n/// </summary>";
        let diagnostics = check(&ValidMarkupRuleImpl, &method, source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, LintSeverity::Hidden);
        assert_eq!(
            diagnostics[0].message,
            "The 'para' start tag does not match the end tag of 'summary'."
        );
        assert_eq!(
            (diagnostics[0].location.line, diagnostics[0].location.column),
            (4, 5)
        );
    }

    #[test]
    fn test_reported_even_with_inheritdoc_text() {
        let method = DeclarationDescriptor::new(DeclarationKind::Method, "Run");
        let diagnostics = check(&ValidMarkupRuleImpl, &method, "/// <inheritdoc/> &bogus;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Reference to undeclared entity 'bogus'."
        );
    }
}
