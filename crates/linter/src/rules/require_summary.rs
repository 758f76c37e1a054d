use super::find_section;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that requires a `<summary>` section
///
/// A partial declaration split over several parts may use `<content>`
/// instead, since its summary usually lives on another part.
pub struct RequireSummaryRuleImpl;

impl LintRule for RequireSummaryRuleImpl {
    fn name(&self) -> &'static str {
        "require_summary"
    }

    fn description(&self) -> &'static str {
        "Requires a <summary> section in documentation comments"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for RequireSummaryRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        if find_section(documentation.markup, ctx.classifier, "summary").is_some() {
            return Vec::new();
        }
        let declaration = ctx.declaration;
        if declaration.partial_parts() > 1
            && find_section(documentation.markup, ctx.classifier, "content").is_some()
        {
            return Vec::new();
        }
        vec![LintDiagnostic::warning(
            declaration.name_location(),
            format!(
                "Documentation for {} '{}' must have a <summary> section",
                declaration.kind(),
                declaration.name()
            ),
            self.name(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclarationDescriptor, DeclarationKind, TypeKeyword};
    use crate::rules::test_support::check;

    fn class() -> DeclarationDescriptor {
        DeclarationDescriptor::new(DeclarationKind::Type(TypeKeyword::Class), "Widget")
    }

    #[test]
    fn test_summary_present() {
        assert!(check(&RequireSummaryRuleImpl, &class(), "/// <summary>A widget.</summary>").is_empty());
    }

    #[test]
    fn test_summary_missing() {
        let diagnostics = check(&RequireSummaryRuleImpl, &class(), "/// <remarks>A widget.</remarks>");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Documentation for class 'Widget' must have a <summary> section"
        );
    }

    #[test]
    fn test_summary_inside_placeholder() {
        let source = "/// <placeholder><summary>Content.</summary></placeholder>";
        assert!(check(&RequireSummaryRuleImpl, &class(), source).is_empty());
    }

    #[test]
    fn test_content_accepted_for_partial_types() {
        let source = "/// <content>More members.</content>";
        assert_eq!(check(&RequireSummaryRuleImpl, &class(), source).len(), 1);
        let partial = class().with_partial_parts(2);
        assert!(check(&RequireSummaryRuleImpl, &partial, source).is_empty());
    }

    #[test]
    fn test_nested_summary_does_not_count() {
        let source = "/// <remarks><summary>Nested.</summary></remarks>";
        assert_eq!(check(&RequireSummaryRuleImpl, &class(), source).len(), 1);
    }

    #[test]
    fn test_inheritdoc_suppresses() {
        assert!(check(&RequireSummaryRuleImpl, &class(), "///   <inheritdoc/>  ").is_empty());
    }

    #[test]
    fn test_malformed_markup_is_left_to_valid_markup() {
        assert!(check(&RequireSummaryRuleImpl, &class(), "/// <remarks>").is_empty());
    }
}
