use super::find_section;
use crate::context::DocumentationContext;
use crate::declaration::DeclarationKind;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that requires a `<returns>` section on methods and delegates
/// that return a value
pub struct RequireReturnsRuleImpl;

impl LintRule for RequireReturnsRuleImpl {
    fn name(&self) -> &'static str {
        "require_returns"
    }

    fn description(&self) -> &'static str {
        "Requires a <returns> section on methods and delegates that return a value"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for RequireReturnsRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let declaration = ctx.declaration;
        if !matches!(
            declaration.kind(),
            DeclarationKind::Method | DeclarationKind::Delegate
        ) || !declaration.has_return_value()
        {
            return Vec::new();
        }
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        if find_section(documentation.markup, ctx.classifier, "returns").is_some() {
            return Vec::new();
        }
        vec![LintDiagnostic::warning(
            declaration.name_location(),
            format!(
                "Documentation for {} '{}' must have a <returns> section",
                declaration.kind(),
                declaration.name()
            ),
            self.name(),
        )]
    }
}
