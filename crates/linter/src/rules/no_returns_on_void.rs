use super::find_section;
use crate::context::DocumentationContext;
use crate::declaration::DeclarationKind;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that forbids `<returns>` on methods and delegates without a
/// return value
pub struct NoReturnsOnVoidRuleImpl;

impl LintRule for NoReturnsOnVoidRuleImpl {
    fn name(&self) -> &'static str {
        "no_returns_on_void"
    }

    fn description(&self) -> &'static str {
        "Disallows a <returns> section on methods and delegates that return nothing"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for NoReturnsOnVoidRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let declaration = ctx.declaration;
        if !matches!(
            declaration.kind(),
            DeclarationKind::Method | DeclarationKind::Delegate
        ) || declaration.has_return_value()
        {
            return Vec::new();
        }
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let Some(returns) = find_section(documentation.markup, ctx.classifier, "returns") else {
            return Vec::new();
        };
        vec![LintDiagnostic::warning(
            documentation.position(returns.start_tag.start),
            format!(
                "{} '{}' returns nothing and must not have a <returns> section",
                declaration.kind(),
                declaration.name()
            ),
            self.name(),
        )]
    }
}
