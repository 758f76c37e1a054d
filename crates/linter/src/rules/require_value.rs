use super::find_section;
use crate::context::DocumentationContext;
use crate::declaration::DeclarationKind;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that requires a `<value>` section on readable properties
pub struct RequireValueRuleImpl;

impl LintRule for RequireValueRuleImpl {
    fn name(&self) -> &'static str {
        "require_value"
    }

    fn description(&self) -> &'static str {
        "Requires a <value> section on properties that can be read"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for RequireValueRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let declaration = ctx.declaration;
        if declaration.kind() != DeclarationKind::Property || declaration.is_write_only() {
            return Vec::new();
        }
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        if find_section(documentation.markup, ctx.classifier, "value").is_some() {
            return Vec::new();
        }
        vec![LintDiagnostic::warning(
            declaration.name_location(),
            format!(
                "Documentation for property '{}' must have a <value> section",
                declaration.name()
            ),
            self.name(),
        )]
    }
}
