use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that requires a documentation comment on declarations
///
/// Which declarations need one depends on their effective visibility and
/// the `document*Elements` settings. Private fields have their own switch.
pub struct RequireDocumentationRuleImpl;

impl LintRule for RequireDocumentationRuleImpl {
    fn name(&self) -> &'static str {
        "require_documentation"
    }

    fn description(&self) -> &'static str {
        "Requires a documentation comment on declarations within the documented visibility scope"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for RequireDocumentationRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        if ctx.comment.is_some() {
            return Vec::new();
        }
        let declaration = ctx.declaration;
        if !ctx
            .settings
            .requires_documentation(declaration.kind(), declaration.effective_visibility())
        {
            return Vec::new();
        }
        vec![LintDiagnostic::warning(
            declaration.name_location(),
            format!("{} must be documented", declaration.kind()),
            self.name(),
        )]
    }
}
