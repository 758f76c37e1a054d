use super::sections;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that reports `<param>` sections naming a parameter the
/// declaration does not have
pub struct NoUnknownParamRuleImpl;

impl LintRule for NoUnknownParamRuleImpl {
    fn name(&self) -> &'static str {
        "no_unknown_param"
    }

    fn description(&self) -> &'static str {
        "Disallows <param> sections for parameters that do not exist"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for NoUnknownParamRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let declaration = ctx.declaration;
        sections(documentation.markup, ctx.classifier)
            .into_iter()
            .filter(|element| element.name == "param")
            .filter_map(|element| element.attribute("name"))
            .filter(|attr| {
                let name = attr.value.trim();
                !name.is_empty() && !declaration.parameters().iter().any(|p| p == name)
            })
            .map(|attr| {
                LintDiagnostic::warning(
                    documentation.position(attr.value_range.start),
                    format!(
                        "'{}' is not a parameter of {} '{}'",
                        attr.value.trim(),
                        declaration.kind(),
                        declaration.name()
                    ),
                    self.name(),
                )
            })
            .collect()
    }
}
