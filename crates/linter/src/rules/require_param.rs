use super::sections;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that requires a `<param>` section for every declared parameter
pub struct RequireParamRuleImpl;

impl LintRule for RequireParamRuleImpl {
    fn name(&self) -> &'static str {
        "require_param"
    }

    fn description(&self) -> &'static str {
        "Requires a <param> section for each parameter"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for RequireParamRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let declaration = ctx.declaration;
        if declaration.parameters().is_empty() {
            return Vec::new();
        }
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let documented: Vec<&str> = sections(documentation.markup, ctx.classifier)
            .into_iter()
            .filter(|element| element.name == "param")
            .filter_map(|element| element.attribute("name"))
            .map(|attr| attr.value.trim())
            .collect();

        declaration
            .parameters()
            .iter()
            .filter(|parameter| !documented.contains(&parameter.as_str()))
            .map(|parameter| {
                LintDiagnostic::warning(
                    declaration.name_location(),
                    format!("Parameter '{parameter}' must be documented"),
                    self.name(),
                )
            })
            .collect()
    }
}
