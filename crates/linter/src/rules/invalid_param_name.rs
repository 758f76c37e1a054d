use super::sections;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that reports `<param>` sections without a usable `name`
pub struct InvalidParamNameRuleImpl;

impl LintRule for InvalidParamNameRuleImpl {
    fn name(&self) -> &'static str {
        "invalid_param_name"
    }

    fn description(&self) -> &'static str {
        "Requires a non-empty name attribute on <param> sections"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for InvalidParamNameRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        sections(documentation.markup, ctx.classifier)
            .into_iter()
            .filter(|element| element.name == "param")
            .filter_map(|element| match element.attribute("name") {
                None => Some((
                    element.start_tag.start,
                    "The <param> section has no 'name' attribute",
                )),
                Some(attr) if attr.value.trim().is_empty() => Some((
                    attr.range.start,
                    "The 'name' attribute of the <param> section is empty",
                )),
                Some(_) => None,
            })
            .map(|(offset, message)| {
                LintDiagnostic::warning(documentation.position(offset), message, self.name())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclarationDescriptor, DeclarationKind};
    use crate::rules::test_support::check;

    fn method() -> DeclarationDescriptor {
        DeclarationDescriptor::new(DeclarationKind::Method, "Run").with_parameters(["count"])
    }

    #[test]
    fn test_missing_attribute_reported_at_tag() {
        let diagnostics = check(&InvalidParamNameRuleImpl, &method(), "/// <param>Count.</param>");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 5);
        assert!(diagnostics[0].message.contains("no 'name'"));
    }

    #[test]
    fn test_blank_attribute_reported_at_attribute() {
        let diagnostics = check(&InvalidParamNameRuleImpl, &method(), "/// <param name=\"  \">Count.</param>");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 12);
        assert!(diagnostics[0].message.contains("empty"));
    }

    #[test]
    fn test_named_param() {
        assert!(check(&InvalidParamNameRuleImpl, &method(), "/// <param name=\"count\">Count.</param>").is_empty());
    }
}
