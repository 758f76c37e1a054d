use super::sections;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};
use doclint_syntax::collapse_whitespace;

const TEXT_SECTIONS: &[&str] = &["summary", "param", "returns", "value"];

/// Lint rule that reports sections left empty
pub struct RequireElementTextRuleImpl;

impl LintRule for RequireElementTextRuleImpl {
    fn name(&self) -> &'static str {
        "require_element_text"
    }

    fn description(&self) -> &'static str {
        "Requires <summary>, <param>, <returns> and <value> sections to contain text"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for RequireElementTextRuleImpl {
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
            .filter(|element| TEXT_SECTIONS.contains(&element.name.as_str()))
            .filter(|element| {
                element.elements().next().is_none()
                    && collapse_whitespace(&element.inner_text()).is_empty()
            })
            .map(|element| {
                LintDiagnostic::warning(
                    documentation.position(element.start_tag.start),
                    format!("The <{}> section must not be empty", element.name),
                    self.name(),
                )
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
    fn test_empty_sections() {
        let source = "/// <summary>\n/// </summary>\n/// <param name=\"count\"/>\n/// <remarks/>";
        let diagnostics = check(&RequireElementTextRuleImpl, &method(), source);
        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "The <summary> section must not be empty",
                "The <param> section must not be empty"
            ]
        );
    }

    #[test]
    fn test_reference_only_content_is_not_empty() {
        let source = "/// <summary><see cref=\"Job\"/></summary>";
        assert!(check(&RequireElementTextRuleImpl, &method(), source).is_empty());
    }
}
