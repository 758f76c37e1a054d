use super::find_section;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};
use doclint_syntax::collapse_whitespace;
use serde::Deserialize;

const DEFAULT_TEMPLATE: &str = "Summary description for the {name} {kind}.";

/// Options for the `no_default_summary` rule
///
/// Example configuration:
/// ```yaml
/// lint:
///   rules:
///     no_default_summary: [warn, { templates: ["TODO: describe {name}."] }]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NoDefaultSummaryOptions {
    /// Extra generated-summary templates. `{name}` and `{kind}` are replaced
    /// with the declaration name and kind description.
    pub templates: Vec<String>,
}

impl NoDefaultSummaryOptions {
    /// Parse options from a JSON value, falling back to defaults on error
    fn from_json(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Lint rule that reports summaries still holding generated boilerplate
///
/// The comparison is case-sensitive, after collapsing whitespace.
pub struct NoDefaultSummaryRuleImpl;

impl LintRule for NoDefaultSummaryRuleImpl {
    fn name(&self) -> &'static str {
        "no_default_summary"
    }

    fn description(&self) -> &'static str {
        "Disallows the default summary text generated for new declarations"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for NoDefaultSummaryRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let Some(summary) = find_section(documentation.markup, ctx.classifier, "summary") else {
            return Vec::new();
        };
        let text = collapse_whitespace(&summary.inner_text());
        if text.is_empty() {
            return Vec::new();
        }

        let declaration = ctx.declaration;
        let kind = declaration.kind().description();
        let opts = NoDefaultSummaryOptions::from_json(options);
        let is_default = std::iter::once(DEFAULT_TEMPLATE)
            .chain(opts.templates.iter().map(String::as_str))
            .map(|template| {
                collapse_whitespace(
                    &template
                        .replace("{name}", declaration.name())
                        .replace("{kind}", kind),
                )
            })
            .any(|expected| expected == text);
        if !is_default {
            return Vec::new();
        }

        vec![LintDiagnostic::warning(
            declaration.keyword_location(),
            format!(
                "The summary of {kind} '{}' is the default generated text",
                declaration.name()
            ),
            self.name(),
        )]
    }
}
