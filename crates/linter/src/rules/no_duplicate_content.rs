use crate::classifier::ElementCategory;
use crate::context::DocumentationContext;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};
use doclint_syntax::{collapse_whitespace, Element, Node};

/// Lint rule that reports two top-level sections with the same text
///
/// Reported once per comment, at the earlier of the first duplicated pair,
/// with the later one attached as a related location.
pub struct NoDuplicateContentRuleImpl;

impl LintRule for NoDuplicateContentRuleImpl {
    fn name(&self) -> &'static str {
        "no_duplicate_content"
    }

    fn description(&self) -> &'static str {
        "Disallows documentation sections that repeat the text of another section"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for NoDuplicateContentRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let sections: Vec<(&Element, String)> = documentation
            .markup
            .nodes()
            .iter()
            .filter(|node| ctx.classifier.classify(node) != ElementCategory::Ignored)
            .filter_map(Node::as_element)
            .map(|element| (element, collapse_whitespace(&element.inner_text())))
            .filter(|(_, text)| !text.is_empty())
            .collect();

        for (index, (first, text)) in sections.iter().enumerate() {
            let Some((second, _)) = sections[index + 1..]
                .iter()
                .find(|(_, other)| other == text)
            else {
                continue;
            };
            return vec![LintDiagnostic::warning(
                documentation.position(first.start_tag.start),
                format!(
                    "The <{}> section has the same text as the <{}> section",
                    first.name, second.name
                ),
                self.name(),
            )
            .with_related(documentation.position(second.start_tag.start))];
        }
        Vec::new()
    }
}
