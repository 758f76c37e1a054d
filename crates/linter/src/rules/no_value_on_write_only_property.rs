use super::find_section;
use crate::context::DocumentationContext;
use crate::declaration::DeclarationKind;
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::traits::{DeclarationLintRule, LintRule};

/// Lint rule that forbids `<value>` on write-only properties
///
/// A property is write-only when its getter is absent, or private while the
/// property itself is more visible.
pub struct NoValueOnWriteOnlyPropertyRuleImpl;

impl LintRule for NoValueOnWriteOnlyPropertyRuleImpl {
    fn name(&self) -> &'static str {
        "no_value_on_write_only_property"
    }

    fn description(&self) -> &'static str {
        "Disallows a <value> section on write-only properties"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }
}

impl DeclarationLintRule for NoValueOnWriteOnlyPropertyRuleImpl {
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        let declaration = ctx.declaration;
        if declaration.kind() != DeclarationKind::Property || !declaration.is_write_only() {
            return Vec::new();
        }
        let Some(documentation) = ctx.documentation() else {
            return Vec::new();
        };
        let Some(value) = find_section(documentation.markup, ctx.classifier, "value") else {
            return Vec::new();
        };
        vec![LintDiagnostic::warning(
            documentation.position(value.start_tag.start),
            format!(
                "Write-only property '{}' must not have a <value> section",
                declaration.name()
            ),
            self.name(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclarationDescriptor, PropertyAccessors, Visibility};
    use crate::rules::test_support::check;

    const SOURCE: &str = "/// <summary>Sets the name.</summary>\n/// <value>The name.</value>";

    fn property(get: Option<Visibility>) -> DeclarationDescriptor {
        DeclarationDescriptor::new(DeclarationKind::Property, "Name").with_accessors(
            PropertyAccessors {
                get,
                set: Some(Visibility::Public),
            },
        )
    }

    #[test]
    fn test_setter_only_property() {
        let diagnostics = check(&NoValueOnWriteOnlyPropertyRuleImpl, &property(None), SOURCE);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            (diagnostics[0].location.line, diagnostics[0].location.column),
            (2, 5)
        );
    }

    #[test]
    fn test_private_getter_on_public_property() {
        let diagnostics = check(
            &NoValueOnWriteOnlyPropertyRuleImpl,
            &property(Some(Visibility::Private)),
            SOURCE,
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_readable_property() {
        assert!(check(
            &NoValueOnWriteOnlyPropertyRuleImpl,
            &property(Some(Visibility::Public)),
            SOURCE
        )
        .is_empty());
    }
}
