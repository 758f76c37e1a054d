/// Registry of all available lint rules
use crate::header::FileHeaderRuleImpl;
use crate::rules::{
    InvalidParamNameRuleImpl, NoDefaultSummaryRuleImpl, NoDuplicateContentRuleImpl,
    NoPlaceholderElementRuleImpl, NoReturnsOnVoidRuleImpl, NoUnknownParamRuleImpl,
    NoValueOnWriteOnlyPropertyRuleImpl, RequireDocumentationRuleImpl, RequireElementTextRuleImpl,
    RequireParamRuleImpl, RequireReturnsRuleImpl, RequireSummaryRuleImpl, RequireValueRuleImpl,
    UseChildBlocksConsistentlyAcrossSectionsRuleImpl, UseChildBlocksConsistentlyRuleImpl,
    ValidMarkupRuleImpl,
};
use crate::traits::{DeclarationLintRule, FileLintRule, LintRule};
use std::sync::{Arc, LazyLock};

/// Lazily initialized declaration rules.
/// Rules are created once and reused across all calls.
static DECLARATION_RULES: LazyLock<Vec<Arc<dyn DeclarationLintRule>>> = LazyLock::new(|| {
    vec![
        Arc::new(ValidMarkupRuleImpl),
        Arc::new(RequireDocumentationRuleImpl),
        Arc::new(RequireSummaryRuleImpl),
        Arc::new(RequireValueRuleImpl),
        Arc::new(NoValueOnWriteOnlyPropertyRuleImpl),
        Arc::new(RequireParamRuleImpl),
        Arc::new(InvalidParamNameRuleImpl),
        Arc::new(NoUnknownParamRuleImpl),
        Arc::new(RequireReturnsRuleImpl),
        Arc::new(NoReturnsOnVoidRuleImpl),
        Arc::new(RequireElementTextRuleImpl),
        Arc::new(NoDefaultSummaryRuleImpl),
        Arc::new(NoDuplicateContentRuleImpl),
        Arc::new(NoPlaceholderElementRuleImpl),
        Arc::new(UseChildBlocksConsistentlyRuleImpl),
        Arc::new(UseChildBlocksConsistentlyAcrossSectionsRuleImpl),
    ]
});

/// Lazily initialized file rules.
static FILE_RULES: LazyLock<Vec<Arc<dyn FileLintRule>>> =
    LazyLock::new(|| vec![Arc::new(FileHeaderRuleImpl)]);

#[must_use]
pub fn declaration_rules() -> &'static [Arc<dyn DeclarationLintRule>] {
    &DECLARATION_RULES
}

#[must_use]
pub fn file_rules() -> &'static [Arc<dyn FileLintRule>] {
    &FILE_RULES
}

fn all_rules() -> impl Iterator<Item = &'static dyn LintRule> {
    let declaration = declaration_rules()
        .iter()
        .map(|rule| rule.as_ref() as &dyn LintRule);
    let file = file_rules().iter().map(|rule| rule.as_ref() as &dyn LintRule);
    declaration.chain(file)
}

/// Every configurable rule id, sorted
///
/// Rules reporting under several ids (the file header checks) contribute
/// each id rather than their own name.
#[must_use]
pub fn all_rule_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = all_rules()
        .filter(|rule| rule.configurable())
        .flat_map(|rule| rule.diagnostic_ids())
        .collect();
    names.sort_unstable();
    names
}

/// Rule ids whose severity cannot be changed or turned off
#[must_use]
pub fn fixed_severity_rule_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = all_rules()
        .filter(|rule| !rule.configurable())
        .flat_map(|rule| rule.diagnostic_ids())
        .collect();
    names.sort_unstable();
    names
}
