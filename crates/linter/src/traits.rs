//! Trait-based lint rule system
//!
//! Declaration rules see one declaration and its parsed comment at a time;
//! file rules see the raw text of a whole source file. Both are pure: they
//! read immutable inputs and return diagnostics, so the analyzer can run
//! them from many threads at once.

use crate::context::{DocumentationContext, FileContext};
use crate::diagnostics::{LintDiagnostic, LintSeverity};

/// Base trait for all lint rules
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule (e.g., `"require_summary"`)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Default severity (can be overridden by config)
    fn default_severity(&self) -> LintSeverity;

    /// Whether the severity can be changed or the rule turned off
    fn configurable(&self) -> bool {
        true
    }

    /// Rule ids this rule reports diagnostics under
    fn diagnostic_ids(&self) -> Vec<&'static str> {
        vec![self.name()]
    }
}

/// Lint rule that runs once per declaration
pub trait DeclarationLintRule: LintRule {
    /// Check one declaration and its documentation comment
    ///
    /// The `options` parameter contains rule-specific configuration from the
    /// `lint` section of the config file. Rules define their own options
    /// struct and deserialize from this JSON value.
    fn check(
        &self,
        ctx: &DocumentationContext<'_>,
        options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic>;
}

/// Lint rule that runs once per source file
pub trait FileLintRule: LintRule {
    fn check(&self, ctx: &FileContext<'_>, options: Option<&serde_json::Value>)
        -> Vec<LintDiagnostic>;
}
