//! Documentation comment analysis and repair engine.
//!
//! Rules run over one declaration and its parsed `///` comment at a time
//! (see [`DeclarationLintRule`]), or over the raw text of a file for the
//! header checks (see [`FileLintRule`]). Fixes are edit scripts over the
//! original source and are applied by [`apply_edits`].

mod analysis;
mod classifier;
mod config;
mod context;
mod declaration;
mod diagnostics;
mod header;
mod registry;
mod rewrite;
mod rules;
mod settings;
mod traits;

pub use analysis::{Analyzer, DocumentedDeclaration, FixOutcome, MAX_FIX_PASSES};
pub use classifier::{ElementCategory, ElementClassifier};
pub use config::{ExtendsConfig, FullLintConfig, LintConfig, LintRuleConfig, LintSeverity, PRESETS};
pub use context::{Documentation, DocumentationContext, FileContext, ParsedComment};
pub use declaration::{
    DeclarationDescriptor, DeclarationInfo, DeclarationKind, PropertyAccessors, TypeKeyword,
    Visibility, VisibilityScope,
};
pub use diagnostics::{
    CodeFix, EditKind, LintDiagnostic, LintSeverity as DiagnosticSeverity, TextEdit,
};
pub use header::{check_file_header, HeaderState, DIAGNOSTIC_IDS as HEADER_RULE_IDS};
pub use registry::{all_rule_names, declaration_rules, file_rules, fixed_severity_rule_names};
pub use rewrite::{apply_edits, apply_fixes, RewriteError};
pub use rules::NoDefaultSummaryOptions;
pub use settings::{AnalyzerSettings, COMPANY_NAME_TOKEN};
pub use traits::{DeclarationLintRule, FileLintRule, LintRule};

pub use doclint_syntax::{CommentBlock, CommentLine, CommentMarker, OffsetRange, SourcePosition};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use doclint_linter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analysis::{Analyzer, DocumentedDeclaration};
    pub use crate::config::{LintConfig, LintSeverity};
    pub use crate::declaration::{DeclarationDescriptor, DeclarationInfo, DeclarationKind};
    pub use crate::diagnostics::{LintDiagnostic, LintSeverity as DiagnosticSeverity};
    pub use crate::settings::AnalyzerSettings;
    pub use crate::traits::{DeclarationLintRule, FileLintRule, LintRule};
}
