//! Analysis entry points.
//!
//! An [`Analyzer`] bundles the settings, the lint configuration and the
//! element classifier, runs every registered rule and maps the rule's
//! default severity through the configuration.

use crate::classifier::ElementClassifier;
use crate::config::{LintConfig, LintSeverity as ConfigSeverity};
use crate::context::{DocumentationContext, FileContext, ParsedComment};
use crate::declaration::DeclarationInfo;
use crate::diagnostics::{CodeFix, LintDiagnostic, LintSeverity};
use crate::registry::{declaration_rules, file_rules};
use crate::rewrite::{apply_edits, RewriteError};
use crate::settings::AnalyzerSettings;
use crate::traits::LintRule;
use doclint_syntax::{CommentBlock, OffsetRange};
use rayon::prelude::*;

/// Upper bound on analyze-and-fix rounds in [`Analyzer::fix_source`]
pub const MAX_FIX_PASSES: usize = 10;

/// A declaration of a source file and the comment block preceding it
pub struct DocumentedDeclaration {
    pub declaration: Box<dyn DeclarationInfo>,
    pub comment: Option<CommentBlock>,
}

impl DocumentedDeclaration {
    #[must_use]
    pub fn new(declaration: impl DeclarationInfo + 'static, comment: Option<CommentBlock>) -> Self {
        Self {
            declaration: Box::new(declaration),
            comment,
        }
    }
}

impl std::fmt::Debug for DocumentedDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentedDeclaration")
            .field("kind", &self.declaration.kind())
            .field("name", &self.declaration.name())
            .field("comment", &self.comment)
            .finish()
    }
}

/// Result of [`Analyzer::fix_source`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten source
    pub source: String,
    /// Number of fixes applied over all passes
    pub applied: usize,
    /// Diagnostics left after the last pass
    pub remaining: Vec<LintDiagnostic>,
}

impl FixOutcome {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Runs the rule set with one configuration
#[derive(Debug, Clone)]
pub struct Analyzer {
    settings: AnalyzerSettings,
    config: LintConfig,
    classifier: &'static ElementClassifier,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerSettings::default())
    }
}

impl Analyzer {
    /// Analyzer with the recommended lint configuration
    #[must_use]
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self::with_config(settings, LintConfig::default())
    }

    #[must_use]
    pub fn with_config(settings: AnalyzerSettings, config: LintConfig) -> Self {
        Self {
            settings,
            config,
            classifier: ElementClassifier::shared(),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    #[must_use]
    pub const fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Check one declaration and its (optional) comment block
    #[tracing::instrument(skip_all, fields(declaration = declaration.name()))]
    pub fn analyze_declaration(
        &self,
        declaration: &dyn DeclarationInfo,
        comment: Option<&CommentBlock>,
    ) -> Vec<LintDiagnostic> {
        let parsed = comment.map(|block| ParsedComment::new(block.clone()));
        let ctx = DocumentationContext::new(
            declaration,
            parsed.as_ref(),
            &self.settings,
            self.classifier,
        );

        let mut diagnostics = Vec::new();
        for rule in declaration_rules() {
            if !self.rule_enabled(rule.as_ref()) {
                continue;
            }
            let options = self.config.get_options(rule.name());
            diagnostics.extend(self.configure(rule.as_ref(), rule.check(&ctx, options)));
        }

        tracing::trace!(diagnostics = diagnostics.len(), "Declaration checked");
        diagnostics
    }

    /// Run the file rules (the header checks) over raw file text
    #[tracing::instrument(skip(self, source), fields(size = source.len()))]
    pub fn analyze_header(&self, source: &str, file_name: &str) -> Vec<LintDiagnostic> {
        let ctx = FileContext {
            file_name,
            source,
            settings: &self.settings,
        };

        let mut diagnostics = Vec::new();
        for rule in file_rules() {
            if !self.rule_enabled(rule.as_ref()) {
                continue;
            }
            let options = self.config.get_options(rule.name());
            diagnostics.extend(self.configure(rule.as_ref(), rule.check(&ctx, options)));
        }
        diagnostics
    }

    /// Check a whole file: its header and every declaration in it.
    ///
    /// Declarations are checked in parallel; the result is ordered by
    /// location, then rule id.
    #[tracing::instrument(skip(self, source, declarations), fields(declarations = declarations.len()))]
    pub fn analyze_file(
        &self,
        source: &str,
        file_name: &str,
        declarations: &[DocumentedDeclaration],
    ) -> Vec<LintDiagnostic> {
        let items: Vec<DocumentedRef<'_>> = declarations
            .iter()
            .map(|item| DocumentedRef {
                declaration: item.declaration.as_ref(),
                comment: item.comment.as_ref(),
            })
            .collect();
        let diagnostics = self.analyze_items(source, file_name, &items);

        tracing::debug!(
            file = file_name,
            diagnostics = diagnostics.len(),
            "Analysis complete"
        );
        diagnostics
    }

    /// Apply fixes to `source` until none remain or [`MAX_FIX_PASSES`] is hit.
    ///
    /// Comment blocks of `declarations` stand for their line ranges: they are
    /// read from `source` first and, since fixes never add or remove lines,
    /// re-read from the same ranges after each pass.
    /// Within a pass, a fix whose edits overlap an earlier fix waits for the
    /// next pass.
    #[tracing::instrument(skip(self, source, declarations), fields(declarations = declarations.len()))]
    pub fn fix_source(
        &self,
        source: &str,
        file_name: &str,
        declarations: &[DocumentedDeclaration],
    ) -> Result<FixOutcome, RewriteError> {
        let mut current = source.to_string();
        let mut applied = 0;
        let mut blocks: Vec<Option<CommentBlock>> = declarations
            .iter()
            .map(|item| item.comment.as_ref().and_then(|block| reread(source, block)))
            .collect();

        for pass in 0..MAX_FIX_PASSES {
            let diagnostics = self.analyze_blocks(&current, file_name, declarations, &blocks);
            let fixes = select_fixes(&diagnostics);
            if fixes.is_empty() {
                return Ok(FixOutcome {
                    source: current,
                    applied,
                    remaining: diagnostics,
                });
            }

            let edits: Vec<_> = fixes
                .iter()
                .flat_map(|fix| fix.edits.iter().cloned())
                .collect();
            current = apply_edits(&current, &edits)?;
            applied += fixes.len();
            blocks = blocks
                .iter()
                .map(|block| block.as_ref().and_then(|block| reread(&current, block)))
                .collect();
            tracing::debug!(pass, fixes = fixes.len(), "Applied fixes");
        }

        tracing::warn!(file = file_name, "Fixes did not converge");
        let remaining = self.analyze_blocks(&current, file_name, declarations, &blocks);
        Ok(FixOutcome {
            source: current,
            applied,
            remaining,
        })
    }

    fn analyze_blocks(
        &self,
        source: &str,
        file_name: &str,
        declarations: &[DocumentedDeclaration],
        blocks: &[Option<CommentBlock>],
    ) -> Vec<LintDiagnostic> {
        let items: Vec<DocumentedRef<'_>> = declarations
            .iter()
            .zip(blocks)
            .map(|(item, comment)| DocumentedRef {
                declaration: item.declaration.as_ref(),
                comment: comment.as_ref(),
            })
            .collect();
        self.analyze_items(source, file_name, &items)
    }

    fn analyze_items(
        &self,
        source: &str,
        file_name: &str,
        items: &[DocumentedRef<'_>],
    ) -> Vec<LintDiagnostic> {
        let mut diagnostics: Vec<LintDiagnostic> = items
            .par_iter()
            .flat_map_iter(|item| self.analyze_declaration(item.declaration, item.comment))
            .collect();
        diagnostics.extend(self.analyze_header(source, file_name));
        diagnostics.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.rule.cmp(&b.rule))
        });
        diagnostics
    }

    /// Whether any id of `rule` is reported under the current configuration
    fn rule_enabled(&self, rule: &dyn LintRule) -> bool {
        !rule.configurable()
            || rule
                .diagnostic_ids()
                .iter()
                .any(|id| self.config.is_enabled(id))
    }

    /// Map severities through the configuration, dropping disabled ids
    fn configure(&self, rule: &dyn LintRule, diagnostics: Vec<LintDiagnostic>) -> Vec<LintDiagnostic> {
        if !rule.configurable() {
            return diagnostics;
        }
        diagnostics
            .into_iter()
            .filter_map(|mut diagnostic| {
                diagnostic.severity = match self.config.get_severity(&diagnostic.rule)? {
                    ConfigSeverity::Off => return None,
                    ConfigSeverity::Warn => LintSeverity::Warning,
                    ConfigSeverity::Error => LintSeverity::Error,
                };
                Some(diagnostic)
            })
            .collect()
    }
}

struct DocumentedRef<'a> {
    declaration: &'a dyn DeclarationInfo,
    comment: Option<&'a CommentBlock>,
}

/// Fixes of `diagnostics` in order, skipping any that overlaps one already taken
fn select_fixes(diagnostics: &[LintDiagnostic]) -> Vec<&CodeFix> {
    let mut taken: Vec<OffsetRange> = Vec::new();
    let mut fixes = Vec::new();
    for fix in diagnostics.iter().filter_map(|d| d.fix.as_ref()) {
        let conflicts = fix.edits.iter().any(|edit| {
            taken
                .iter()
                .any(|range| conflicts(*range, edit.offset_range))
        });
        if conflicts {
            continue;
        }
        taken.extend(fix.edits.iter().map(|edit| edit.offset_range));
        fixes.push(fix);
    }
    fixes
}

const fn conflicts(a: OffsetRange, b: OffsetRange) -> bool {
    (a.start < b.end && b.start < a.end) || (a.start == b.start && a.end == b.end)
}

/// The block covering the same lines as `block` in the rewritten source
fn reread(source: &str, block: &CommentBlock) -> Option<CommentBlock> {
    let first = block.lines().first()?.line;
    let last = block.lines().last()?.line;
    CommentBlock::from_source(source, first, last, block.marker())
}
