use crate::analysis::LintTargets;
use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::Colorize;
use doclint_linter::{Analyzer, FixOutcome, LintDiagnostic};
use rayon::prelude::*;
use std::path::PathBuf;

/// Fixes computed for one file
pub struct FileFix {
    pub path: PathBuf,
    pub display: String,
    /// Fixable diagnostics of the first pass
    pub diagnostics: Vec<LintDiagnostic>,
    /// Result of running every pass
    pub outcome: FixOutcome,
}

/// Run the fix loop over every file; files without any fix are left out
#[tracing::instrument(skip_all, fields(files = targets.files.len()))]
pub fn collect_fixes(targets: &LintTargets, analyzer: &Analyzer) -> Result<Vec<FileFix>> {
    let fixes: Vec<Result<Option<FileFix>>> = targets
        .files
        .par_iter()
        .map(|file| {
            let diagnostics: Vec<LintDiagnostic> = analyzer
                .analyze_file(&file.source, file.file_name(), &file.declarations)
                .into_iter()
                .filter(LintDiagnostic::has_fix)
                .collect();
            if diagnostics.is_empty() {
                return Ok(None);
            }
            let outcome = analyzer
                .fix_source(&file.source, file.file_name(), &file.declarations)
                .with_context(|| format!("Failed to fix {}", file.display))?;
            Ok(outcome.changed().then(|| FileFix {
                path: file.path.clone(),
                display: file.display.clone(),
                diagnostics,
                outcome,
            }))
        })
        .collect();

    let mut collected = Vec::new();
    for fix in fixes {
        collected.extend(fix?);
    }
    Ok(collected)
}

/// Display what would be fixed in dry-run mode
pub fn display_dry_run(fixes: &[FileFix], format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            println!();
            println!("{}", "Dry run - would fix the following issues:".cyan());
            println!();

            for file_fix in fixes {
                println!("{}:", file_fix.display.bold());
                for diag in &file_fix.diagnostics {
                    if let Some(fix) = &diag.fix {
                        println!(
                            "  {} {}:{} {} ({})",
                            "→".green(),
                            diag.location.line,
                            diag.location.column,
                            fix.label,
                            diag.rule.dimmed()
                        );
                    }
                }
                println!();
            }
        }
        OutputFormat::Json | OutputFormat::Github => {
            for file_fix in fixes {
                for diag in &file_fix.diagnostics {
                    let Some(fix) = &diag.fix else { continue };
                    println!(
                        "{}",
                        serde_json::json!({
                            "action": "would_fix",
                            "file": file_fix.display,
                            "rule": diag.rule,
                            "fix": fix.label,
                            "line": diag.location.line,
                            "column": diag.location.column,
                        })
                    );
                }
            }
        }
    }
}

/// Write fixed sources back to disk
pub fn write_fixes(fixes: &[FileFix], format: OutputFormat) -> Result<()> {
    for file_fix in fixes {
        std::fs::write(&file_fix.path, &file_fix.outcome.source)
            .with_context(|| format!("Failed to write {}", file_fix.path.display()))?;

        match format {
            OutputFormat::Human => {
                println!(
                    "{} {} ({})",
                    "✓".green(),
                    file_fix.display,
                    format!("{} fix(es)", file_fix.outcome.applied).dimmed()
                );
            }
            OutputFormat::Json | OutputFormat::Github => {
                println!(
                    "{}",
                    serde_json::json!({
                        "action": "fixed",
                        "file": file_fix.display,
                        "fixes": file_fix.outcome.applied,
                    })
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SourceFile;
    use doclint_linter::{
        AnalyzerSettings, CommentBlock, CommentMarker, DeclarationDescriptor, DeclarationKind,
        DocumentedDeclaration, SourcePosition, TypeKeyword,
    };
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "/// <summary><placeholder>A widget.</placeholder></summary>\npublic class Widget { }\n";

    fn targets(path: PathBuf) -> LintTargets {
        let comment = CommentBlock::from_source(SOURCE, 1, 1, CommentMarker::Documentation);
        let widget = DeclarationDescriptor::new(DeclarationKind::Type(TypeKeyword::Class), "Widget")
            .with_name_location(SourcePosition::new(2, 14, 73));
        LintTargets {
            files: vec![SourceFile {
                display: "Widget.cs".to_string(),
                path,
                source: SOURCE.to_string(),
                declarations: vec![DocumentedDeclaration::new(widget, comment)],
            }],
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalyzerSettings {
            xml_header: false,
            ..AnalyzerSettings::default()
        })
    }

    #[test]
    fn test_collect_and_write_fixes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("Widget.cs");
        std::fs::write(&path, SOURCE).unwrap();

        let fixes = collect_fixes(&targets(path.clone()), &analyzer()).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].diagnostics.len(), 1);
        assert_eq!(fixes[0].diagnostics[0].rule, "no_placeholder_element");

        write_fixes(&fixes, OutputFormat::Json).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "/// <summary>A widget.</summary>\npublic class Widget { }\n"
        );
    }

    #[test]
    fn test_nothing_to_fix() {
        let mut targets = targets(PathBuf::from("Widget.cs"));
        targets.files[0].source = "/// <summary>A widget.</summary>\npublic class Widget { }\n".to_string();
        targets.files[0].declarations[0].comment =
            CommentBlock::from_source(&targets.files[0].source, 1, 1, CommentMarker::Documentation);

        let fixes = collect_fixes(&targets, &analyzer()).unwrap();
        assert!(fixes.is_empty());
    }
}
