use crate::commands::common::CommandContext;
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use doclint_config::expand_braces;
use doclint_linter::{Analyzer, DocumentedDeclaration, LintDiagnostic};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A source file to lint, with the declarations the manifest lists for it
pub struct SourceFile {
    pub path: PathBuf,
    /// Path as shown in output
    pub display: String,
    pub source: String,
    /// Empty for files only selected by the config's `files` patterns
    pub declarations: Vec<DocumentedDeclaration>,
}

impl SourceFile {
    /// File name as written in a header `file` attribute
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Diagnostics of one file
pub struct FileReport {
    pub display: String,
    pub diagnostics: Vec<LintDiagnostic>,
}

/// Every file a lint run covers
pub struct LintTargets {
    pub files: Vec<SourceFile>,
}

impl LintTargets {
    /// Collect the manifest files and the config's `files` patterns
    #[tracing::instrument(skip(ctx), fields(base = %ctx.base_dir.display()))]
    pub fn load(ctx: &CommandContext, manifest: Option<&Path>) -> Result<Self> {
        let manifest_path = manifest
            .map(Path::to_path_buf)
            .or_else(|| ctx.config.manifest.as_ref().map(|m| ctx.base_dir.join(m)));

        let mut files = Vec::new();
        let mut seen = HashSet::new();

        if let Some(manifest_path) = manifest_path {
            let contents = std::fs::read_to_string(&manifest_path).with_context(|| {
                format!("Failed to read manifest {}", manifest_path.display())
            })?;
            let manifest = Manifest::parse(&contents)
                .with_context(|| format!("Invalid manifest {}", manifest_path.display()))?;
            let manifest_dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));

            for entry in &manifest.files {
                let path = manifest_dir.join(&entry.path);
                let source = read_source(&path)?;
                let declarations = entry
                    .documented(&source)
                    .with_context(|| format!("Invalid manifest entry for {}", entry.path))?;
                seen.insert(path.clone());
                files.push(SourceFile {
                    display: display_path(&path),
                    path,
                    source,
                    declarations,
                });
            }
            tracing::debug!(files = files.len(), "Loaded manifest");
        }

        for path in Self::header_only_paths(ctx)? {
            if seen.insert(path.clone()) {
                let source = read_source(&path)?;
                files.push(SourceFile {
                    display: display_path(&path),
                    path,
                    source,
                    declarations: Vec::new(),
                });
            }
        }

        files.sort_by(|a, b| a.display.cmp(&b.display));
        tracing::info!(files = files.len(), "Lint targets loaded");
        Ok(Self { files })
    }

    /// Files matched by the config's `files` patterns
    fn header_only_paths(ctx: &CommandContext) -> Result<Vec<PathBuf>> {
        let Some(files) = &ctx.config.files else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        for pattern in files.patterns() {
            for expanded in expand_braces(pattern) {
                let full_pattern = ctx.base_dir.join(&expanded).display().to_string();
                for entry in glob::glob(&full_pattern)
                    .with_context(|| format!("Invalid glob pattern: {full_pattern}"))?
                {
                    let path = entry.context("Glob error")?;
                    let selected = path.is_file()
                        && path
                            .strip_prefix(&ctx.base_dir)
                            .is_ok_and(|rel| ctx.config.matches_file(rel));
                    if selected {
                        paths.push(path);
                    }
                }
            }
        }
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// Run the analyzer over every file in parallel
    #[tracing::instrument(skip_all, fields(files = self.files.len()))]
    pub fn analyze(&self, analyzer: &Analyzer) -> Vec<FileReport> {
        self.files
            .par_iter()
            .map(|file| FileReport {
                display: file.display.clone(),
                diagnostics: analyzer.analyze_file(
                    &file.source,
                    file.file_name(),
                    &file.declarations,
                ),
            })
            .collect()
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// `path` relative to the working directory when it lies below it
fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclint_config::{DocLintConfig, FilesConfig};
    use std::fs;

    const WIDGET: &str = "/// <summary>A widget.</summary>\npublic class Widget { }\n";

    fn context(dir: &Path, config: DocLintConfig) -> CommandContext {
        CommandContext {
            config,
            base_dir: dir.to_path_buf(),
            config_path: None,
        }
    }

    #[test]
    fn test_load_manifest_and_patterns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("Widget.cs"), WIDGET).unwrap();
        fs::write(src.join("Other.cs"), "namespace Sample { }\n").unwrap();
        fs::write(
            temp_dir.path().join("manifest.json"),
            r#"{ "files": [ { "path": "src/Widget.cs", "declarations": [
                { "kind": "type", "typeKeyword": "class", "name": "Widget",
                  "nameLocation": { "line": 2, "column": 14 },
                  "comment": { "startLine": 1, "endLine": 1 } } ] } ] }"#,
        )
        .unwrap();

        let ctx = context(
            temp_dir.path(),
            DocLintConfig {
                files: Some(FilesConfig::Pattern("src/**/*.cs".to_string())),
                manifest: Some("manifest.json".to_string()),
                ..DocLintConfig::default()
            },
        );
        let targets = LintTargets::load(&ctx, None).unwrap();

        assert_eq!(targets.files.len(), 2);
        let widget = targets
            .files
            .iter()
            .find(|file| file.file_name() == "Widget.cs")
            .unwrap();
        assert_eq!(widget.declarations.len(), 1);
        let other = targets
            .files
            .iter()
            .find(|file| file.file_name() == "Other.cs")
            .unwrap();
        assert!(other.declarations.is_empty());
    }

    #[test]
    fn test_missing_manifest_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = context(temp_dir.path(), DocLintConfig::default());
        let error = LintTargets::load(&ctx, Some(&temp_dir.path().join("nope.json")))
            .err()
            .unwrap();
        assert_eq!(
            crate::exit_code::ExitCode::for_error(&error),
            crate::exit_code::ExitCode::IoError
        );
    }

    #[test]
    fn test_bad_manifest_is_manifest_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest = temp_dir.path().join("manifest.json");
        fs::write(&manifest, "{ \"files\": 3 }").unwrap();
        let ctx = context(temp_dir.path(), DocLintConfig::default());
        let error = LintTargets::load(&ctx, Some(&manifest)).err().unwrap();
        assert_eq!(
            crate::exit_code::ExitCode::for_error(&error),
            crate::exit_code::ExitCode::ManifestError
        );
    }

    #[test]
    fn test_analyze_reports_per_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("Plain.cs"), "namespace Sample { }\n").unwrap();
        let ctx = context(
            temp_dir.path(),
            DocLintConfig {
                files: Some(FilesConfig::Pattern("*.cs".to_string())),
                ..DocLintConfig::default()
            },
        );
        let targets = LintTargets::load(&ctx, None).unwrap();
        let reports = targets.analyze(&Analyzer::new(ctx.settings()));

        assert_eq!(reports.len(), 1);
        let rules: Vec<&str> = reports[0]
            .diagnostics
            .iter()
            .map(|d| d.rule.as_str())
            .collect();
        assert_eq!(rules, vec!["file_header_missing"]);
    }
}
