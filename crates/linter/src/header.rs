//! File header checks.
//!
//! A file is expected to open with a `//` comment holding a `<copyright>`
//! element and a `<summary>`:
//!
//! ```text
//! // <copyright file="Widget.cs" company="Contoso">
//! //   Copyright (c) Contoso. All rights reserved.
//! // </copyright>
//! // <summary>Defines the widget.</summary>
//! ```
//!
//! The header is read into a [`HeaderState`] first; the checks then only run
//! for the states that can carry the corresponding information.

use crate::context::{FileContext, ParsedComment};
use crate::diagnostics::{LintDiagnostic, LintSeverity};
use crate::settings::AnalyzerSettings;
use crate::traits::{FileLintRule, LintRule};
use doclint_syntax::{collapse_whitespace, CommentBlock, CommentMarker, Element, SourcePosition};

pub const FILE_HEADER_MISSING: &str = "file_header_missing";
pub const FILE_HEADER_INVALID_MARKUP: &str = "file_header_invalid_markup";
pub const FILE_HEADER_COPYRIGHT_MISSING: &str = "file_header_copyright_missing";
pub const FILE_HEADER_FILE_ATTRIBUTE_MISSING: &str = "file_header_file_attribute_missing";
pub const FILE_HEADER_FILE_ATTRIBUTE_MISMATCH: &str = "file_header_file_attribute_mismatch";
pub const FILE_HEADER_COMPANY_MISSING: &str = "file_header_company_missing";
pub const FILE_HEADER_COMPANY_MISMATCH: &str = "file_header_company_mismatch";
pub const FILE_HEADER_COPYRIGHT_TEXT_MISSING: &str = "file_header_copyright_text_missing";
pub const FILE_HEADER_COPYRIGHT_TEXT_MISMATCH: &str = "file_header_copyright_text_mismatch";
pub const FILE_HEADER_SUMMARY_MISSING: &str = "file_header_summary_missing";

/// Every rule id the header checks report under
pub const DIAGNOSTIC_IDS: &[&str] = &[
    FILE_HEADER_MISSING,
    FILE_HEADER_INVALID_MARKUP,
    FILE_HEADER_COPYRIGHT_MISSING,
    FILE_HEADER_FILE_ATTRIBUTE_MISSING,
    FILE_HEADER_FILE_ATTRIBUTE_MISMATCH,
    FILE_HEADER_COMPANY_MISSING,
    FILE_HEADER_COMPANY_MISMATCH,
    FILE_HEADER_COPYRIGHT_TEXT_MISSING,
    FILE_HEADER_COPYRIGHT_TEXT_MISMATCH,
    FILE_HEADER_SUMMARY_MISSING,
];

/// What the leading comment of a file turned out to be
#[derive(Debug, Clone)]
pub enum HeaderState {
    /// No leading `//` comment (or only decoration lines)
    NoHeader,
    /// The header markup is malformed
    Unparsable {
        message: String,
        position: SourcePosition,
    },
    /// Well-formed, but without a top-level `<copyright>` element
    NoCopyright { position: SourcePosition },
    /// A header with a `<copyright>` element
    Copyright { header: ParsedComment },
}

impl HeaderState {
    /// Read the header of `source`, ignoring configured decoration lines
    #[must_use]
    pub fn read(source: &str, settings: &AnalyzerSettings) -> Self {
        let Some(block) = CommentBlock::leading_line_comments(source) else {
            return Self::NoHeader;
        };
        let block = block.without_lines(|line| settings.is_decoration(line.content(CommentMarker::Line)));
        let Some(position) = block.first_content_position() else {
            return Self::NoHeader;
        };

        let header = ParsedComment::new(block);
        match header.markup() {
            Err(error) => Self::Unparsable {
                message: error.message.clone(),
                position: header.position(error.offset),
            },
            Ok(markup) if markup.element("copyright").is_none() => Self::NoCopyright { position },
            Ok(_) => Self::Copyright { header },
        }
    }
}

/// Run the header checks for one file
#[tracing::instrument(skip(ctx), fields(file = ctx.file_name))]
pub fn check_file_header(ctx: &FileContext<'_>) -> Vec<LintDiagnostic> {
    let settings = ctx.settings;
    if !settings.xml_header {
        return Vec::new();
    }

    match HeaderState::read(ctx.source, settings) {
        HeaderState::NoHeader => vec![LintDiagnostic::warning(
            SourcePosition::default(),
            "The file must begin with a header containing a <copyright> element",
            FILE_HEADER_MISSING,
        )],
        HeaderState::Unparsable { message, position } => vec![LintDiagnostic::warning(
            position,
            format!("The file header is not well-formed: {message}"),
            FILE_HEADER_INVALID_MARKUP,
        )],
        HeaderState::NoCopyright { position } => vec![LintDiagnostic::warning(
            position,
            "The file header must contain a <copyright> element",
            FILE_HEADER_COPYRIGHT_MISSING,
        )],
        HeaderState::Copyright { header } => check_copyright_header(ctx, &header),
    }
}

fn check_copyright_header(ctx: &FileContext<'_>, header: &ParsedComment) -> Vec<LintDiagnostic> {
    let Ok(markup) = header.markup() else {
        return Vec::new();
    };
    let Some(copyright) = markup.element("copyright") else {
        return Vec::new();
    };
    let start = header
        .block()
        .first_content_position()
        .unwrap_or_default();

    let mut diagnostics = Vec::new();
    check_file_attribute(ctx, header, copyright, start, &mut diagnostics);
    check_company(ctx, header, copyright, start, &mut diagnostics);
    check_copyright_text(ctx, copyright, start, &mut diagnostics);

    let has_summary = markup
        .element("summary")
        .is_some_and(|summary| !collapse_whitespace(&summary.inner_text()).is_empty());
    if !has_summary {
        diagnostics.push(LintDiagnostic::warning(
            start,
            "The file header must have a <summary> describing the file",
            FILE_HEADER_SUMMARY_MISSING,
        ));
    }

    diagnostics
}

fn check_file_attribute(
    ctx: &FileContext<'_>,
    header: &ParsedComment,
    copyright: &Element,
    start: SourcePosition,
    diagnostics: &mut Vec<LintDiagnostic>,
) {
    match copyright.attribute("file") {
        Some(attr) if !attr.value.trim().is_empty() => {
            if attr.value != ctx.file_name {
                diagnostics.push(LintDiagnostic::warning(
                    header.position(attr.range.start),
                    format!(
                        "The file attribute '{}' does not match the file name '{}'",
                        attr.value, ctx.file_name
                    ),
                    FILE_HEADER_FILE_ATTRIBUTE_MISMATCH,
                ));
            }
        }
        _ => diagnostics.push(LintDiagnostic::warning(
            start,
            "The <copyright> element must have a file attribute",
            FILE_HEADER_FILE_ATTRIBUTE_MISSING,
        )),
    }
}

fn check_company(
    ctx: &FileContext<'_>,
    header: &ParsedComment,
    copyright: &Element,
    start: SourcePosition,
    diagnostics: &mut Vec<LintDiagnostic>,
) {
    let Some(attr) = copyright
        .attribute("company")
        .filter(|attr| !attr.value.trim().is_empty())
    else {
        diagnostics.push(LintDiagnostic::warning(
            start,
            "The <copyright> element must have a company attribute",
            FILE_HEADER_COMPANY_MISSING,
        ));
        return;
    };
    let Some(expected) = ctx.settings.company_name.as_deref() else {
        return;
    };
    if attr.value == expected {
        return;
    }
    let message = if attr.value.to_lowercase() == expected.to_lowercase() {
        format!(
            "The company attribute '{}' differs only in case from the configured company '{expected}'",
            attr.value
        )
    } else {
        format!(
            "The company attribute '{}' does not match the configured company '{expected}'",
            attr.value
        )
    };
    diagnostics.push(LintDiagnostic::warning(
        header.position(attr.range.start),
        message,
        FILE_HEADER_COMPANY_MISMATCH,
    ));
}

fn check_copyright_text(
    ctx: &FileContext<'_>,
    copyright: &Element,
    start: SourcePosition,
    diagnostics: &mut Vec<LintDiagnostic>,
) {
    let text = collapse_whitespace(&copyright.inner_text());
    if text.is_empty() {
        diagnostics.push(LintDiagnostic::warning(
            start,
            "The <copyright> element must contain copyright text",
            FILE_HEADER_COPYRIGHT_TEXT_MISSING,
        ));
        return;
    }
    let Some(expected) = ctx.settings.expected_copyright() else {
        return;
    };
    if text != collapse_whitespace(&expected) {
        diagnostics.push(LintDiagnostic::warning(
            start,
            format!("The copyright text must be '{expected}'"),
            FILE_HEADER_COPYRIGHT_TEXT_MISMATCH,
        ));
    }
}

/// Lint rule wrapping the file header checks
///
/// It reports under one id per violation category (see [`DIAGNOSTIC_IDS`])
/// so each category can be configured on its own.
pub struct FileHeaderRuleImpl;

impl LintRule for FileHeaderRuleImpl {
    fn name(&self) -> &'static str {
        "file_header"
    }

    fn description(&self) -> &'static str {
        "Requires a file header with copyright, company, file name and summary"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn diagnostic_ids(&self) -> Vec<&'static str> {
        DIAGNOSTIC_IDS.to_vec()
    }
}

impl FileLintRule for FileHeaderRuleImpl {
    fn check(
        &self,
        ctx: &FileContext<'_>,
        _options: Option<&serde_json::Value>,
    ) -> Vec<LintDiagnostic> {
        check_file_header(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclint_test_utils::format_diagnostics;

    const GOOD: &str = "// <copyright file=\"Widget.cs\" company=\"Contoso\">\n//   Copyright (c) Contoso. All rights reserved.\n// </copyright>\n// <summary>Defines the widget.</summary>\n\nnamespace Sample { }\n";

    fn settings() -> AnalyzerSettings {
        AnalyzerSettings {
            company_name: Some("Contoso".to_string()),
            copyright_text: Some("Copyright (c) {companyName}. All rights reserved.".to_string()),
            ..AnalyzerSettings::default()
        }
    }

    fn run(source: &str, settings: &AnalyzerSettings) -> Vec<LintDiagnostic> {
        check_file_header(&FileContext {
            file_name: "Widget.cs",
            source,
            settings,
        })
    }

    fn ids(diagnostics: &[LintDiagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.rule.as_str()).collect()
    }

    #[test]
    fn test_valid_header() {
        assert!(run(GOOD, &settings()).is_empty());
    }

    #[test]
    fn test_missing_header() {
        let diagnostics = run("namespace Sample { }\n", &settings());
        assert_eq!(ids(&diagnostics), vec![FILE_HEADER_MISSING]);
        assert_eq!(diagnostics[0].location, SourcePosition::default());
    }

    #[test]
    fn test_documentation_comment_is_not_a_header() {
        let diagnostics = run("/// <summary>Doc.</summary>\nclass C { }\n", &settings());
        assert_eq!(ids(&diagnostics), vec![FILE_HEADER_MISSING]);
    }

    #[test]
    fn test_disabled() {
        let settings = AnalyzerSettings {
            xml_header: false,
            ..settings()
        };
        assert!(run("class C { }", &settings).is_empty());
    }

    #[test]
    fn test_invalid_markup() {
        let diagnostics = run("// <copyright file=\"Widget.cs\">\n// text\nclass C { }\n", &settings());
        assert_eq!(ids(&diagnostics), vec![FILE_HEADER_INVALID_MARKUP]);
        assert_eq!(
            diagnostics[0].message,
            "The file header is not well-formed: The 'copyright' start tag has no matching end tag."
        );
        assert_eq!(
            (diagnostics[0].location.line, diagnostics[0].location.column),
            (1, 4)
        );
    }

    #[test]
    fn test_plain_comment_has_no_copyright() {
        let diagnostics = run("\n\n// Just a note.\nclass C { }\n", &settings());
        assert_eq!(ids(&diagnostics), vec![FILE_HEADER_COPYRIGHT_MISSING]);
        assert_eq!(
            (diagnostics[0].location.line, diagnostics[0].location.column),
            (3, 4)
        );
    }

    #[test]
    fn test_attribute_and_text_checks() {
        let source = "// <copyright file=\"Other.cs\" company=\"contoso\">\n//   Copyright Someone Else.\n// </copyright>\nclass C { }\n";
        let diagnostics = run(source, &settings());
        insta::assert_snapshot!(format_diagnostics(&diagnostics));
    }

    #[test]
    fn test_missing_attributes_and_text() {
        let source = "// <copyright>\n// </copyright>\n// <summary>Widget.</summary>\n";
        let diagnostics = run(source, &settings());
        assert_eq!(
            ids(&diagnostics),
            vec![
                FILE_HEADER_FILE_ATTRIBUTE_MISSING,
                FILE_HEADER_COMPANY_MISSING,
                FILE_HEADER_COPYRIGHT_TEXT_MISSING,
            ]
        );
    }

    #[test]
    fn test_company_not_matched_when_unset() {
        let source = GOOD.replace("company=\"Contoso\"", "company=\"Fabrikam\"");
        assert!(run(&source, &AnalyzerSettings::default()).is_empty());
    }

    #[test]
    fn test_copyright_whitespace_is_collapsed() {
        let source = GOOD.replace(
            "//   Copyright (c) Contoso. All rights reserved.",
            "// Copyright (c)   Contoso.\n//   All rights reserved.",
        );
        assert!(run(&source, &settings()).is_empty());
    }

    #[test]
    fn test_decoration_lines_are_ignored() {
        let settings = AnalyzerSettings {
            header_decoration: Some("-----------".to_string()),
            ..settings()
        };
        let source = format!("// -----------\n{GOOD}");
        let source = source.replace("// </copyright>", "// -----------\n// </copyright>");
        assert!(run(&source, &settings).is_empty());

        // Without the setting the decoration becomes part of the copyright text
        let diagnostics = run(&source, &self::settings());
        assert_eq!(ids(&diagnostics), vec![FILE_HEADER_COPYRIGHT_TEXT_MISMATCH]);
    }
}
