use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder for the company name inside `copyrightText`
pub const COMPANY_NAME_TOKEN: &str = "{companyName}";

/// Top-level doclint configuration.
///
/// ```yaml
/// companyName: Contoso
/// copyrightText: "Copyright (c) {companyName}. All rights reserved."
/// headerDecoration: "-----"
/// files: "src/**/*.cs"
/// exclude: ["**/obj/**"]
/// manifest: doclint-manifest.json
/// lint: recommended
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocLintConfig {
    /// Expected `company` attribute of file headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Expected copyright text; may contain `{companyName}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,

    /// Header lines equal to this text are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_decoration: Option<String>,

    /// `false` turns off every file header rule
    #[serde(default = "default_true")]
    pub xml_header: bool,

    #[serde(default = "default_true")]
    pub document_exposed_elements: bool,

    #[serde(default = "default_true")]
    pub document_internal_elements: bool,

    #[serde(default)]
    pub document_private_elements: bool,

    #[serde(default)]
    pub document_private_fields: bool,

    /// Source files checked for headers (glob patterns, relative to the config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfig>,

    /// Patterns removed from `files`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Default declaration manifest, relative to the config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Lint severity configuration, interpreted by the linter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint: Option<serde_json::Value>,
}

const fn default_true() -> bool {
    true
}

impl Default for DocLintConfig {
    fn default() -> Self {
        Self {
            company_name: None,
            copyright_text: None,
            header_decoration: None,
            xml_header: true,
            document_exposed_elements: true,
            document_internal_elements: true,
            document_private_elements: false,
            document_private_fields: false,
            files: None,
            exclude: None,
            manifest: None,
            lint: None,
        }
    }
}

impl DocLintConfig {
    /// Whether `rel_path` (relative to the config directory) is selected by
    /// `files` and not removed by `exclude`.
    ///
    /// Without a `files` entry nothing is selected.
    #[must_use]
    pub fn matches_file(&self, rel_path: &Path) -> bool {
        let rel_path = rel_path.to_string_lossy();
        let Some(files) = &self.files else {
            return false;
        };

        let excluded = self.exclude.as_ref().is_some_and(|excludes| {
            excludes
                .iter()
                .any(|pattern| pattern_matches(pattern, &rel_path))
        });
        if excluded {
            tracing::trace!(path = %rel_path, "Excluded by pattern");
            return false;
        }

        files
            .patterns()
            .into_iter()
            .any(|pattern| pattern_matches(pattern, &rel_path))
    }

    /// Whether the copyright template refers to a company that is not set
    #[must_use]
    pub fn copyright_needs_company(&self) -> bool {
        self.company_name.is_none()
            && self
                .copyright_text
                .as_deref()
                .is_some_and(|text| text.contains(COMPANY_NAME_TOKEN))
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    expand_braces(pattern).iter().any(|expanded| {
        glob::Pattern::new(expanded).is_ok_and(|glob_pattern| glob_pattern.matches(path))
    })
}

/// Expand a single brace group like `src/**/*.{cs,csx}` into separate patterns
#[must_use]
pub fn expand_braces(pattern: &str) -> Vec<String> {
    if let (Some(start), Some(end)) = (pattern.find('{'), pattern.find('}')) {
        if start < end {
            let before = &pattern[..start];
            let after = &pattern[end + 1..];
            return pattern[start + 1..end]
                .split(',')
                .map(|option| format!("{before}{option}{after}"))
                .collect();
        }
    }
    vec![pattern.to_string()]
}

/// File pattern configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesConfig {
    /// Single pattern
    Pattern(String),
    /// Multiple patterns
    Patterns(Vec<String>),
}

impl FilesConfig {
    /// Get all patterns
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config: DocLintConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DocLintConfig::default());
        assert!(config.xml_header);
        assert!(config.document_internal_elements);
        assert!(!config.document_private_fields);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: DocLintConfig = serde_json::from_value(serde_json::json!({
            "companyName": "Contoso",
            "xmlHeader": false,
            "documentPrivateFields": true,
            "files": ["src/**/*.cs"],
            "lint": "recommended"
        }))
        .unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Contoso"));
        assert!(!config.xml_header);
        assert!(config.document_private_fields);
        assert_eq!(
            config.files,
            Some(FilesConfig::Patterns(vec!["src/**/*.cs".to_string()]))
        );
        assert_eq!(config.lint, Some(serde_json::json!("recommended")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<DocLintConfig, _> =
            serde_json::from_value(serde_json::json!({ "company": "Contoso" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("src/**/*.{cs,csx}"),
            vec!["src/**/*.cs", "src/**/*.csx"]
        );
        assert_eq!(expand_braces("src/*.cs"), vec!["src/*.cs"]);
    }

    #[test]
    fn test_matches_file() {
        let config = DocLintConfig {
            files: Some(FilesConfig::Pattern("src/**/*.{cs,csx}".to_string())),
            exclude: Some(vec!["**/obj/**".to_string()]),
            ..DocLintConfig::default()
        };
        assert!(config.matches_file(Path::new("src/Widgets/Widget.cs")));
        assert!(config.matches_file(Path::new("src/script.csx")));
        assert!(!config.matches_file(Path::new("src/obj/Generated.cs")));
        assert!(!config.matches_file(Path::new("tests/WidgetTests.cs")));
        assert!(!DocLintConfig::default().matches_file(Path::new("src/Widget.cs")));
    }

    #[test]
    fn test_copyright_needs_company() {
        let mut config = DocLintConfig {
            copyright_text: Some("Copyright (c) {companyName}.".to_string()),
            ..DocLintConfig::default()
        };
        assert!(config.copyright_needs_company());
        config.company_name = Some("Contoso".to_string());
        assert!(!config.copyright_needs_company());
    }
}
