use crate::{ConfigError, DocLintConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".doclintrc.yml",
    ".doclintrc.yaml",
    ".doclintrc.json",
    ".doclintrc.toml",
    ".doclintrc",
    "doclint.config.yml",
    "doclint.config.yaml",
    "doclint.config.json",
    "doclint.config.toml",
];

/// Find a doclint config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a doclint config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<DocLintConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        xml_header = config.xml_header,
        has_lint = config.lint.is_some(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a doclint config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<DocLintConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        "toml" => {
            tracing::trace!("Parsing as TOML");
            parse_toml(contents, path)?
        }
        "" if file_name == ".doclintrc" => {
            // .doclintrc without extension - try YAML first, then JSON
            tracing::trace!("Trying YAML then JSON for .doclintrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!("Validating config");
    validate_config(&config, path)?;

    Ok(config)
}

/// Parse YAML configuration
fn parse_yaml(contents: &str, path: &Path) -> Result<DocLintConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<DocLintConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Parse TOML configuration
fn parse_toml(contents: &str, path: &Path) -> Result<DocLintConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// Validate the loaded configuration
#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &DocLintConfig, path: &Path) -> Result<()> {
    let invalid = |message: &str| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    if let Some(files) = &config.files {
        let patterns = files.patterns();
        if patterns.is_empty() {
            return Err(invalid("'files' must list at least one pattern"));
        }
        if patterns.iter().any(|pattern| pattern.trim().is_empty()) {
            return Err(invalid("'files' has an empty pattern"));
        }
    }

    if let Some(excludes) = &config.exclude {
        if excludes.iter().any(|pattern| pattern.trim().is_empty()) {
            return Err(invalid("'exclude' has an empty pattern"));
        }
    }

    if config
        .manifest
        .as_deref()
        .is_some_and(|manifest| manifest.trim().is_empty())
    {
        return Err(invalid("'manifest' must not be empty"));
    }

    if config.copyright_needs_company() {
        tracing::warn!(
            "copyrightText contains {{companyName}} but companyName is not set; \
             the placeholder will be matched literally"
        );
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilesConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r#"
companyName: Contoso
copyrightText: "Copyright (c) {companyName}. All rights reserved."
files: "src/**/*.cs"
lint:
  extends: recommended
  rules:
    require_value: 'off'
"#;
        let file = write_temp(".yml", yaml);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Contoso"));
        assert_eq!(
            config.files,
            Some(FilesConfig::Pattern("src/**/*.cs".to_string()))
        );
        let lint = config.lint.unwrap();
        assert_eq!(lint["rules"]["require_value"], "off");
    }

    #[test]
    fn test_load_json() {
        let json = r#"{ "xmlHeader": false, "manifest": "manifest.json" }"#;
        let file = write_temp(".json", json);

        let config = load_config(file.path()).unwrap();
        assert!(!config.xml_header);
        assert_eq!(config.manifest.as_deref(), Some("manifest.json"));
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
companyName = "Contoso"
documentPrivateElements = true
files = ["src/**/*.cs", "tools/*.cs"]

[lint]
extends = "strict"
"#;
        let file = write_temp(".toml", toml);

        let config = load_config(file.path()).unwrap();
        assert!(config.document_private_elements);
        assert_eq!(config.files.unwrap().patterns().len(), 2);
        assert_eq!(config.lint.unwrap()["extends"], "strict");
    }

    #[test]
    fn test_rc_without_extension_accepts_json() {
        let config =
            load_config_from_str(r#"{ "companyName": "Contoso" }"#, Path::new(".doclintrc"))
                .unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Contoso"));
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_config_from_str("", Path::new("doclint.config.ini"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_empty_pattern() {
        let result = load_config_from_str(r#"{ "files": ["src/*.cs", " "] }"#, Path::new("c.json"));
        let error = result.unwrap_err().to_string();
        assert!(error.contains("empty pattern"), "{error}");
    }

    #[test]
    fn test_validation_empty_file_list() {
        let result = load_config_from_str(r#"{ "files": [] }"#, Path::new("c.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_empty_manifest() {
        let result = load_config_from_str(r#"{ "manifest": "" }"#, Path::new("c.json"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_missing_company_is_not_an_error() {
        let config = load_config_from_str(
            r#"{ "copyrightText": "Copyright (c) {companyName}." }"#,
            Path::new("c.json"),
        )
        .unwrap();
        assert!(config.copyright_needs_company());
    }

    #[test]
    fn test_parse_error_names_format() {
        let error = load_config_from_str("companyName: [", Path::new("c.yaml"))
            .unwrap_err()
            .to_string();
        assert!(error.contains("YAML parse error"), "{error}");
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".doclintrc.yml");
        fs::write(&config_path, "companyName: Contoso").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".doclintrc.json");
        fs::write(&config_path, "{}").unwrap();

        let sub_dir = temp_dir.path().join("src");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".doclintrc.yml"), "xmlHeader: true").unwrap();
        fs::write(temp_dir.path().join("doclint.config.json"), "{}").unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".doclintrc.yml");
    }

    #[test]
    fn test_load_missing_file() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let result = load_config(&temp_dir.path().join(".doclintrc.yml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
        Ok(())
    }
}
