use anyhow::{Context, Result};
use doclint_config::{find_config, load_config, DocLintConfig};
use doclint_linter::{AnalyzerSettings, LintConfig};
use std::path::{Path, PathBuf};

/// Common context for all CLI commands that read the config
pub struct CommandContext {
    pub config: DocLintConfig,
    /// Directory relative paths in the config are resolved against
    pub base_dir: PathBuf,
    /// Config file in use, if any was found
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Load the config given on the command line or the nearest one above
    /// the working directory. Without any config file, defaults apply.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let config_path = match config_path {
            Some(path) => Some(path),
            None => find_config(&current_dir).context("Failed to search for config")?,
        };

        let Some(config_path) = config_path else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Self {
                config: DocLintConfig::default(),
                base_dir: current_dir,
                config_path: None,
            });
        };

        let config = load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        let base_dir = config_path
            .parent()
            .map_or_else(|| current_dir.clone(), Path::to_path_buf);

        Ok(Self {
            config,
            base_dir,
            config_path: Some(config_path),
        })
    }

    /// Analyzer settings from the config
    #[must_use]
    pub fn settings(&self) -> AnalyzerSettings {
        settings_from(&self.config)
    }

    /// The `lint` section, validated against the available rules
    pub fn lint_config(&self) -> Result<LintConfig> {
        lint_config_from(&self.config)
    }
}

pub fn settings_from(config: &DocLintConfig) -> AnalyzerSettings {
    AnalyzerSettings {
        company_name: config.company_name.clone(),
        copyright_text: config.copyright_text.clone(),
        header_decoration: config.header_decoration.clone(),
        xml_header: config.xml_header,
        document_exposed_elements: config.document_exposed_elements,
        document_internal_elements: config.document_internal_elements,
        document_private_elements: config.document_private_elements,
        document_private_fields: config.document_private_fields,
    }
}

pub fn lint_config_from(config: &DocLintConfig) -> Result<LintConfig> {
    let Some(lint) = &config.lint else {
        return Ok(LintConfig::default());
    };
    let lint_config: LintConfig =
        serde_json::from_value(lint.clone()).context("Invalid 'lint' configuration")?;
    lint_config.validate().map_err(anyhow::Error::msg)?;
    Ok(lint_config)
}
