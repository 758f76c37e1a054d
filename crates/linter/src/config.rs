use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity level for a lint rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum LintSeverity {
    Off,
    Warn,
    Error,
}

/// Preset names accepted by `extends` / the `lint` shorthand
pub const PRESETS: &[&str] = &["recommended", "strict"];

/// Configuration for a single lint rule
///
/// Supports multiple formats:
/// ```yaml
/// # Simple severity
/// rule_name: warn
///
/// # Object style with options
/// rule_name:
///   severity: warn
///   options:
///     templates: ["TODO: describe {name}."]
///
/// # ESLint-style array: [severity, options]
/// rule_name: [warn, { templates: ["TODO: describe {name}."] }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LintRuleConfig {
    /// Just a severity level (simple case)
    Severity(LintSeverity),

    /// Detailed config with options
    Detailed {
        severity: LintSeverity,
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<serde_json::Value>,
    },
}

impl LintRuleConfig {
    /// Get the severity for this rule configuration
    #[must_use]
    pub fn severity(&self) -> LintSeverity {
        match self {
            Self::Severity(s) | Self::Detailed { severity: s, .. } => *s,
        }
    }

    /// Get the options for this rule configuration (if any)
    #[must_use]
    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Severity(_) => None,
            Self::Detailed { options, .. } => options.as_ref(),
        }
    }
}

/// Custom deserializer for `LintRuleConfig` to handle ESLint-style array syntax
impl<'de> Deserialize<'de> for LintRuleConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, SeqAccess, Visitor};

        struct LintRuleConfigVisitor;

        impl<'de> Visitor<'de> for LintRuleConfigVisitor {
            type Value = LintRuleConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str(
                    "a severity string ('off', 'warn', 'error'), \
                     an array [severity, options], \
                     or an object { severity, options }",
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let severity = match value {
                    "off" => LintSeverity::Off,
                    "warn" => LintSeverity::Warn,
                    "error" => LintSeverity::Error,
                    _ => return Err(E::custom(format!("unknown severity: {value}"))),
                };
                Ok(LintRuleConfig::Severity(severity))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                // ESLint-style: [severity, options]
                let severity: LintSeverity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &"array with severity"))?;

                let options: Option<serde_json::Value> = seq.next_element()?;

                Ok(LintRuleConfig::Detailed { severity, options })
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Object style: { severity, options }
                #[derive(Deserialize)]
                struct DetailedConfig {
                    severity: LintSeverity,
                    #[serde(default)]
                    options: Option<serde_json::Value>,
                }

                let config =
                    DetailedConfig::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(LintRuleConfig::Detailed {
                    severity: config.severity,
                    options: config.options,
                })
            }
        }

        deserializer.deserialize_any(LintRuleConfigVisitor)
    }
}

/// Extends configuration - can be a single preset or multiple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum ExtendsConfig {
    /// Single preset: `extends: recommended` or `lint: recommended`
    Single(String),
    /// Multiple presets: `extends: [recommended, strict]`
    Multiple(Vec<String>),
}

impl ExtendsConfig {
    /// Get all presets as a vector (normalizes single to vec)
    #[must_use]
    pub fn presets(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// Full lint configuration struct with extends and rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FullLintConfig {
    /// Presets to extend (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<ExtendsConfig>,

    /// Rule configurations (optional)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub rules: HashMap<String, LintRuleConfig>,
}

/// Overall lint configuration
///
/// Supports multiple formats:
///
/// ```yaml
/// # Happy path - every rule as a warning
/// lint: recommended
///
/// # Every rule as an error
/// lint: strict
///
/// # Fine-grained rules only (no presets)
/// lint:
///   rules:
///     require_summary: error
///     require_value: warn
///
/// # Preset with overrides
/// lint:
///   extends: recommended
///   rules:
///     file_header_missing: off
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum LintConfig {
    /// Preset(s): `lint: recommended` or `lint: [recommended, strict]`
    Preset(ExtendsConfig),

    /// Full configuration with optional extends and rules
    Full(FullLintConfig),
}

/// With no configuration at all, every rule runs as a warning.
impl Default for LintConfig {
    fn default() -> Self {
        Self::recommended()
    }
}

impl LintConfig {
    /// Validate the lint configuration against available rules
    ///
    /// Returns an error if any configured rule or preset name is invalid, or
    /// if a rule with a fixed severity is configured. The error message
    /// includes suggestions and the list of valid names.
    pub fn validate(&self) -> Result<(), String> {
        let (extends, rules) = match self {
            Self::Preset(presets) => (Some(presets), None),
            Self::Full(FullLintConfig { extends, rules }) => (extends.as_ref(), Some(rules)),
        };

        if let Some(ext) = extends {
            for preset in ext.presets() {
                if !PRESETS.contains(&preset) {
                    return Err(format!(
                        "Invalid preset name: '{preset}'{}\n\nValid presets are:\n  - {}",
                        suggestion(preset, PRESETS),
                        PRESETS.join("\n  - ")
                    ));
                }
            }
        }
        let Some(rules) = rules else {
            return Ok(());
        };

        let fixed: Vec<&str> = crate::registry::fixed_severity_rule_names();
        let mut fixed_configured: Vec<&str> = rules
            .keys()
            .map(String::as_str)
            .filter(|rule| fixed.contains(rule))
            .collect();
        if !fixed_configured.is_empty() {
            fixed_configured.sort_unstable();
            return Err(format!(
                "Rule(s) with a fixed severity cannot be configured: {}",
                fixed_configured.join(", ")
            ));
        }

        let valid_rules = crate::registry::all_rule_names();
        let mut invalid_rules: Vec<&str> = rules
            .keys()
            .map(String::as_str)
            .filter(|rule| !valid_rules.contains(rule))
            .collect();

        if invalid_rules.is_empty() {
            Ok(())
        } else {
            use std::fmt::Write;
            invalid_rules.sort_unstable();
            let mut error = format!(
                "Invalid lint rule name(s): {}\n",
                invalid_rules.join(", ")
            );
            for rule in &invalid_rules {
                let hint = suggestion(rule, &valid_rules);
                if !hint.is_empty() {
                    let _ = writeln!(error, "  '{rule}'{hint}");
                }
            }
            error.push_str("\nValid rule names are:\n");
            for rule in &valid_rules {
                let _ = writeln!(error, "  - {rule}");
            }
            Err(error)
        }
    }

    /// Get the severity for a rule, considering presets and overrides
    #[must_use]
    pub fn get_severity(&self, rule_name: &str) -> Option<LintSeverity> {
        match self {
            Self::Preset(presets) => Self::severity_from_presets(presets, rule_name),
            Self::Full(FullLintConfig { extends, rules }) => {
                // Start with preset severities (if any)
                let preset_severity = extends
                    .as_ref()
                    .and_then(|ext| Self::severity_from_presets(ext, rule_name));

                // Check for explicit rule override
                rules
                    .get(rule_name)
                    .map(LintRuleConfig::severity)
                    .or(preset_severity)
            }
        }
    }

    /// Get the options for a rule (if configured)
    ///
    /// Returns `None` if the rule is not configured or has no options.
    #[must_use]
    pub fn get_options(&self, rule_name: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Preset(_) => None,
            Self::Full(FullLintConfig { rules, .. }) => {
                rules.get(rule_name).and_then(LintRuleConfig::options)
            }
        }
    }

    /// Get severity from a list of presets (later presets override earlier)
    fn severity_from_presets(presets: &ExtendsConfig, rule_name: &str) -> Option<LintSeverity> {
        let mut severity = None;
        for preset in presets.presets() {
            let preset_severity = match preset {
                "recommended" => Self::recommended_severity(rule_name),
                "strict" => Self::strict_severity(rule_name),
                _ => None,
            };
            if let Some(s) = preset_severity {
                severity = Some(s);
            }
        }
        severity
    }

    /// Check if a rule is enabled (not Off and not None)
    #[must_use]
    pub fn is_enabled(&self, rule_name: &str) -> bool {
        matches!(
            self.get_severity(rule_name),
            Some(LintSeverity::Warn | LintSeverity::Error)
        )
    }

    /// Every configurable rule is a warning in the recommended preset
    fn recommended_severity(rule_name: &str) -> Option<LintSeverity> {
        crate::registry::all_rule_names()
            .contains(&rule_name)
            .then_some(LintSeverity::Warn)
    }

    /// Every configurable rule is an error in the strict preset
    fn strict_severity(rule_name: &str) -> Option<LintSeverity> {
        crate::registry::all_rule_names()
            .contains(&rule_name)
            .then_some(LintSeverity::Error)
    }

    /// Get recommended configuration
    #[must_use]
    pub fn recommended() -> Self {
        Self::Preset(ExtendsConfig::Single("recommended".to_string()))
    }

    /// Get strict configuration
    #[must_use]
    pub fn strict() -> Self {
        Self::Preset(ExtendsConfig::Single("strict".to_string()))
    }
}

/// " (did you mean 'x'?)" for the closest candidate, or an empty string
fn suggestion(name: &str, candidates: &[&str]) -> String {
    candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(name, candidate), *candidate))
        .filter(|(score, _)| *score > 0.8)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| format!(" (did you mean '{candidate}'?)"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(value: serde_json::Value) -> LintConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_simple_preset() {
        let config = from_json(serde_json::json!("recommended"));
        assert!(matches!(
            config,
            LintConfig::Preset(ExtendsConfig::Single(ref s)) if s == "recommended"
        ));
        assert!(config.is_enabled("require_summary"));
        assert_eq!(
            config.get_severity("file_header_missing"),
            Some(LintSeverity::Warn)
        );
        assert!(!config.is_enabled("not_a_rule"));
    }

    #[test]
    fn test_preset_list_later_wins() {
        let config = from_json(serde_json::json!(["recommended", "strict"]));
        assert_eq!(
            config.get_severity("require_summary"),
            Some(LintSeverity::Error)
        );
    }

    #[test]
    fn test_yaml_rules_only() {
        let yaml = "
rules:
  require_summary: error
  require_value: 'warn'
";
        let config: LintConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(
            config.get_severity("require_summary"),
            Some(LintSeverity::Error)
        );
        assert_eq!(
            config.get_severity("require_value"),
            Some(LintSeverity::Warn)
        );
        assert_eq!(config.get_severity("require_param"), None);
    }

    #[test]
    fn test_extends_with_override() {
        let config = from_json(serde_json::json!({
            "extends": "recommended",
            "rules": {
                "require_summary": "error",
                "file_header_missing": "off"
            }
        }));
        assert_eq!(
            config.get_severity("require_summary"),
            Some(LintSeverity::Error)
        );
        assert!(!config.is_enabled("file_header_missing"));
        assert!(config.is_enabled("require_value"));
    }

    #[test]
    fn test_default_is_recommended() {
        let config = LintConfig::default();
        assert!(config.is_enabled("require_documentation"));
        assert!(config.is_enabled("no_placeholder_element"));
    }

    #[test]
    fn test_fixed_severity_rule_not_in_presets() {
        assert_eq!(LintConfig::recommended().get_severity("valid_markup"), None);
    }

    #[test]
    fn test_validate_valid() {
        assert!(LintConfig::recommended().validate().is_ok());
        assert!(LintConfig::strict().validate().is_ok());
        let config = from_json(serde_json::json!({
            "rules": { "no_default_summary": ["warn", { "templates": ["x"] }] }
        }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_preset() {
        let config = from_json(serde_json::json!("recomended"));
        let error = config.validate().unwrap_err();
        assert!(error.contains("did you mean 'recommended'?"));
    }

    #[test]
    fn test_validate_invalid_rule() {
        let config = from_json(serde_json::json!({ "rules": { "require_sumary": "error" } }));
        let error = config.validate().unwrap_err();
        assert!(error.contains("require_sumary"));
        assert!(error.contains("did you mean 'require_summary'?"));
        assert!(error.contains("  - use_child_blocks_consistently"));
    }

    #[test]
    fn test_validate_rejects_fixed_severity_rule() {
        let config = from_json(serde_json::json!({ "rules": { "valid_markup": "error" } }));
        let error = config.validate().unwrap_err();
        assert!(error.contains("fixed severity"));
        assert!(error.contains("valid_markup"));
    }

    #[test]
    fn test_eslint_array_style() {
        let config = from_json(serde_json::json!({
            "rules": { "no_default_summary": ["warn", { "templates": ["TODO {name}", "Stub."] }] }
        }));
        assert_eq!(
            config.get_severity("no_default_summary"),
            Some(LintSeverity::Warn)
        );
        let options = config.get_options("no_default_summary").unwrap();
        let templates = options.get("templates").unwrap().as_array().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].as_str().unwrap(), "Stub.");
    }

    #[test]
    fn test_object_style_with_options() {
        let config = from_json(serde_json::json!({
            "rules": {
                "no_default_summary": { "severity": "error", "options": { "templates": [] } },
                "require_param": { "severity": "warn" }
            }
        }));
        assert_eq!(
            config.get_severity("no_default_summary"),
            Some(LintSeverity::Error)
        );
        assert!(config.get_options("no_default_summary").is_some());
        assert!(config.get_options("require_param").is_none());
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let result: Result<LintConfig, _> =
            serde_json::from_value(serde_json::json!({ "rules": { "require_summary": "loud" } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_get_options_returns_none_for_preset() {
        assert!(LintConfig::recommended()
            .get_options("no_default_summary")
            .is_none());
    }
}
