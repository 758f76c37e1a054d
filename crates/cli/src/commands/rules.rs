use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use doclint_linter::{declaration_rules, file_rules, LintRule};

/// One row of the rule listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub default_severity: String,
    pub configurable: bool,
    pub diagnostic_ids: Vec<&'static str>,
}

impl RuleInfo {
    fn from_rule(rule: &dyn LintRule) -> Self {
        Self {
            name: rule.name(),
            description: rule.description(),
            default_severity: rule.default_severity().to_string(),
            configurable: rule.configurable(),
            diagnostic_ids: rule.diagnostic_ids(),
        }
    }
}

/// Every registered rule, declaration rules first
pub fn rule_infos() -> Vec<RuleInfo> {
    let declaration = declaration_rules()
        .iter()
        .map(|rule| RuleInfo::from_rule(rule.as_ref()));
    let file = file_rules()
        .iter()
        .map(|rule| RuleInfo::from_rule(rule.as_ref()));
    declaration.chain(file).collect()
}

pub fn run(format: OutputFormat) -> Result<()> {
    let rules = rule_infos();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        OutputFormat::Human | OutputFormat::Github => {
            for rule in &rules {
                let severity = match rule.default_severity.as_str() {
                    "error" => rule.default_severity.red(),
                    "warning" => rule.default_severity.yellow(),
                    _ => rule.default_severity.dimmed(),
                };
                let fixed = if rule.configurable {
                    String::new()
                } else {
                    format!(" {}", "(fixed severity)".dimmed())
                };
                println!("{} [{severity}]{fixed}", rule.name.bold());
                println!("  {}", rule.description);
                if rule.diagnostic_ids != [rule.name] {
                    println!(
                        "  {}: {}",
                        "reports".dimmed(),
                        rule.diagnostic_ids.join(", ")
                    );
                }
            }
            println!();
            println!("{} rule(s)", rules.len());
        }
    }

    Ok(())
}
