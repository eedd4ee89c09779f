//!
//! This module defines configuration structures and loading logic for stylint.
//! A configuration file is TOML with a `[global]` table and one table per rule.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration file names searched for, in order of preference
pub const CONFIG_FILES: &[&str] = &[".stylint.toml", "stylint.toml"];

/// Default file extensions linted when walking directories
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts"];

/// Normalizes configuration keys (rule names, option names) to lowercase kebab-case.
pub fn normalize_key(key: &str) -> String {
    key.replace('_', "-").to_ascii_lowercase()
}

/// Represents a rule-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleConfig {
    /// Configuration values for the rule
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
}

/// Represents the complete configuration loaded from stylint.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Rule-specific configurations, in file order
    #[serde(flatten)]
    pub rules: IndexMap<String, RuleConfig>,
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Enabled rules
    pub enable: Vec<String>,

    /// Disabled rules
    pub disable: Vec<String>,

    /// Files to exclude (glob patterns)
    pub exclude: Vec<String>,

    /// File extensions to lint
    pub extensions: Vec<String>,

    /// Respect .gitignore files when scanning directories
    #[serde(alias = "respect_gitignore")]
    pub respect_gitignore: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enable: Vec::new(),
            disable: Vec::new(),
            exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// A rule table does not match the rule's options
    #[error("Invalid configuration for rule '{rule}': {message}")]
    InvalidRuleConfig { rule: String, message: String },

    /// A rule table names a rule that does not exist
    #[error("Unknown rule '{0}' in configuration")]
    UnknownRule(String),
}

impl Config {
    /// Parse configuration text, normalizing rule names and their top-level option keys
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let rules = raw
            .rules
            .into_iter()
            .map(|(name, rule)| {
                let values = rule
                    .values
                    .into_iter()
                    .map(|(key, value)| (normalize_key(&key), value))
                    .collect();
                (normalize_key(&name), RuleConfig { values })
            })
            .collect();
        let global = GlobalConfig {
            enable: raw.global.enable.iter().map(|name| normalize_key(name)).collect(),
            disable: raw.global.disable.iter().map(|name| normalize_key(name)).collect(),
            ..raw.global
        };
        Ok(Self { global, rules })
    }

    /// Load configuration from an explicit file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the explicit file if given, otherwise the nearest discovered file, otherwise defaults
    pub fn load(explicit: Option<&Path>, start_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match discover_config_file(start_dir) {
            Some(path) => {
                log::debug!("Using config file {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject rule tables that do not name a known rule
    pub fn validate_rule_names<'a>(&self, known: impl IntoIterator<Item = &'a str>) -> Result<(), ConfigError> {
        let known: Vec<&str> = known.into_iter().collect();
        for name in self.rules.keys() {
            if !known.contains(&name.as_str()) {
                return Err(ConfigError::UnknownRule(name.clone()));
            }
        }
        Ok(())
    }
}

/// Find a config file in `start_dir` or its ancestors
pub fn discover_config_file(start_dir: &Path) -> Option<PathBuf> {
    start_dir.ancestors().find_map(|dir| {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Get a rule-specific configuration value, accepting kebab-case or snake_case keys
pub fn get_rule_config_value<T: serde::de::DeserializeOwned>(config: &Config, rule_name: &str, key: &str) -> Option<T> {
    let rule_config = config.rules.get(&normalize_key(rule_name))?;
    let value = rule_config.values.get(&normalize_key(key))?;
    T::deserialize(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_global_and_rule_tables() {
        let config = Config::from_toml_str(
            r#"
[global]
disable = ["comma_style"]
exclude = ["dist/**"]

[brace-style]
style = "allman"
allow_single_line = true
"#,
        )
        .unwrap();
        assert_eq!(config.global.disable, vec!["comma-style"]);
        assert_eq!(config.global.exclude, vec!["dist/**"]);
        assert_eq!(config.global.extensions.len(), DEFAULT_EXTENSIONS.len());
        let brace = &config.rules["brace-style"];
        assert_eq!(brace.values["style"].as_str(), Some("allman"));
        assert_eq!(brace.values["allow-single-line"].as_bool(), Some(true));
    }

    #[test]
    fn test_rule_names_are_normalized() {
        let config = Config::from_toml_str("[Object_Curly_Spacing]\nstyle = \"always\"\n").unwrap();
        assert!(config.rules.contains_key("object-curly-spacing"));
        let style: Option<String> = get_rule_config_value(&config, "object_curly_spacing", "style");
        assert_eq!(style.as_deref(), Some("always"));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[global\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_rule_names_are_rejected() {
        let config = Config::from_toml_str("[not-a-rule]\nx = 1\n").unwrap();
        let err = config.validate_rule_names(["indent", "comma-style"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule(name) if name == "not-a-rule"));
    }

    #[test]
    fn test_discovery_walks_up_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".stylint.toml"), "[indent]\nindent = 2\n").unwrap();

        let config = Config::load(None, &nested).unwrap();
        assert_eq!(config.rules["indent"].values["indent"].as_integer(), Some(2));
    }

    #[test]
    fn test_missing_explicit_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
