// file: src/config.rs
// description: optional layered configuration for scan tuning (defaults, toml file, env)
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use crate::matcher::MatchMode;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "docseek.toml";
pub const ENV_PREFIX: &str = "DOCSEEK";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub formats: FormatConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    pub match_mode: MatchMode,
    pub follow_links: bool,
    pub skip_hidden: bool,
    pub skip_patterns: Vec<String>,
    /// 0 disables the limit.
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormatConfig {
    pub legacy_excel: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    pub color: bool,
    pub show_diagnostics: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            follow_links: false,
            skip_hidden: false,
            skip_patterns: vec![".git/".to_string(), "node_modules/".to_string()],
            max_file_size_mb: 0,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { legacy_excel: true }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_diagnostics: false,
        }
    }
}

impl Config {
    /// Layers built-in defaults, the toml file and `DOCSEEK__SECTION__KEY`
    /// environment overrides. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("search.skip_patterns")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig::default(),
            formats: FormatConfig::default(),
            output: OutputConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self
            .search
            .skip_patterns
            .iter()
            .any(|pattern| pattern.trim().is_empty())
        {
            return Err(SearchError::Config(
                "skip_patterns must not contain blank entries".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config.search.match_mode, MatchMode::Substring);
        assert!(config.formats.legacy_excel);
        assert_eq!(config.search.max_file_size_mb, 0);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docseek.toml");
        fs::write(
            &path,
            r#"
[search]
match_mode = "whole_word"
max_file_size_mb = 25
skip_patterns = ["archive/"]

[formats]
legacy_excel = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.search.match_mode, MatchMode::WholeWord);
        assert_eq!(config.search.max_file_size_mb, 25);
        assert_eq!(config.search.skip_patterns, vec!["archive/".to_string()]);
        assert!(!config.formats.legacy_excel);
        assert!(config.output.color);
    }

    #[test]
    fn test_blank_skip_pattern_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docseek.toml");
        fs::write(&path, "[search]\nskip_patterns = [\"  \"]\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
