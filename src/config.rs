//! Configuration management

use anyhow::Result;
use benchmark_helper::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `PROJECT_ALPHA__REPORT__DURATION_STYLE`.
pub const ENV_PREFIX: &str = "PROJECT_ALPHA";

/// Environment values for this key are comma-separated lists.
const SECTIONS_KEY: &str = "demo.sections";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub report: ReportConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub iterations: u32,
    pub sections: Vec<String>,
    pub work_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report: ReportConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            sections: vec!["load".to_string(), "render".to_string()],
            work_ms: 25,
        }
    }
}

impl AppConfig {
    /// Layers an optional TOML file and `PROJECT_ALPHA__*` environment
    /// variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key(SECTIONS_KEY)
                    .source(env),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchmark_helper::DurationStyle;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.report.duration_style, DurationStyle::Clock);
        assert!(!config.report.include_percentiles);
        assert_eq!(config.demo.iterations, 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [report]
            duration_style = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.duration_style, DurationStyle::Compact);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.demo, DemoConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let mut config = AppConfig::default();
        config.report.include_percentiles = true;
        config.demo.sections = vec!["parse".to_string()];

        let path = std::env::temp_dir().join(format!("project_alpha_{}.toml", std::process::id()));
        let path_str = path.to_str().unwrap();
        config.save_to_file(path_str).unwrap();

        assert_eq!(AppConfig::load_from_file(path_str).unwrap(), config);
        assert_eq!(AppConfig::load_with_env(Some(&path), env(&[])).unwrap(), config);

        std::fs::remove_file(&path).ok();
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn test_load_defaults_only() {
        assert_eq!(AppConfig::load_with_env(None, env(&[])).unwrap(), AppConfig::default());
        // No test sets PROJECT_ALPHA__* in the process environment.
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_env_scalar_override() {
        let config = AppConfig::load_with_env(
            None,
            env(&[
                ("PROJECT_ALPHA__REPORT__DURATION_STYLE", "compact"),
                ("PROJECT_ALPHA__REPORT__INCLUDE_PERCENTILES", "true"),
                ("PROJECT_ALPHA__DEMO__ITERATIONS", "7"),
            ]),
        )
        .unwrap();

        assert_eq!(config.report.duration_style, DurationStyle::Compact);
        assert!(config.report.include_percentiles);
        assert_eq!(config.demo.iterations, 7);
        assert_eq!(config.demo.sections, DemoConfig::default().sections);
    }

    #[test]
    fn test_env_list_override() {
        let config = AppConfig::load_with_env(
            None,
            env(&[("PROJECT_ALPHA__DEMO__SECTIONS", "parse,render,io")]),
        )
        .unwrap();

        assert_eq!(config.demo.sections, vec!["parse", "render", "io"]);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("project_alpha_env_{}.toml", std::process::id()));
        AppConfig::default().save_to_file(path.to_str().unwrap()).unwrap();

        let config = AppConfig::load_with_env(
            Some(&path),
            env(&[("PROJECT_ALPHA__DEMO__SECTIONS", "only")]),
        )
        .unwrap();
        assert_eq!(config.demo.sections, vec!["only"]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/project_alpha.toml"))).is_err());
    }
}
