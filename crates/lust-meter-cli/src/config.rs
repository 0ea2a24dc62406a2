//! Configuration file support for lust-meter.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/lust-meter/config.toml` (lowest priority)
//! - Project-local: `.lust-meter.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Upload limits.
    pub upload: UploadConfig,
    /// Simulated analysis settings.
    pub analysis: AnalysisConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Treat inputs as dropped files.
    pub drop: Option<bool>,
}

/// Upload configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted payload in bytes.
    pub max_bytes: Option<u64>,
}

/// Analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Shortest simulated delay in milliseconds.
    pub min_delay_ms: Option<u64>,
    /// Width of the delay window in milliseconds.
    pub delay_span_ms: Option<u64>,
    /// Seed for reproducible predictions.
    pub seed: Option<u64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress spinner.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/lust-meter/config.toml`
    /// 2. Project-local: `.lust-meter.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if self.upload.max_bytes == Some(0) {
            return Err("upload.max_bytes must be greater than 0".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);
        self.general.drop = other.general.drop.or(self.general.drop);

        self.upload.max_bytes = other.upload.max_bytes.or(self.upload.max_bytes);

        self.analysis.min_delay_ms = other.analysis.min_delay_ms.or(self.analysis.min_delay_ms);
        self.analysis.delay_span_ms = other
            .analysis
            .delay_span_ms
            .or(self.analysis.delay_span_ms);
        self.analysis.seed = other.analysis.seed.or(self.analysis.seed);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lust-meter").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.lust-meter.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".lust-meter.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.upload.max_bytes.is_none());
        assert!(config.analysis.seed.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true
drop = true

[upload]
max_bytes = 2048

[analysis]
min_delay_ms = 10
delay_span_ms = 20
seed = 7

[output]
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.general.drop, Some(true));
        assert_eq!(config.upload.max_bytes, Some(2048));
        assert_eq!(config.analysis.min_delay_ms, Some(10));
        assert_eq!(config.analysis.delay_span_ms, Some(20));
        assert_eq!(config.analysis.seed, Some(7));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.output.progress, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig = toml::from_str(
            r"
[analysis]
seed = 3
",
        )
        .expect("parse partial");

        assert_eq!(config.analysis.seed, Some(3));
        assert!(config.analysis.min_delay_ms.is_none());
        assert!(config.upload.max_bytes.is_none());
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[upload]
max_bytes = 100

[analysis]
min_delay_ms = 5
seed = 1
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[analysis]
seed = 2

[output]
format = 'json'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.upload.max_bytes, Some(100));
        assert_eq!(base.analysis.min_delay_ms, Some(5));
        assert_eq!(base.analysis.seed, Some(2));
        assert_eq!(base.output.format, Some("json".to_string()));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[output]
format = 'jsonl'
pretty = true
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.output.format, Some("jsonl".to_string()));
        assert_eq!(base.output.pretty, Some(true));
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
[upload]
max_bytes = "ten megabytes"
"#,
        );
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_zero_limit() {
        let mut config = AppConfig::default();
        config.upload.max_bytes = Some(0);

        let result = config.validate();
        assert!(result.unwrap_err().contains("upload.max_bytes"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let result = config.validate();
        assert!(result.unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".lust-meter.toml"), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, dir.path().join(".lust-meter.toml"));
    }
}
