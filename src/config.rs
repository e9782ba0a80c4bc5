use std::collections::HashSet;
use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::indicator::build_indicator;
use crate::pattern::build_detector;

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

fn default_history_limit() -> usize {
    300
}

fn default_interval_ms() -> u64 {
    500
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub indicators: Vec<IndicatorConfig>,
    #[serde(default)]
    pub patterns: PatternsConfig,
    #[serde(default)]
    pub symbols: Vec<SymbolConfig>,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Maximum number of points kept per symbol while watching a feed.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorConfig {
    pub kind: String,
    #[serde(default)]
    pub params: toml::Table,
}

#[derive(Debug, Default, Deserialize)]
pub struct PatternsConfig {
    /// Detector names to run; empty runs all of them.
    #[serde(default)]
    pub detectors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    /// JSON file holding the recorded series to replay.
    pub path: PathBuf,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Load and validate an `AppConfig` from a TOML file at `path`.
pub fn load(path: &Path) -> Result<AppConfig, Report<ConfigError>> {
    let content = std::fs::read_to_string(path)
        .change_context(ConfigError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;

    let config = parse(&content)?;
    validate(&config)?;
    Ok(config)
}

pub fn parse(content: &str) -> Result<AppConfig, Report<ConfigError>> {
    toml::from_str(content).change_context(ConfigError::Parse {
        reason: "invalid TOML syntax or schema mismatch".into(),
    })
}

const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

pub fn validate(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    validate_general(config)?;
    validate_indicators(config)?;
    validate_detectors(config)?;
    validate_symbols_unique(config)?;
    Ok(())
}

fn validate_general(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    if !VALID_LOG_FORMATS.contains(&config.general.log_format.as_str()) {
        return Err(Report::new(ConfigError::Validation {
            field: format!(
                "general.log_format \"{}\" is not valid",
                config.general.log_format
            ),
        }));
    }
    if config.general.history_limit == 0 {
        return Err(Report::new(ConfigError::Validation {
            field: "general.history_limit must be > 0".into(),
        }));
    }
    Ok(())
}

fn validate_indicators(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    for (index, indicator) in config.indicators.iter().enumerate() {
        build_indicator(indicator).change_context(ConfigError::Validation {
            field: format!("indicators[{index}] (kind = \"{}\")", indicator.kind),
        })?;
    }
    Ok(())
}

fn validate_detectors(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    for name in &config.patterns.detectors {
        build_detector(name).change_context(ConfigError::Validation {
            field: format!("patterns.detectors: \"{name}\""),
        })?;
    }
    Ok(())
}

fn validate_symbols_unique(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    let mut seen = HashSet::new();
    for symbol in &config.symbols {
        if !seen.insert(symbol.symbol.as_str()) {
            return Err(Report::new(ConfigError::Validation {
                field: format!("symbols: duplicate symbol \"{}\"", symbol.symbol),
            }));
        }
    }
    Ok(())
}
