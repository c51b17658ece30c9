//! TOML configuration for the `donchian` binary.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//! Command-line flags override file values through [`AppConfig::apply_overrides`].
//!
//! ```toml
//! [channel]
//! name = "dch_55"
//! period = 55
//!
//! [output]
//! format = "json"
//! skip_warmup = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PERIOD: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("channel period must be >= 1, got {0}")]
    InvalidPeriod(usize),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub channel: ChannelConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Indicator name. Defaults to `donchian_{period}`.
    pub name: Option<String>,
    /// Lookback window in bars.
    pub period: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: None,
            period: DEFAULT_PERIOD,
        }
    }
}

impl ChannelConfig {
    pub fn resolved_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("donchian_{}", self.period))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Drop rows emitted before the channel is ready.
    pub skip_warmup: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Layer command-line values over the file. `None` keeps the file value.
    pub fn apply_overrides(
        mut self,
        period: Option<usize>,
        name: Option<String>,
        format: Option<OutputFormat>,
        skip_warmup: bool,
    ) -> Result<Self, ConfigError> {
        if let Some(period) = period {
            self.channel.period = period;
        }
        if name.is_some() {
            self.channel.name = name;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        self.output.skip_warmup |= skip_warmup;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.period == 0 {
            return Err(ConfigError::InvalidPeriod(self.channel.period));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.channel.period, 20);
        assert_eq!(config.channel.resolved_name(), "donchian_20");
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(!config.output.skip_warmup);
    }

    #[test]
    fn parses_full_config() {
        let config = AppConfig::from_toml(
            r#"
            [channel]
            name = "dch"
            period = 55

            [output]
            format = "json"
            skip_warmup = true
            "#,
        )
        .unwrap();
        assert_eq!(config.channel.resolved_name(), "dch");
        assert_eq!(config.channel.period, 55);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.skip_warmup);
    }

    #[test]
    fn zero_period_rejected() {
        let err = AppConfig::from_toml("[channel]\nperiod = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPeriod(0)));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = AppConfig::from_toml("[channel]\nperiods = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_win_over_file() {
        let config = AppConfig::from_toml("[channel]\nperiod = 10\n")
            .unwrap()
            .apply_overrides(Some(3), Some("x".into()), Some(OutputFormat::Json), true)
            .unwrap();
        assert_eq!(config.channel.period, 3);
        assert_eq!(config.channel.resolved_name(), "x");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.skip_warmup);
    }

    #[test]
    fn missing_overrides_keep_file_values() {
        let config = AppConfig::from_toml("[channel]\nperiod = 10\n[output]\nskip_warmup = true\n")
            .unwrap()
            .apply_overrides(None, None, None, false)
            .unwrap();
        assert_eq!(config.channel.period, 10);
        assert!(config.output.skip_warmup);
    }

    #[test]
    fn override_to_zero_rejected() {
        let err = AppConfig::default()
            .apply_overrides(Some(0), None, None, false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPeriod(0)));
    }
}
