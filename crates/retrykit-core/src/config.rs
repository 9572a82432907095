use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::retry::{BackoffKind, Retry};

/// Retry policy parameters (`[retry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total time budget in seconds across all attempts.
    pub up_to_secs: f64,
    /// Delay in seconds after the first failure (e.g. 0.25 = 250ms).
    pub first_delay_secs: f64,
    /// Maximum delay in seconds between two attempts.
    pub backoff_limit_secs: f64,
    /// Backoff strategy: "constant" or "exponential".
    #[serde(default)]
    pub backoff: BackoffKind,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            up_to_secs: 30.0,
            first_delay_secs: 1.0,
            backoff_limit_secs: 8.0,
            backoff: BackoffKind::Exponential,
        }
    }
}

/// A config value that cannot be turned into a retry policy.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number of seconds (got {value})")]
    InvalidSeconds { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },
}

fn secs(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidSeconds { field, value })
}

impl RetryConfig {
    /// Build a wall-clock retry policy from these settings.
    pub fn to_retry(&self) -> Result<Retry, ConfigError> {
        let up_to = secs("up_to_secs", self.up_to_secs)?;
        let first_delay = secs("first_delay_secs", self.first_delay_secs)?;
        let backoff_limit = secs("backoff_limit_secs", self.backoff_limit_secs)?;
        // Delays are clamped to the limit: either one at zero means never sleeping.
        if first_delay.is_zero() {
            return Err(ConfigError::ZeroDelay {
                field: "first_delay_secs",
            });
        }
        if backoff_limit.is_zero() {
            return Err(ConfigError::ZeroDelay {
                field: "backoff_limit_secs",
            });
        }
        Ok(Retry::new(up_to, first_delay, backoff_limit))
    }
}

/// HTTP probe settings (`[probe]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/retrykit/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrykitConfig {
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl RetrykitConfig {
    /// The configuration as it would be written to config.toml.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("retrykit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RetrykitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RetrykitConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<RetrykitConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: RetrykitConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = RetrykitConfig::default();
        assert_eq!(cfg.retry.up_to_secs, 30.0);
        assert_eq!(cfg.retry.first_delay_secs, 1.0);
        assert_eq!(cfg.retry.backoff_limit_secs, 8.0);
        assert_eq!(cfg.retry.backoff, BackoffKind::Exponential);
        assert_eq!(cfg.probe.timeout_secs, 10);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = RetrykitConfig::default();
        let toml = cfg.to_toml().unwrap();
        assert!(toml.contains("[retry]"));
        assert!(toml.contains("backoff = \"exponential\""));
        let parsed: RetrykitConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [retry]
            up_to_secs = 5
            first_delay_secs = 0.5
            backoff_limit_secs = 2
            backoff = "constant"

            [probe]
            timeout_secs = 3
        "#;
        let cfg: RetrykitConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.retry.backoff, BackoffKind::Constant);
        assert!((cfg.retry.first_delay_secs - 0.5).abs() < 1e-9);
        assert_eq!(cfg.probe.timeout(), Duration::from_secs(3));

        let retry = cfg.retry.to_retry().unwrap();
        assert_eq!(retry.up_to, Duration::from_secs(5));
        assert_eq!(retry.first_delay, Duration::from_millis(500));
        assert_eq!(retry.backoff_limit, Duration::from_secs(2));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg: RetrykitConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, RetrykitConfig::default());

        let toml = r#"
            [retry]
            up_to_secs = 60
            first_delay_secs = 2
            backoff_limit_secs = 16
        "#;
        let cfg: RetrykitConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.retry.backoff, BackoffKind::Exponential);
        assert_eq!(cfg.probe, ProbeConfig::default());
    }

    #[test]
    fn unknown_backoff_is_rejected() {
        let toml = r#"
            [retry]
            up_to_secs = 60
            first_delay_secs = 2
            backoff_limit_secs = 16
            backoff = "fibonacci"
        "#;
        assert!(toml::from_str::<RetrykitConfig>(toml).is_err());
    }

    #[test]
    fn zero_or_negative_delays_are_rejected() {
        let mut cfg = RetryConfig::default();
        cfg.first_delay_secs = 0.0;
        assert_eq!(
            cfg.to_retry().unwrap_err(),
            ConfigError::ZeroDelay {
                field: "first_delay_secs"
            }
        );

        cfg.first_delay_secs = 1.0;
        cfg.up_to_secs = -1.0;
        assert!(matches!(
            cfg.to_retry().unwrap_err(),
            ConfigError::InvalidSeconds { field: "up_to_secs", .. }
        ));

        cfg.up_to_secs = f64::NAN;
        assert!(cfg.to_retry().is_err());
    }

    #[test]
    fn zero_backoff_limit_is_rejected() {
        let cfg = RetryConfig {
            up_to_secs: 0.05,
            first_delay_secs: 1.0,
            backoff_limit_secs: 0.0,
            backoff: BackoffKind::Constant,
        };
        assert_eq!(
            cfg.to_retry().unwrap_err(),
            ConfigError::ZeroDelay {
                field: "backoff_limit_secs"
            }
        );
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[probe]\ntimeout_secs = 7").unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.probe.timeout_secs, 7);
        assert_eq!(cfg.retry, RetryConfig::default());
    }

    #[test]
    fn load_from_path_reports_bad_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[retry\nup_to_secs = ").unwrap();
        let err = load_from_path(f.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing config"));
    }
}
