use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Top-level configuration loaded from `~/.dexter/config.toml`.
///
/// Every section is optional in the file; missing values take their
/// defaults. `DEXTER_*` environment variables are applied after parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
}

impl Config {
    /// Load from the default path, falling back to defaults when the file
    /// does not exist, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        let mut cfg = if path.exists() {
            Self::parse_file(&path)?
        } else {
            Config::default()
        };
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a specific path. Environment overrides still apply.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut cfg = Self::parse_file(&path.into())?;
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn parse_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.general.validate()?;
        self.api.validate()?;
        self.mock.validate()?;
        Ok(())
    }

    /// Apply `DEXTER_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using an arbitrary lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("DEXTER_API_MODE") {
            match raw.parse::<BackendMode>() {
                Ok(mode) => self.api.mode = mode,
                Err(e) => tracing::warn!(value = %raw, "ignoring DEXTER_API_MODE: {e}"),
            }
        }
        if let Some(url) = lookup("DEXTER_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup("DEXTER_LATENCY_SCALE") {
            match raw.parse::<f64>() {
                Ok(scale) => self.mock.latency_scale = scale,
                Err(_) => tracing::warn!(value = %raw, "ignoring DEXTER_LATENCY_SCALE"),
            }
        }
        if let Some(level) = lookup("DEXTER_LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            self.general.log_level = level;
        }
        if let Some(dir) = lookup("DEXTER_SESSION_DIR").filter(|d| !d.trim().is_empty()) {
            self.session.dir = Some(dir);
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dexter")
            .join("config.toml")
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `text` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "general.log_format must be `text` or `json`, got `{other}`"
            ))),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

/// Which data backend the application talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// In-process mock with simulated latency and faults.
    #[default]
    Mock,
    /// Real REST API at `api.base_url`.
    Http,
}

impl FromStr for BackendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "development" => Ok(BackendMode::Mock),
            "http" | "production" => Ok(BackendMode::Http),
            other => Err(ConfigError::Validation(format!(
                "unknown backend mode `{other}`"
            ))),
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendMode::Mock => "mock",
            BackendMode::Http => "http",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub mode: BackendMode,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api.base_url must be an http(s) URL, got `{}`",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api/v1".into()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Multiplier applied to every simulated delay. `0.0` disables latency.
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
    #[serde(default = "default_true")]
    pub faults_enabled: bool,
    /// Replaces every endpoint's fault probability when set.
    #[serde(default)]
    pub fault_probability: Option<f64>,
    /// Seed for the fault injector's random source.
    #[serde(default)]
    pub fault_seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_scale: default_latency_scale(),
            faults_enabled: true,
            fault_probability: None,
            fault_seed: None,
        }
    }
}

impl MockConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_LATENCY_SCALE).contains(&self.latency_scale) {
            return Err(ConfigError::Validation(format!(
                "mock.latency_scale must be within [0, {MAX_LATENCY_SCALE}], got {}",
                self.latency_scale
            )));
        }
        if let Some(p) = self.fault_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Validation(format!(
                    "mock.fault_probability must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

/// Upper bound for `mock.latency_scale`.
pub const MAX_LATENCY_SCALE: f64 = 100.0;

fn default_latency_scale() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory for persisted session keys. Defaults to
    /// `~/.config/dexter/session/`.
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_bridge_host")]
    pub host: String,
    #[serde(default = "default_bridge_port")]
    pub port: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_bridge_host(),
            port: default_bridge_port(),
        }
    }
}

fn default_bridge_host() -> String {
    "127.0.0.1".into()
}
fn default_bridge_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn mode_aliases() {
        assert_eq!("development".parse::<BackendMode>().unwrap(), BackendMode::Mock);
        assert_eq!("PRODUCTION".parse::<BackendMode>().unwrap(), BackendMode::Http);
        assert!("staging".parse::<BackendMode>().is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = Config::default();
        cfg.apply_overrides_from(env(&[
            ("DEXTER_API_MODE", "production"),
            ("DEXTER_API_BASE_URL", "https://api.example.org/v1"),
            ("DEXTER_LATENCY_SCALE", "0"),
        ]));
        assert_eq!(cfg.api.mode, BackendMode::Http);
        assert_eq!(cfg.api.base_url, "https://api.example.org/v1");
        assert_eq!(cfg.mock.latency_scale, 0.0);
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_overrides_from(env(&[
            ("DEXTER_API_MODE", "sideways"),
            ("DEXTER_LATENCY_SCALE", "fast"),
            ("DEXTER_API_BASE_URL", "  "),
        ]));
        assert_eq!(cfg.api.mode, BackendMode::Mock);
        assert_eq!(cfg.mock.latency_scale, 1.0);
        assert_eq!(cfg.api.base_url, "http://localhost:3000/api/v1");
    }
}
