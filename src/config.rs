use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "CALC";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

/// Output style of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    #[default]
    Full,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_json_limit")]
    pub json_limit_bytes: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            json_limit_bytes: default_json_limit(),
        }
    }
}

fn default_json_limit() -> usize { 64 * 1024 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Later sources override earlier ones:
    /// 1. Defaults on the structs
    /// 2. `config/default.toml`
    /// 3. `config/local.toml` (development overrides)
    /// 4. Environment variables, e.g. `CALC__SERVER__PORT=9000`
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Worker threads for the HTTP server
    pub fn workers(&self) -> usize {
        self.server
            .workers
            .filter(|&n| n > 0)
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(4, |n| n.get()))
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
