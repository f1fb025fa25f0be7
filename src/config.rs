use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
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
fn default_port() -> u16 { 8080 }

/// AeroDataBox connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// Base URL for term search and flight details
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL for the number+date status endpoint (served through the MagicAPI gateway)
    #[serde(default = "default_status_base_url")]
    pub status_base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_base_url: default_status_base_url(),
            api_key: None,
            api_key_header: default_api_key_header(),
            timeout_secs: None,
        }
    }
}

impl UpstreamSettings {
    /// Settings pointing every endpoint family at one base URL
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            status_base_url: base_url.clone(),
            base_url,
            api_key,
            ..Self::default()
        }
    }
}

fn default_base_url() -> String { "https://api.aerodatabox.com".to_string() }
fn default_status_base_url() -> String {
    "https://api.magicapi.dev/api/v1/aedbx/aerodatabox".to_string()
}
fn default_api_key_header() -> String { "x-magicapi-key".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FLIGHTS__)
    /// 5. AERODATABOX_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        Self::finish(builder)
    }

    /// Load configuration from an explicit file, then environment variables
    ///
    /// The file must exist. Used when `FLIGHTS_CONFIG` names one at startup.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            // e.g., FLIGHTS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FLIGHTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let api_key = std::env::var("AERODATABOX_API_KEY").ok();
        let settings = apply_api_key_override(settings, api_key)?;

        settings.try_deserialize()
    }
}

/// The bare AERODATABOX_API_KEY variable wins over any configured key
fn apply_api_key_override(
    settings: Config,
    api_key: Option<String>,
) -> Result<Config, ConfigError> {
    match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => Config::builder()
            .add_source(settings)
            .set_override("upstream.api_key", key)?
            .build(),
        None => Ok(settings),
    }
}
