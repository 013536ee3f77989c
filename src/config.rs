use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::criteria::{DEFAULT_RADIUS_MILES, MAX_RADIUS_MILES};
use crate::core::translate::DEFAULT_PAGE_SIZE;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub ticketmaster: TicketmasterSettings,
    #[serde(default)]
    pub search: SearchSettings,
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
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Deserialize)]
pub struct TicketmasterSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    /// Hard limit for one upstream call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u16,
}

fn default_base_url() -> String { crate::services::ticketmaster::DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_page_size() -> u16 { DEFAULT_PAGE_SIZE }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_miles")]
    pub default_radius_miles: f64,
    #[serde(default = "default_max_radius_miles")]
    pub max_radius_miles: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_miles: default_radius_miles(),
            max_radius_miles: default_max_radius_miles(),
        }
    }
}

fn default_radius_miles() -> f64 { DEFAULT_RADIUS_MILES }
fn default_max_radius_miles() -> f64 { MAX_RADIUS_MILES }

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with NEARBY__)
    /// 4. TICKETMASTER_API_KEY and PORT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NEARBY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NEARBY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        Self::from_config(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NEARBY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(settings)
    }

    /// Deserialize merged sources, rejecting a blank API key
    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;

        if settings.ticketmaster.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "ticketmaster.api_key is empty; set TICKETMASTER_API_KEY".to_string(),
            ));
        }

        Ok(settings)
    }
}

/// Apply the conventional unprefixed variables on top of everything else
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("TICKETMASTER_API_KEY") {
        builder = builder.set_override("ticketmaster.api_key", api_key)?;
    }
    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[ticketmaster]\napi_key = \"abc\"\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.ticketmaster.api_key, "abc");
        assert_eq!(settings.ticketmaster.timeout_secs, 10);
        assert_eq!(settings.ticketmaster.page_size, 50);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.search.default_radius_miles, 10.0);
        assert_eq!(settings.search.max_radius_miles, 300.0);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_blank_api_key_rejected() {
        for source in ["[ticketmaster]\napi_key = \"\"\n", "[ticketmaster]\napi_key = \"  \"\n"] {
            let config = Config::builder()
                .add_source(File::from_str(source, FileFormat::Toml))
                .build()
                .unwrap();

            assert!(matches!(Settings::from_config(config), Err(ConfigError::Message(_))));
        }

        let config = Config::builder()
            .add_source(File::from_str("[ticketmaster]\napi_key = \"abc\"\n", FileFormat::Toml))
            .build()
            .unwrap();
        assert_eq!(Settings::from_config(config).unwrap().ticketmaster.api_key, "abc");
    }

    #[test]
    fn test_default_file_has_no_api_key() {
        let result = Settings::from_config(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .build()
                .unwrap(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_required() {
        let result: Result<Settings, _> = Config::builder()
            .add_source(File::from_str("[server]\nport = 8080\n", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize();

        assert!(result.is_err());
    }
}
