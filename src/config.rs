//! Configuration management for the action server
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ActionError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the action server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Nearby facility search configuration
    #[serde(default)]
    pub facilities: FacilitiesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Webhook server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Unit system passed to the API
    #[serde(default = "default_weather_units")]
    pub units: String,
}

/// Geocoding (Nominatim) configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
}

/// Overpass POI search configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitiesConfig {
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,
    #[serde(default = "default_overpass_timeout")]
    pub timeout_seconds: u32,
    /// Amenity tag value, `|` separates alternatives
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,
    /// Maximum number of facilities in a reply
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Webhook server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    format!("assistant-actions/{}", crate::VERSION)
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_overpass_timeout() -> u32 {
    30
}

fn default_category() -> String {
    "hospital|clinic".to_string()
}

fn default_radius_meters() -> u32 {
    10_000
}

fn default_top_n() -> usize {
    crate::facilities::DEFAULT_TOP_N
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5055
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            units: default_weather_units(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_geocoding_timeout(),
        }
    }
}

impl Default for FacilitiesConfig {
    fn default() -> Self {
        Self {
            overpass_url: default_overpass_url(),
            timeout_seconds: default_overpass_timeout(),
            category: default_category(),
            radius_meters: default_radius_meters(),
            top_n: default_top_n(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl FacilitiesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl ActionsConfig {
    /// Load configuration from `config_path`, or from the default location
    /// when none is given, then apply environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // ACTIONS_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("ACTIONS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ActionsConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("assistant-actions").join("config.toml"))
    }

    /// Apply default values to fields left empty or zero
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.weather.api_key.as_deref().is_some_and(str::is_empty) {
            self.weather.api_key = None;
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.facilities.overpass_url.is_empty() {
            self.facilities.overpass_url = default_overpass_url();
        }
        if self.facilities.timeout_seconds == 0 {
            self.facilities.timeout_seconds = default_overpass_timeout();
        }
        if self.facilities.category.is_empty() {
            self.facilities.category = default_category();
        }
        if self.facilities.radius_meters == 0 {
            self.facilities.radius_meters = default_radius_meters();
        }
        if self.facilities.top_n == 0 {
            self.facilities.top_n = default_top_n();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("Weather API", self.weather.timeout_seconds),
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Overpass", self.facilities.timeout_seconds),
        ];
        for (service, timeout) in timeouts {
            if timeout > 300 {
                return Err(ActionError::config(format!(
                    "{service} timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if self.facilities.radius_meters > 100_000 {
            return Err(
                ActionError::config("Search radius cannot exceed 100000 meters").into(),
            );
        }

        if self.facilities.top_n > 50 {
            return Err(ActionError::config("top_n cannot exceed 50").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ActionError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ActionError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Weather API base URL", &self.weather.base_url),
            ("Geocoding base URL", &self.geocoding.base_url),
            ("Overpass URL", &self.facilities.overpass_url),
        ];
        for (label, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ActionError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        // interpolated into an Overpass QL string literal
        let category_ok = self.facilities.category.split('|').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        });
        if !category_ok {
            return Err(ActionError::config(format!(
                "Invalid facility category '{}'. Use lowercase tag values separated by '|'",
                self.facilities.category
            ))
            .into());
        }

        Ok(())
    }
}
