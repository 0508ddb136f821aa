//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::EngineConfig;

/// How often the city list is re-read from disk (1 hour).
const DEFAULT_CITIES_RELOAD: Duration = Duration::from_secs(60 * 60);

/// Error for an environment variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// How to run the trip-planning engine
    pub engine: EngineConfig,
    /// `country,city` file used for suggestions
    pub cities_path: PathBuf,
    /// How often to re-read the city file
    pub cities_reload: Duration,
    /// Directory of static assets served under `/static`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            engine: EngineConfig::default(),
            cities_path: PathBuf::from("cities.csv"),
            cities_reload: DEFAULT_CITIES_RELOAD,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("TRIP_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                name: "TRIP_BIND_ADDR",
                reason: e.to_string(),
                value,
            })?;
        }
        if let Some(value) = lookup("TRIP_ENGINE_PATH") {
            config.engine.program = PathBuf::from(value);
        }
        if let Some(value) = lookup("TRIP_ENGINE_DIR") {
            config.engine.working_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("TRIP_ENGINE_TIMEOUT_SECS") {
            config.engine.timeout = parse_secs("TRIP_ENGINE_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("TRIP_CITIES_PATH") {
            config.cities_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("TRIP_CITIES_RELOAD_SECS") {
            config.cities_reload = parse_secs("TRIP_CITIES_RELOAD_SECS", value)?;
        }
        if let Some(value) = lookup("TRIP_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }

        Ok(config)
    }
}

/// Parse a positive whole number of seconds.
fn parse_secs(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError {
            name,
            value,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}
