//! Environment-driven configuration for the applicant-tracking service.
//!
//! Everything comes from `APP_*` variables, with a local `.env` honored via
//! dotenvy. Missing values fall back to development defaults; malformed
//! values fail loading instead of booting a misconfigured server.

use std::env;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn detect() -> Self {
        match env::var("APP_ENV") {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::Development,
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Development sessions want the pipeline traces; test and production
    /// runs stay quieter unless `APP_LOG_LEVEL` says otherwise.
    pub const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Test => "warn",
            Self::Production => "info",
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::detect();
        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(environment),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// `localhost` is accepted as a spelling of the loopback address;
    /// anything else must be a literal IP.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost {
                host: self.host.clone(),
                source,
            })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    fn from_env(environment: AppEnvironment) -> Self {
        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());
        Self { log_level }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT '{value}' is not a valid port number")]
    InvalidPort { value: String },
    #[error("APP_HOST '{host}' is neither 'localhost' nor an IP address")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
