use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::hiring::matching::{ScoringPolicy, UnconstrainedCredit};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringPolicy,
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let unconstrained_credit = match env::var("MATCH_UNCONSTRAINED_CREDIT") {
            Ok(raw) => parse_unconstrained_credit(&raw)?,
            Err(_) => UnconstrainedCredit::default(),
        };

        let analytics = AnalyticsConfig {
            top_skills: read_limit("ANALYTICS_TOP_SKILLS", AnalyticsConfig::DEFAULT_TOP_SKILLS)?,
            top_performers: read_limit(
                "ANALYTICS_TOP_PERFORMERS",
                AnalyticsConfig::DEFAULT_TOP_PERFORMERS,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringPolicy {
                unconstrained_credit,
            },
            analytics,
        })
    }
}

fn parse_unconstrained_credit(raw: &str) -> Result<UnconstrainedCredit, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "presence" | "award_on_presence" => Ok(UnconstrainedCredit::AwardOnPresence),
        "withhold" | "none" => Ok(UnconstrainedCredit::Withhold),
        _ => Err(ConfigError::InvalidPolicy {
            value: raw.to_string(),
        }),
    }
}

fn read_limit(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidLimit { key }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Display truncation for analytics views. The aggregator itself never truncates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub top_skills: usize,
    pub top_performers: usize,
}

impl AnalyticsConfig {
    pub const DEFAULT_TOP_SKILLS: usize = 10;
    pub const DEFAULT_TOP_PERFORMERS: usize = 10;
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_skills: Self::DEFAULT_TOP_SKILLS,
            top_performers: Self::DEFAULT_TOP_PERFORMERS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPolicy { value: String },
    InvalidLimit { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPolicy { value } => write!(
                f,
                "MATCH_UNCONSTRAINED_CREDIT must be 'presence' or 'withhold' (got '{}')",
                value
            ),
            ConfigError::InvalidLimit { key } => {
                write!(f, "{} must be a non-negative integer", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPolicy { .. }
            | ConfigError::InvalidLimit { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("MATCH_UNCONSTRAINED_CREDIT");
        env::remove_var("ANALYTICS_TOP_SKILLS");
        env::remove_var("ANALYTICS_TOP_PERFORMERS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.scoring.unconstrained_credit,
            UnconstrainedCredit::AwardOnPresence
        );
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_scoring_policy_and_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_UNCONSTRAINED_CREDIT", "Withhold");
        env::set_var("ANALYTICS_TOP_SKILLS", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.scoring.unconstrained_credit,
            UnconstrainedCredit::Withhold
        );
        assert_eq!(config.analytics.top_skills, 5);
        assert_eq!(
            config.analytics.top_performers,
            AnalyticsConfig::DEFAULT_TOP_PERFORMERS
        );
        reset_env();
    }

    #[test]
    fn rejects_unknown_policy_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_UNCONSTRAINED_CREDIT", "sometimes");
        let err = AppConfig::load().expect_err("policy should be rejected");
        assert!(matches!(err, ConfigError::InvalidPolicy { .. }));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_TOP_PERFORMERS", "ten");
        let err = AppConfig::load().expect_err("limit should be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidLimit {
                key: "ANALYTICS_TOP_PERFORMERS"
            }
        ));
        reset_env();
    }
}
